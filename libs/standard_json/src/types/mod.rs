mod imports;
mod input;

pub use imports::ImportMap;
pub use input::{BuildInfo, BuildInfoReference, CompilerInput, FilteredInput};
