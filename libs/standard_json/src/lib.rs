mod artifacts;
mod assembler;
mod internal;
mod pipeline;
mod scanner;
mod types;

pub use artifacts::{find_artifacts, probe_artifact, ArtifactScan, ContractArtifact};
pub use assembler::{filter_input, output_path, relevant_file_names, write_contract_input};
pub use internal::config::{GeneratorConfig, GeneratorOptions, MatchPolicy};
pub use internal::errors::{Error, Result};
pub use internal::json::{create_directory, load_json, write_json_pretty};
pub use pipeline::{run, ArtifactFailure, RunReport};
pub use scanner::{find_imports, find_imports_in_file, scan_sources};
pub use types::{BuildInfo, BuildInfoReference, CompilerInput, FilteredInput, ImportMap};
