use std::path::{is_separator, Path, PathBuf, MAIN_SEPARATOR_STR};

use super::errors::{map_io_err, Result};

/// Marker that build-info references use to climb out of the artifact directory.
pub const PARENT_SEGMENT: &str = "..";

/// Drops every path segment exactly equal to `segment` and rejoins the rest with the platform
/// separator. Leading separators survive, so absolute paths stay absolute.
pub fn strip_segment(path: &str, segment: &str) -> String {
  path
    .split(is_separator)
    .filter(|part| *part != segment)
    .collect::<Vec<_>>()
    .join(MAIN_SEPARATOR_STR)
}

/// Last segment of a string path, splitting on both `/` and the platform separator.
pub fn file_name(path: &str) -> &str {
  path.rsplit(|c: char| c == '/' || is_separator(c)).next().unwrap_or(path)
}

/// Text before the first `.` of a file name (`Token.sol` -> `Token`, `Foo.dbg.json` -> `Foo`).
pub fn file_stem_prefix(name: &str) -> &str {
  name.split('.').next().unwrap_or(name)
}

/// Locates the build-info file an artifact points at.
///
/// Hardhat writes `artifacts/src/<File>.sol/<Contract>.dbg.json` with a `buildInfo` reference such
/// as `../../build-info/<hash>.json`. Rather than resolving the reference against the artifact's
/// directory, the reserved segment is dropped from the artifacts root and the parent markers are
/// dropped from the reference, and the two are concatenated. Layouts that deviate from that
/// convention resolve to the wrong place.
pub fn resolve_build_info_path(
  artifacts_dir: &Path,
  reference: &str,
  reserved_segment: &str,
) -> PathBuf {
  let root = strip_segment(&artifacts_dir.to_string_lossy(), reserved_segment);
  let relative = strip_segment(reference, PARENT_SEGMENT);
  PathBuf::from([root, relative].join(MAIN_SEPARATOR_STR))
}

/// Canonicalises `path`, falling back to an absolute join for paths that do not exist yet.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
  if let Ok(canonical) = path.canonicalize() {
    return Ok(canonical);
  }
  if path.is_absolute() {
    return Ok(path.to_path_buf());
  }
  let cwd = map_io_err(std::env::current_dir(), ".")?;
  Ok(cwd.join(path))
}
