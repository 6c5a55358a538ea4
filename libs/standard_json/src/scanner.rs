use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::internal::config::GeneratorConfig;
use crate::internal::errors::{map_io_err, Result};
use crate::types::ImportMap;

/// `import "path";`, `import 'path';` and `import {A, B} from "path";` on a single line.
static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"import\s+(?:\{.*?\}\s+from\s+)?["'](.+?)["'];"#).expect("valid import pattern")
});

/// Extracts every import path declared in `source`, in order of appearance.
pub fn find_imports(source: &str) -> Vec<String> {
  IMPORT_PATTERN
    .captures_iter(source)
    .filter_map(|captures| captures.get(1))
    .map(|path| path.as_str().to_string())
    .collect()
}

/// Reads `path` and extracts its imports. Unreadable files are an error.
pub fn find_imports_in_file(path: &Path) -> Result<Vec<String>> {
  let contents = map_io_err(fs::read_to_string(path), path)?;
  Ok(find_imports(&contents))
}

/// Walks `config.sources_dir` and records the imports of every source file found.
pub fn scan_sources(config: &GeneratorConfig) -> Result<ImportMap> {
  let root = &config.sources_dir;
  if !root.is_dir() {
    tracing::warn!("Source directory {} does not exist", root.display());
    return Ok(ImportMap::new());
  }
  collect_imports(config, WalkDir::new(root).sort_by_file_name())
}

/// Entries the walk cannot read are logged and passed over; a source file that cannot be read is
/// an error.
fn collect_imports<I>(config: &GeneratorConfig, entries: I) -> Result<ImportMap>
where
  I: IntoIterator<Item = walkdir::Result<DirEntry>>,
{
  let mut imports = ImportMap::new();
  for entry in entries {
    let entry = match entry {
      Ok(entry) => entry,
      Err(err) => {
        tracing::warn!(
          "Skipping unreadable entry under {}: {err}",
          config.sources_dir.display()
        );
        continue;
      }
    };
    // Follows file symlinks; directory symlinks are not descended into.
    let path = entry.path();
    if !path.is_file() || !config.is_source_file(path) {
      continue;
    }

    let found = find_imports_in_file(path)?;
    let file = path.to_string_lossy().to_string();
    tracing::debug!(file = %file, imports = ?found, "Scanned source file");
    imports.insert(file, found);
  }

  Ok(imports)
}
