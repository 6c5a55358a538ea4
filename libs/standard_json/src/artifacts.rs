use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::{DirEntry, WalkDir};

use crate::internal::config::GeneratorConfig;
use crate::internal::errors::{Error, Result};
use crate::internal::json::load_json;
use crate::internal::path::resolve_build_info_path;
use crate::types::{BuildInfo, BuildInfoReference};

/// A compiled contract artifact that points at a build-info file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractArtifact {
  /// The `*.dbg.json` (or equivalent) file carrying the reference.
  pub artifact_path: PathBuf,
  /// Directory holding the artifact, e.g. `artifacts/src/Token.sol`. Identifies the contract.
  pub contract: String,
  /// Where the build-info file is expected under the layout convention.
  pub build_info_path: PathBuf,
}

impl ContractArtifact {
  /// Loads the referenced build-info. Failures carry the contract they belong to.
  pub fn load_build_info(&self) -> Result<BuildInfo> {
    load_json(&self.build_info_path)
      .map_err(|err| Error::build_info(&self.contract, &self.build_info_path, err))
  }
}

/// Outcome of probing every JSON file below the artifacts directory.
#[derive(Clone, Debug, Default)]
pub struct ArtifactScan {
  pub artifacts: Vec<ContractArtifact>,
  /// JSON files that did not decode or carried no `buildInfo` reference, plus entries the walk
  /// could not read.
  pub skipped: usize,
}

/// Reads the `buildInfo` reference out of a candidate file. Anything that is not an artifact
/// (unreadable, malformed, not an object, no string `buildInfo`) yields `None`.
pub fn probe_artifact(path: &Path) -> Option<BuildInfoReference> {
  let value = match load_json::<Value>(path) {
    Ok(value) => value,
    Err(err) => {
      tracing::debug!("Skipping {}: {err}", path.display());
      return None;
    }
  };
  let reference = BuildInfoReference::from_value(&value);
  if reference.is_none() {
    tracing::debug!("Skipping {}: no buildInfo reference", path.display());
  }
  reference
}

/// Walks `config.artifacts_dir` and collects every contract artifact in traversal order.
pub fn find_artifacts(config: &GeneratorConfig) -> Result<ArtifactScan> {
  let root = &config.artifacts_dir;
  if !root.is_dir() {
    tracing::warn!("Artifacts directory {} does not exist", root.display());
    return Ok(ArtifactScan::default());
  }
  Ok(collect_artifacts(config, WalkDir::new(root).sort_by_file_name()))
}

/// Probes walked entries. Unreadable entries are skipped like any other non-artifact.
fn collect_artifacts<I>(config: &GeneratorConfig, entries: I) -> ArtifactScan
where
  I: IntoIterator<Item = walkdir::Result<DirEntry>>,
{
  let root = &config.artifacts_dir;
  let mut scan = ArtifactScan::default();

  for entry in entries {
    let entry = match entry {
      Ok(entry) => entry,
      Err(err) => {
        tracing::warn!("Skipping unreadable entry under {}: {err}", root.display());
        scan.skipped += 1;
        continue;
      }
    };
    // Follows file symlinks; directory symlinks are not descended into.
    let path = entry.path();
    if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
      continue;
    }

    let Some(reference) = probe_artifact(path) else {
      scan.skipped += 1;
      continue;
    };

    let contract = path
      .parent()
      .unwrap_or(root.as_path())
      .to_string_lossy()
      .to_string();
    let build_info_path =
      resolve_build_info_path(root, &reference.build_info, &config.reserved_segment);
    scan.artifacts.push(ContractArtifact {
      artifact_path: path.to_path_buf(),
      contract,
      build_info_path,
    });
  }

  scan
}
