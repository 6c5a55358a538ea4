use std::path::PathBuf;

use crate::artifacts::{find_artifacts, ContractArtifact};
use crate::assembler::write_contract_input;
use crate::internal::config::GeneratorConfig;
use crate::internal::errors::{Error, Result};
use crate::internal::json::create_directory;
use crate::scanner::scan_sources;
use crate::types::ImportMap;

/// An artifact whose build-info could not be loaded while running with `keep_going`.
#[derive(Debug)]
pub struct ArtifactFailure {
  pub contract: String,
  pub error: Error,
}

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
  pub written: Vec<PathBuf>,
  /// JSON files under the artifacts directory that were not contract artifacts.
  pub skipped: usize,
  pub failures: Vec<ArtifactFailure>,
}

impl RunReport {
  pub fn summary(&self) -> String {
    format!(
      "{} written, {} skipped, {} failed",
      self.written.len(),
      self.skipped,
      self.failures.len()
    )
  }
}

/// Scans sources, pairs every artifact with its build-info and writes one filtered standard JSON
/// input per contract into `config.output_dir`.
///
/// Probing candidate artifacts never fails. Once an artifact is identified, a build-info that cannot
/// be loaded aborts the run, unless `config.keep_going` is set, in which case it is recorded in the
/// report. Output directory creation and output writes are best-effort and only logged.
pub fn run(config: &GeneratorConfig) -> Result<RunReport> {
  tracing::info!("Sources: {}", config.sources_dir.display());
  tracing::info!("Artifacts: {}", config.artifacts_dir.display());

  let imports = scan_sources(config)?;
  tracing::info!("Scanned {} source files", imports.len());
  for (file, declared) in imports.iter() {
    for import in declared {
      tracing::debug!("{file} imports {import}");
    }
  }

  match create_directory(&config.output_dir) {
    Ok(()) => tracing::debug!("Output directory {}", config.output_dir.display()),
    Err(err) => tracing::error!("Could not create output directory: {err}"),
  }

  let scan = find_artifacts(config)?;
  let mut report = RunReport {
    skipped: scan.skipped,
    ..RunReport::default()
  };

  for artifact in &scan.artifacts {
    match process_artifact(config, &imports, artifact) {
      Ok(Some(path)) => report.written.push(path),
      Ok(None) => {}
      Err(err) if config.keep_going => {
        tracing::error!("{err}");
        report.failures.push(ArtifactFailure {
          contract: artifact.contract.clone(),
          error: err,
        });
      }
      Err(err) => return Err(err),
    }
  }

  Ok(report)
}

/// Loads one artifact's build-info and writes its filtered input. `Ok(None)` means the write
/// failed and was logged.
fn process_artifact(
  config: &GeneratorConfig,
  imports: &ImportMap,
  artifact: &ContractArtifact,
) -> Result<Option<PathBuf>> {
  tracing::info!("Processing contract {}", artifact.contract);
  let build_info = artifact.load_build_info()?;
  if let Some(version) = build_info.solc_version() {
    tracing::debug!("{} compiled with solc {version}", artifact.contract);
  }

  match write_contract_input(
    &build_info.input,
    imports,
    &artifact.contract,
    &config.output_dir,
    config.match_policy,
  ) {
    Ok(path) => {
      tracing::info!("Wrote {}", path.display());
      Ok(Some(path))
    }
    Err(err) => {
      tracing::error!("Could not write input for {}: {err}", artifact.contract);
      Ok(None)
    }
  }
}
