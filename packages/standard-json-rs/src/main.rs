use std::path::PathBuf;

use clap::Parser;
use standard_json::{GeneratorConfig, GeneratorOptions, MatchPolicy};
use tracing_subscriber::EnvFilter;

/// Rebuild a standard JSON input per compiled contract from Hardhat build-info files.
///
/// With no arguments the current directory is the project root: sources are read from `src/`,
/// artifacts from `artifacts/src/` and results are written to `json/`.
#[derive(Debug, Parser)]
#[command(name = "standard-json", version, about)]
struct Cli {
  /// Project root the default directories are resolved against.
  #[arg(long)]
  root: Option<PathBuf>,

  /// Solidity sources to scan for imports.
  #[arg(long)]
  sources: Option<PathBuf>,

  /// Compiled artifacts to search for build-info references.
  #[arg(long)]
  artifacts: Option<PathBuf>,

  /// Directory the per-contract JSON files are written to.
  #[arg(long)]
  out: Option<PathBuf>,

  /// How file names are matched: `substring` or `exact`.
  #[arg(long = "match", value_parser = parse_match_policy)]
  match_policy: Option<MatchPolicy>,

  /// Record build-info failures and continue with the remaining contracts.
  #[arg(long)]
  keep_going: bool,

  /// Log every scanned file and selected source.
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn options(&self) -> GeneratorOptions {
    GeneratorOptions {
      root: self.root.clone(),
      sources_dir: self.sources.clone(),
      artifacts_dir: self.artifacts.clone(),
      output_dir: self.out.clone(),
      match_policy: self.match_policy,
      keep_going: self.keep_going.then_some(true),
      ..GeneratorOptions::default()
    }
  }
}

fn parse_match_policy(value: &str) -> Result<MatchPolicy, String> {
  value.parse().map_err(|err: standard_json::Error| err.to_string())
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
    )
    .init();

  let config = GeneratorConfig::current()?.apply(cli.options())?;
  let report = standard_json::run(&config)?;
  tracing::info!("{}", report.summary());
  if !report.failures.is_empty() {
    for failure in &report.failures {
      tracing::error!("{}: {}", failure.contract, failure.error);
    }
    anyhow::bail!("{} contract(s) could not be processed", report.failures.len());
  }
  Ok(())
}
