use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::errors::{map_io_err, Error, Result};
use super::path::absolute_path;

pub const DEFAULT_SOURCES_DIR: &str = "src";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts/src";
pub const DEFAULT_OUTPUT_DIR: &str = "json";
pub const DEFAULT_SOURCE_EXTENSION: &str = "sol";

/// How contract identifiers and source keys are matched against file names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPolicy {
  /// File names match when they occur anywhere inside the other string. Over-approximates:
  /// `Token.sol` also matches `MyToken.sol`.
  #[default]
  Substring,
  /// File names must equal the last path segment of the other string.
  Exact,
}

impl MatchPolicy {
  /// Whether `name` (a bare file name) identifies `path` under this policy.
  pub fn matches(self, name: &str, path: &str) -> bool {
    match self {
      MatchPolicy::Substring => path.contains(name),
      MatchPolicy::Exact => super::path::file_name(path) == name,
    }
  }
}

impl FromStr for MatchPolicy {
  type Err = Error;

  fn from_str(value: &str) -> Result<Self> {
    match value.trim().to_ascii_lowercase().as_str() {
      "substring" => Ok(MatchPolicy::Substring),
      "exact" => Ok(MatchPolicy::Exact),
      other => Err(Error::config(format!(
        "Unknown match policy `{other}`, expected `substring` or `exact`"
      ))),
    }
  }
}

impl fmt::Display for MatchPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      MatchPolicy::Substring => f.write_str("substring"),
      MatchPolicy::Exact => f.write_str("exact"),
    }
  }
}

/// Resolved settings for one generator run.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
  pub root: PathBuf,
  pub sources_dir: PathBuf,
  pub artifacts_dir: PathBuf,
  pub output_dir: PathBuf,
  pub source_extensions: Vec<String>,
  /// Segment dropped from the artifacts root when resolving build-info references.
  pub reserved_segment: String,
  pub match_policy: MatchPolicy,
  /// Record build-info failures per artifact instead of aborting on the first one.
  pub keep_going: bool,
}

impl GeneratorConfig {
  /// Conventional Hardhat-style layout below `root`.
  pub fn from_root(root: impl AsRef<Path>) -> Result<Self> {
    let root = absolute_path(root.as_ref())?;
    Ok(GeneratorConfig {
      sources_dir: root.join(DEFAULT_SOURCES_DIR),
      artifacts_dir: root.join(DEFAULT_ARTIFACTS_DIR),
      output_dir: root.join(DEFAULT_OUTPUT_DIR),
      source_extensions: vec![DEFAULT_SOURCE_EXTENSION.to_string()],
      reserved_segment: DEFAULT_SOURCES_DIR.to_string(),
      match_policy: MatchPolicy::default(),
      keep_going: false,
      root,
    })
  }

  /// Layout rooted at the process working directory.
  pub fn current() -> Result<Self> {
    let cwd = map_io_err(std::env::current_dir(), ".")?;
    Self::from_root(cwd)
  }

  /// Merge `options` on top of this configuration. A new `root` re-derives every directory the
  /// options leave unset.
  pub fn apply(self, options: GeneratorOptions) -> Result<Self> {
    let mut config = match options.root {
      Some(root) => {
        let mut rebased = Self::from_root(root)?;
        rebased.source_extensions = self.source_extensions;
        rebased.reserved_segment = self.reserved_segment;
        rebased.match_policy = self.match_policy;
        rebased.keep_going = self.keep_going;
        rebased
      }
      None => self,
    };

    if let Some(dir) = options.sources_dir {
      config.sources_dir = config.root.join(dir);
    }
    if let Some(dir) = options.artifacts_dir {
      config.artifacts_dir = config.root.join(dir);
    }
    if let Some(dir) = options.output_dir {
      config.output_dir = config.root.join(dir);
    }
    if let Some(extensions) = options.source_extensions {
      if extensions.is_empty() {
        return Err(Error::config("At least one source extension is required"));
      }
      config.source_extensions = extensions
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_string())
        .collect();
    }
    if let Some(segment) = options.reserved_segment {
      config.reserved_segment = segment;
    }
    if let Some(policy) = options.match_policy {
      config.match_policy = policy;
    }
    if let Some(keep_going) = options.keep_going {
      config.keep_going = keep_going;
    }
    Ok(config)
  }

  pub fn is_source_file(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(|ext| self.source_extensions.iter().any(|known| known == ext))
      .unwrap_or(false)
  }
}

/// Optional overrides merged into a [`GeneratorConfig`]. Relative directories are taken relative
/// to the (possibly overridden) root.
#[derive(Clone, Debug, Default)]
pub struct GeneratorOptions {
  pub root: Option<PathBuf>,
  pub sources_dir: Option<PathBuf>,
  pub artifacts_dir: Option<PathBuf>,
  pub output_dir: Option<PathBuf>,
  pub source_extensions: Option<Vec<String>>,
  pub reserved_segment: Option<String>,
  pub match_policy: Option<MatchPolicy>,
  pub keep_going: Option<bool>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn from_root_uses_conventional_layout() {
    let config = GeneratorConfig::from_root("/project").expect("config");
    assert_eq!(config.sources_dir, PathBuf::from("/project/src"));
    assert_eq!(config.artifacts_dir, PathBuf::from("/project/artifacts/src"));
    assert_eq!(config.output_dir, PathBuf::from("/project/json"));
    assert_eq!(config.reserved_segment, "src");
    assert_eq!(config.match_policy, MatchPolicy::Substring);
    assert!(!config.keep_going);
  }

  #[test]
  fn apply_rebases_unset_directories_on_new_root() {
    let config = GeneratorConfig::from_root("/project")
      .expect("config")
      .apply(GeneratorOptions {
        root: Some(PathBuf::from("/other")),
        output_dir: Some(PathBuf::from("/abs/out")),
        match_policy: Some(MatchPolicy::Exact),
        ..Default::default()
      })
      .expect("apply");

    assert_eq!(config.sources_dir, PathBuf::from("/other/src"));
    assert_eq!(config.artifacts_dir, PathBuf::from("/other/artifacts/src"));
    assert_eq!(config.output_dir, PathBuf::from("/abs/out"));
    assert_eq!(config.match_policy, MatchPolicy::Exact);
  }

  #[test]
  fn apply_rejects_empty_extension_list() {
    let result = GeneratorConfig::from_root("/project").expect("config").apply(GeneratorOptions {
      source_extensions: Some(Vec::new()),
      ..Default::default()
    });
    assert!(matches!(result, Err(Error::Config(_))));
  }

  #[test]
  fn recognises_source_files_by_extension() {
    let config = GeneratorConfig::from_root("/project")
      .expect("config")
      .apply(GeneratorOptions {
        source_extensions: Some(vec![".sol".into(), "vy".into()]),
        ..Default::default()
      })
      .expect("apply");
    assert!(config.is_source_file(Path::new("src/Token.sol")));
    assert!(config.is_source_file(Path::new("src/Vault.vy")));
    assert!(!config.is_source_file(Path::new("src/README.md")));
  }

  #[test]
  fn parses_match_policy() {
    assert_eq!("exact".parse::<MatchPolicy>().unwrap(), MatchPolicy::Exact);
    assert_eq!(" Substring ".parse::<MatchPolicy>().unwrap(), MatchPolicy::Substring);
    assert!("fuzzy".parse::<MatchPolicy>().is_err());
  }

  #[test]
  fn substring_policy_over_approximates() {
    assert!(MatchPolicy::Substring.matches("Token.sol", "src/MyToken.sol"));
    assert!(!MatchPolicy::Exact.matches("Token.sol", "src/MyToken.sol"));
    assert!(MatchPolicy::Exact.matches("Token.sol", "src/tokens/Token.sol"));
  }
}
