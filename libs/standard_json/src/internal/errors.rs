use std::path::{Path, PathBuf};

use thiserror::Error;

/// Canonical error type used by the library surface.
#[derive(Debug, Error)]
pub enum Error {
  #[error("I/O error at {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    source: std::io::Error,
  },

  #[error("Failed to decode JSON from {}: {source}", .path.display())]
  Json {
    path: PathBuf,
    source: serde_json::Error,
  },

  #[error("Invalid configuration: {0}")]
  Config(String),

  /// A positively identified artifact whose build-info could not be loaded.
  #[error("Failed to load build-info {} for contract {contract}: {source}", .path.display())]
  BuildInfo {
    contract: String,
    path: PathBuf,
    #[source]
    source: Box<Error>,
  },
}

impl Error {
  pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
    Self::Io {
      path: path.as_ref().to_path_buf(),
      source,
    }
  }

  pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
    Self::Json {
      path: path.as_ref().to_path_buf(),
      source,
    }
  }

  pub fn config(message: impl Into<String>) -> Self {
    Self::Config(message.into())
  }

  pub fn build_info(contract: impl Into<String>, path: impl AsRef<Path>, source: Error) -> Self {
    Self::BuildInfo {
      contract: contract.into(),
      path: path.as_ref().to_path_buf(),
      source: Box::new(source),
    }
  }
}

/// Result alias bound to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Annotate an I/O failure from `result` with the path it touched.
pub fn map_io_err<T>(result: std::io::Result<T>, path: impl AsRef<Path>) -> Result<T> {
  result.map_err(|err| Error::io(path, err))
}
