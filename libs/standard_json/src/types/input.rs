use semver::Version;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `buildInfo` pointer carried by a per-contract `*.dbg.json` artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildInfoReference {
  pub build_info: String,
}

impl BuildInfoReference {
  /// Only a top-level object with a string `buildInfo` field is a reference.
  pub fn from_value(value: &Value) -> Option<Self> {
    let build_info = value.as_object()?.get("buildInfo")?.as_str()?;
    Some(BuildInfoReference {
      build_info: build_info.to_string(),
    })
  }
}

/// Compiler invocation recorded in a build-info file. Only the fields needed to rebuild the
/// standard JSON input are decoded; everything else is ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
  #[serde(default)]
  pub solc_version: Option<String>,
  pub input: CompilerInput,
}

impl BuildInfo {
  /// The recorded compiler version, when present and valid semver.
  pub fn solc_version(&self) -> Option<Version> {
    let raw = self.solc_version.as_deref()?;
    Version::parse(raw.trim().trim_start_matches('v')).ok()
  }
}

/// Standard JSON input exactly as the compiler received it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompilerInput {
  pub language: String,
  pub sources: Map<String, Value>,
  pub settings: Value,
}

/// Standard JSON input reduced to the sources one contract needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilteredInput {
  pub language: String,
  pub sources: Map<String, Value>,
  pub settings: Value,
}
