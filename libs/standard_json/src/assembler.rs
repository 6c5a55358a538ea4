use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Map;

use crate::internal::config::MatchPolicy;
use crate::internal::errors::Result;
use crate::internal::json::write_json_pretty;
use crate::internal::path::{file_name, file_stem_prefix};
use crate::types::{CompilerInput, FilteredInput, ImportMap};

/// File names a contract needs: every scanned file whose name identifies `contract`, plus the
/// file names of everything those files import.
pub fn relevant_file_names(
  imports: &ImportMap,
  contract: &str,
  policy: MatchPolicy,
) -> BTreeSet<String> {
  let mut relevant = BTreeSet::new();
  for (file, imported) in imports.iter() {
    let name = file_name(file);
    if !policy.matches(name, contract) {
      continue;
    }
    tracing::debug!("{name} matches contract {contract}");
    for import in imported {
      tracing::debug!("{name} imports {}", file_name(import));
      relevant.insert(file_name(import).to_string());
    }
    relevant.insert(name.to_string());
  }
  relevant
}

/// Keeps the entries of `input.sources` whose key is matched by any relevant file name. Source
/// order from the build-info is preserved.
pub fn filter_input(
  input: &CompilerInput,
  imports: &ImportMap,
  contract: &str,
  policy: MatchPolicy,
) -> FilteredInput {
  let relevant = relevant_file_names(imports, contract, policy);
  tracing::debug!(relevant = ?relevant, "Relevant files for {contract}");

  let sources: Map<_, _> = input
    .sources
    .iter()
    .filter(|(key, _)| relevant.iter().any(|name| policy.matches(name, key)))
    .map(|(key, value)| {
      tracing::debug!("Keeping source {key}");
      (key.clone(), value.clone())
    })
    .collect();

  FilteredInput {
    language: input.language.clone(),
    sources,
    settings: input.settings.clone(),
  }
}

/// `<output_dir>/<name>.json`, where `<name>` is the contract directory's last segment up to its
/// first dot (`artifacts/src/Token.sol` -> `Token`).
pub fn output_path(output_dir: &Path, contract: &str) -> PathBuf {
  let name = file_stem_prefix(file_name(contract));
  output_dir.join(format!("{name}.json"))
}

/// Filters `input` for `contract` and writes the result, returning where it went.
pub fn write_contract_input(
  input: &CompilerInput,
  imports: &ImportMap,
  contract: &str,
  output_dir: &Path,
  policy: MatchPolicy,
) -> Result<PathBuf> {
  let filtered = filter_input(input, imports, contract, policy);
  let path = output_path(output_dir, contract);
  tracing::debug!("Writing {}", path.display());
  write_json_pretty(&filtered, &path)?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::{json, Value};

  fn sample_input() -> CompilerInput {
    serde_json::from_value(json!({
      "language": "Solidity",
      "sources": {
        "A.sol": { "content": "import \"Lib.sol\"; contract A {}" },
        "Lib.sol": { "content": "library Lib {}" },
        "Other.sol": { "content": "contract Other {}" }
      },
      "settings": { "optimizer": { "enabled": true, "runs": 200 } }
    }))
    .expect("decode input")
  }

  fn sample_imports() -> ImportMap {
    [
      ("/project/src/A.sol".to_string(), vec!["Lib.sol".to_string()]),
      ("/project/src/Lib.sol".to_string(), Vec::new()),
      ("/project/src/Other.sol".to_string(), Vec::new()),
    ]
    .into_iter()
    .collect()
  }

  fn source_keys(filtered: &FilteredInput) -> Vec<&str> {
    filtered.sources.keys().map(String::as_str).collect()
  }

  #[test]
  fn keeps_contract_and_its_imports() {
    let filtered = filter_input(
      &sample_input(),
      &sample_imports(),
      "/project/artifacts/src/A.sol",
      MatchPolicy::Substring,
    );
    assert_eq!(source_keys(&filtered), vec!["A.sol", "Lib.sol"]);
    assert_eq!(filtered.language, "Solidity");
    assert_eq!(filtered.settings, json!({ "optimizer": { "enabled": true, "runs": 200 } }));
  }

  #[test]
  fn relevant_names_use_import_file_names() {
    let imports: ImportMap = [(
      "/project/src/Vault.sol".to_string(),
      vec![
        "@openzeppelin/contracts/token/ERC20/IERC20.sol".to_string(),
        "./lib/Math.sol".to_string(),
      ],
    )]
    .into_iter()
    .collect();

    let relevant =
      relevant_file_names(&imports, "/project/artifacts/src/Vault.sol", MatchPolicy::Substring);
    let expected: BTreeSet<String> = ["IERC20.sol", "Math.sol", "Vault.sol"]
      .into_iter()
      .map(String::from)
      .collect();
    assert_eq!(relevant, expected);
  }

  #[test]
  fn substring_policy_pulls_in_similar_names() {
    let input: CompilerInput = serde_json::from_value(json!({
      "language": "Solidity",
      "sources": {
        "src/Token.sol": { "content": "" },
        "src/MyToken.sol": { "content": "" },
        "src/Vault.sol": { "content": "" }
      },
      "settings": {}
    }))
    .expect("decode");
    let imports: ImportMap = [("/p/src/Token.sol".to_string(), Vec::new())]
      .into_iter()
      .collect();

    let loose = filter_input(&input, &imports, "/p/artifacts/src/Token.sol", MatchPolicy::Substring);
    assert_eq!(source_keys(&loose), vec!["src/Token.sol", "src/MyToken.sol"]);

    let strict = filter_input(&input, &imports, "/p/artifacts/src/Token.sol", MatchPolicy::Exact);
    assert_eq!(source_keys(&strict), vec!["src/Token.sol"]);
  }

  #[test]
  fn unknown_contract_keeps_no_sources() {
    let filtered = filter_input(
      &sample_input(),
      &sample_imports(),
      "/project/artifacts/src/Missing.sol",
      MatchPolicy::Substring,
    );
    assert!(filtered.sources.is_empty());
  }

  #[test]
  fn output_path_uses_name_before_first_dot() {
    let path = output_path(Path::new("/project/json"), "/project/artifacts/src/Token.sol");
    assert_eq!(path, PathBuf::from("/project/json/Token.json"));
  }

  #[test]
  fn writes_filtered_input_to_disk() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_contract_input(
      &sample_input(),
      &sample_imports(),
      "/project/artifacts/src/A.sol",
      temp.path(),
      MatchPolicy::Substring,
    )
    .expect("write");

    assert_eq!(path, temp.path().join("A.json"));
    let written: Value =
      serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("decode");
    let keys: Vec<&str> = written
      .as_object()
      .expect("object")
      .keys()
      .map(String::as_str)
      .collect();
    assert_eq!(keys, vec!["language", "sources", "settings"]);
    assert!(written["sources"].get("Other.sol").is_none());
  }
}
