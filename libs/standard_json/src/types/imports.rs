use std::collections::BTreeMap;

/// Import paths declared by each scanned source file, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportMap {
  entries: BTreeMap<String, Vec<String>>,
}

impl ImportMap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, file: impl Into<String>, imports: Vec<String>) {
    self.entries.insert(file.into(), imports);
  }

  pub fn get(&self, file: &str) -> Option<&[String]> {
    self.entries.get(file).map(Vec::as_slice)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self
      .entries
      .iter()
      .map(|(file, imports)| (file.as_str(), imports.as_slice()))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl FromIterator<(String, Vec<String>)> for ImportMap {
  fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
    ImportMap {
      entries: iter.into_iter().collect(),
    }
  }
}
