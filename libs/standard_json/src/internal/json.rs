use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::errors::{map_io_err, Error, Result};

const INDENT: &[u8] = b"    ";

/// Creates `path` and any missing parents. Succeeds when the directory already exists.
pub fn create_directory(path: &Path) -> Result<()> {
  map_io_err(fs::create_dir_all(path), path)
}

/// Reads `path` as UTF-8 and decodes it into `T`.
pub fn load_json<T>(path: &Path) -> Result<T>
where
  T: DeserializeOwned,
{
  let contents = map_io_err(fs::read_to_string(path), path)?;
  serde_json::from_str(&contents).map_err(|err| Error::json(path, err))
}

/// Writes `value` to `path` as 4-space indented JSON, replacing whatever was there.
pub fn write_json_pretty<T>(value: &T, path: &Path) -> Result<()>
where
  T: Serialize + ?Sized,
{
  let file = map_io_err(fs::File::create(path), path)?;
  let mut writer = BufWriter::new(file);
  let mut serializer = Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
  value
    .serialize(&mut serializer)
    .map_err(|err| Error::json(path, err))?;
  map_io_err(writer.flush(), path)
}
