use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::nest::pricing::error::Result;

/// Writes `value` as pretty-printed UTF-8 JSON, replacing any existing file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json_string = serde_json::to_string_pretty(value)?;
    fs::write(path, json_string)?;
    Ok(())
}

/// Reads a JSON document previously produced by [`write_json`].
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}
