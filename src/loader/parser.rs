//! JSON parser for data files

use super::types::RawRecord;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load records from a JSON data file
///
/// Any read or parse failure is an [`Error::File`].
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let content = read_data(path)?;
    parse_data(path, &content)
}

/// Read a data file into memory
pub fn read_data(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::file(path.display().to_string(), e.to_string()))?;
    debug!("Read {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Parse the contents of a data file, attributing errors to `path`
pub fn parse_data(path: impl AsRef<Path>, content: &str) -> Result<Vec<RawRecord>> {
    parse_records(content).map_err(|e| match e {
        Error::File { message, .. } => Error::file(path.as_ref().display().to_string(), message),
        other => other,
    })
}

/// Parse records from a JSON document
///
/// Accepts an array of objects or a single object.
pub fn parse_records(content: &str) -> Result<Vec<RawRecord>> {
    let document: JsonValue = serde_json::from_str(content)
        .map_err(|e| Error::file("<input>", format!("invalid JSON: {e}")))?;

    match document {
        JsonValue::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                JsonValue::Object(fields) => Ok(RawRecord::new(fields)),
                other => Err(Error::file(
                    "<input>",
                    format!(
                        "record {} is {}, expected an object",
                        index + 1,
                        crate::types::json_kind(&other)
                    ),
                )),
            })
            .collect(),
        JsonValue::Object(fields) => Ok(vec![RawRecord::new(fields)]),
        other => Err(Error::file(
            "<input>",
            format!(
                "expected an object or an array of objects, found {}",
                crate::types::json_kind(&other)
            ),
        )),
    }
}
