use crate::errors::AuditError;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// A decoded locale dictionary: the root object of one JSON file.
pub type Dictionary = Map<String, Value>;

pub fn read_dictionary(path: &Path) -> Result<Dictionary, AuditError> {
    let s = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => AuditError::FileNotFound(path.to_path_buf()),
        _ => AuditError::Read { path: path.to_path_buf(), source },
    })?;
    let v: Value = serde_json::from_str(&s)
        .map_err(|source| AuditError::InvalidJson { path: path.to_path_buf(), source })?;
    match v {
        Value::Object(map) => {
            debug!(file = ?path, top_level_keys = map.len(), "Loaded dictionary");
            Ok(map)
        }
        _ => Err(AuditError::NotAnObject(path.to_path_buf())),
    }
}
