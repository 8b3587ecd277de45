//! Schema-checked decoding of backend payloads.
//!
//! Payloads either come bare or wrapped in a single-key envelope
//! (`{"internships": [...]}`). Both are accepted; whatever is inside must
//! match the declared schema exactly, and mismatches report the JSON path
//! that failed.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A payload that didn't match the expected schema
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected payload at `{path}`: {message}")]
pub struct SchemaMismatch {
    /// JSON path of the offending value, `.` for the root
    pub path: String,
    /// What serde expected
    pub message: String,
}

/// Decode `bytes` as `T`, unwrapping the `key` envelope if present
pub fn decode_enveloped<T: DeserializeOwned>(bytes: &[u8], key: &str) -> Result<T, SchemaMismatch> {
    let value = parse(bytes)?;

    match value {
        Value::Object(mut map) if map.contains_key(key) => {
            let inner = map.remove(key).unwrap_or(Value::Null);
            decode_value(inner).map_err(|mut err| {
                err.path = match err.path.as_str() {
                    "." => key.to_string(),
                    path if path.starts_with('[') => format!("{key}{path}"),
                    path => format!("{key}.{path}"),
                };
                err
            })
        }
        other => decode_value(other),
    }
}

/// Decode `bytes` as `T`; an empty body decodes as `T::default()`
pub fn decode_or_default<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, SchemaMismatch> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    decode_value(parse(bytes)?)
}

fn parse(bytes: &[u8]) -> Result<Value, SchemaMismatch> {
    serde_json::from_slice(bytes).map_err(|err| SchemaMismatch {
        path: ".".to_string(),
        message: err.to_string(),
    })
}

fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, SchemaMismatch> {
    serde_path_to_error::deserialize(value).map_err(|err| {
        tracing::debug!(path = %err.path(), "Payload failed schema check");
        SchemaMismatch {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        }
    })
}
