//! Invocation input parsing.
//!
//! Agents accept the same loosely-typed record in two shapes:
//!
//! - flat: `{"sockId": "...", "color": "...", "size": "..."}` (direct invocation)
//! - enveloped: `{"detail": {"sockId": ...}}` (event-bus delivery)
//!
//! Nothing is validated. Missing or null fields read as `"unknown"`; numbers
//! and booleans are rendered as their JSON text.

use crate::error::{Result, SockError};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// Placeholder used for every missing input field.
pub const UNKNOWN: &str = "unknown";

/// The sock under review plus the raw record it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SockInput {
    pub sock_id: String,
    pub color: String,
    pub size: String,
    detail: Value,
}

impl SockInput {
    /// Build an input directly from the three core fields.
    pub fn new(sock_id: impl Into<String>, color: impl Into<String>, size: impl Into<String>) -> Self {
        let sock_id = sock_id.into();
        let color = color.into();
        let size = size.into();

        let mut detail = Map::new();
        detail.insert("sockId".to_string(), Value::String(sock_id.clone()));
        detail.insert("color".to_string(), Value::String(color.clone()));
        detail.insert("size".to_string(), Value::String(size.clone()));

        Self {
            sock_id,
            color,
            size,
            detail: Value::Object(detail),
        }
    }

    /// Interpret an arbitrary JSON value as an invocation record.
    pub fn from_value(value: Value) -> Self {
        let detail = match value {
            Value::Object(mut map) => match map.remove("detail") {
                Some(Value::Object(inner)) => Value::Object(inner),
                Some(other) => {
                    // Not an envelope after all; keep the field where it was.
                    map.insert("detail".to_string(), other);
                    Value::Object(map)
                }
                None => Value::Object(map),
            },
            _ => Value::Object(Map::new()),
        };

        Self {
            sock_id: text_field(&detail, "sockId"),
            color: text_field(&detail, "color"),
            size: text_field(&detail, "size"),
            detail,
        }
    }

    /// Parse an invocation record from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| SockError::UserError(format!("invocation input is not valid JSON: {}", e)))?;
        Ok(Self::from_value(value))
    }

    /// Read an invocation record from a file, or from stdin when `path` is `-`.
    pub fn read_from(path: &Path) -> Result<Self> {
        let content = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| SockError::IoError(format!("failed to read input from stdin: {}", e)))?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(|e| {
                SockError::UserError(format!(
                    "failed to read input file '{}': {}",
                    path.display(),
                    e
                ))
            })?
        };

        Self::from_json_str(&content)
    }

    /// Replace core fields with explicitly supplied values.
    pub fn with_overrides(
        mut self,
        sock_id: Option<String>,
        color: Option<String>,
        size: Option<String>,
    ) -> Self {
        if let Some(value) = sock_id {
            self.sock_id = value.clone();
            self.set_detail("sockId", value);
        }
        if let Some(value) = color {
            self.color = value.clone();
            self.set_detail("color", value);
        }
        if let Some(value) = size {
            self.size = value.clone();
            self.set_detail("size", value);
        }
        self
    }

    fn set_detail(&mut self, key: &str, value: String) {
        if let Value::Object(map) = &mut self.detail {
            map.insert(key.to_string(), Value::String(value));
        }
    }

    /// The unwrapped record (the `detail` object when one was supplied).
    pub fn detail(&self) -> &Value {
        &self.detail
    }

    /// Look up an extra field of the record.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.detail.get(key).filter(|v| !v.is_null())
    }
}

/// Read a field as display text, defaulting to [`UNKNOWN`].
fn text_field(detail: &Value, key: &str) -> String {
    match detail.get(key) {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
