//! FieldInput value type.

use serde_json::Value;

/// A raw field as it arrived over the wire.
///
/// Callers may send any JSON value for a field. Only strings are treated as
/// text; everything else is `Other`, which every validator handles as invalid
/// and the sanitizer turns into an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Other,
}

impl FieldInput {
    /// Get the text, if this is a text input.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Other => None,
        }
    }

    /// Convert a JSON value. `null` is reported as missing (`None`).
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::Text(s)),
            _ => Some(Self::Other),
        }
    }
}

impl From<&str> for FieldInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
