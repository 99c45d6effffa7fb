//! Typed key/value fields and the flattening that turns them into a document
//!
//! This module provides:
//! - `Field` / `FieldValue`: one typed key/value pair as produced at a call site
//! - `ObjectEncoder` / `EncodeObject`: how custom types add themselves to a document
//! - `fields_to_map`: the pure flattening function used by the write path

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Value type for structured logging fields
///
/// Nested values stay structured all the way to the wire; nothing is
/// stringified. `Error` serializes as its message string but remains
/// distinguishable for [`extract_error`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Error(String),
    Array(Vec<FieldValue>),
    Object(HashMap<String, FieldValue>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Error(e) => write!(f, "{}", e),
            FieldValue::Array(items) => {
                let rendered: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            FieldValue::Object(fields) => {
                let rendered: Vec<String> =
                    fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{{{}}}", rendered.join(" "))
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::Uint(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::Uint(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        // Durations ride the wire as integer nanoseconds
        FieldValue::Int(d.as_nanos() as i64)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::Array(items)
    }
}

impl From<HashMap<String, FieldValue>> for FieldValue {
    fn from(fields: HashMap<String, FieldValue>) -> Self {
        FieldValue::Object(fields)
    }
}

/// Accumulating object encoder that fields add themselves to.
///
/// Later additions under the same key overwrite earlier ones.
#[derive(Debug, Default)]
pub struct ObjectEncoder {
    fields: HashMap<String, FieldValue>,
}

impl ObjectEncoder {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a key/value pair to the object under construction
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Consume the encoder, yielding the accumulated mapping
    pub fn into_fields(self) -> HashMap<String, FieldValue> {
        self.fields
    }
}

/// Capability for custom types to encode themselves as a nested object
pub trait EncodeObject {
    fn encode(&self, enc: &mut ObjectEncoder);
}

/// One typed key/value pair attached to a log call
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldValue::String(value.into()))
    }

    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldValue::Int(value))
    }

    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, FieldValue::Uint(value))
    }

    pub fn float(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldValue::Float(value))
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldValue::Bool(value))
    }

    pub fn null(key: impl Into<String>) -> Self {
        Self::new(key, FieldValue::Null)
    }

    /// Capture an error's message as an error-typed field
    pub fn error(key: impl Into<String>, err: &dyn std::error::Error) -> Self {
        Self::new(key, FieldValue::Error(err.to_string()))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldValue::from(value))
    }

    /// Nest a custom type via its [`EncodeObject`] capability
    pub fn object<T: EncodeObject>(key: impl Into<String>, value: &T) -> Self {
        let mut enc = ObjectEncoder::new();
        value.encode(&mut enc);
        Self::new(key, FieldValue::Object(enc.into_fields()))
    }

    /// Add this field to an accumulating encoder
    pub fn add_to(&self, enc: &mut ObjectEncoder) {
        enc.add(self.key.clone(), self.value.clone());
    }
}

/// Flatten an ordered field sequence into a key/value mapping.
///
/// Each field is added to a fresh [`ObjectEncoder`] in order; later fields
/// with a duplicate key overwrite earlier ones.
pub fn fields_to_map(fields: &[Field]) -> HashMap<String, FieldValue> {
    let mut enc = ObjectEncoder::new();
    for field in fields {
        field.add_to(&mut enc);
    }
    enc.into_fields()
}

/// Return the message of the last error-typed field, if any
pub fn extract_error(fields: &[Field]) -> Option<&str> {
    fields.iter().rev().find_map(|f| match &f.value {
        FieldValue::Error(message) => Some(message.as_str()),
        _ => None,
    })
}
