//! Structured key-value fields and the handler that merges them
//!
//! This module provides:
//! - `FieldValue`: a scalar, list or nested map field value
//! - `Fields`: the key-value set attached to a record
//! - `FieldsHandler`: context extraction and right-biased merging

use super::log_context::LogContext;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

/// Field key used for the message of an error passed to the `*_err` methods.
pub const ERROR_FIELD: &str = "error";

/// Field key under which the context's correlation id is attached.
pub const TRACE_ID_FIELD: &str = "trace_id";

/// Value type for structured logging fields
///
/// Lists and nested maps serialize as JSON arrays and objects, and display
/// as their compact JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
    Array(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Text used by the line providers: strings are quoted and escaped,
    /// everything else prints as its natural representation.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            FieldValue::String(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Array(_) | FieldValue::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
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
        FieldValue::UInt(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
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

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<FieldValue>> From<BTreeMap<K, V>> for FieldValue {
    fn from(map: BTreeMap<K, V>) -> Self {
        FieldValue::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else {
                    n.as_f64().map_or(FieldValue::Null, FieldValue::Float)
                }
            }
            Value::String(s) => FieldValue::String(s),
            Value::Array(values) => values.into_iter().collect::<Vec<_>>().into(),
            Value::Object(map) => {
                FieldValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Key-value metadata attached to a log record.
///
/// Semantically unordered; keys are kept sorted so serialized output is
/// reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    fields: BTreeMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field, replacing any previous value under the same key
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, FieldValue> {
        self.fields.iter()
    }

    /// Copy every entry of `other` into `self`, `other` winning on collision
    pub fn extend_from(&mut self, other: &Fields) {
        for (key, value) in other.iter() {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Format fields as space separated `key=value` pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v.render()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

/// Extracts context-derived fields and merges field sets.
///
/// Implementations must never mutate their inputs.
pub trait FieldsHandler: Send + Sync {
    /// Fold context metadata into `fields`.
    ///
    /// With no context the fields come back unchanged. Otherwise the result
    /// holds every entry of `fields` plus `trace_id` when the context carries
    /// one; the context value replaces an explicit `trace_id` field.
    fn extract(&self, ctx: Option<&LogContext>, fields: &Fields) -> Fields;

    /// Entries of `base` with `overlay` applied on top.
    fn merge(&self, base: &Fields, overlay: &Fields) -> Fields;
}

/// The stock [`FieldsHandler`]: pulls the trace id out of the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFieldsHandler;

impl DefaultFieldsHandler {
    pub fn new() -> Self {
        Self
    }
}

impl FieldsHandler for DefaultFieldsHandler {
    fn extract(&self, ctx: Option<&LogContext>, fields: &Fields) -> Fields {
        let Some(ctx) = ctx else {
            return fields.clone();
        };

        let mut result = fields.clone();
        if let Some(trace_id) = ctx.trace_id() {
            result.insert(TRACE_ID_FIELD, trace_id);
        }
        result
    }

    fn merge(&self, base: &Fields, overlay: &Fields) -> Fields {
        let mut result = base.clone();
        result.extend_from(overlay);
        result
    }
}
