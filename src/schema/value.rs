// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed values produced by decoding.
//!
//! ```text
//! Value::None   "no value" (distinct from a missing required field)
//! Value::Str / Int / Float / Bool      scalars
//! Value::Map    structured-map (JSON object)
//! Value::List   ordered-list (JSON array)
//! Value::Record nested-schema instance (TypedMap)
//! ```

use serde::{Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};

use super::mapping::TypedMap;

/// A decoded, typed field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Map(JsonMap<String, JsonValue>),
    List(Vec<JsonValue>),
    Record(TypedMap),
}

impl Value {
    /// Converts an untyped JSON value without applying any declared type.
    #[must_use]
    pub fn from_json(raw: JsonValue) -> Self {
        match raw {
            JsonValue::Null => Self::None,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            JsonValue::String(s) => Self::Str(s),
            JsonValue::Array(items) => Self::List(items),
            JsonValue::Object(map) => Self::Map(map),
        }
    }

    /// Converts back to JSON. Non-finite floats become `null`.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::None => JsonValue::Null,
            Self::Str(s) => JsonValue::String(s.clone()),
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Map(map) => JsonValue::Object(map.clone()),
            Self::List(items) => JsonValue::Array(items.clone()),
            Self::Record(record) => record.to_json(),
        }
    }

    /// Short name of the value's kind, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Str(_) => "str",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Map(_) => "dict",
            Self::List(_) => "list",
            Self::Record(_) => "record",
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&JsonMap<String, JsonValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[JsonValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_record(&self) -> Option<&TypedMap> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Name of a raw JSON value's kind.
pub(crate) const fn json_kind(raw: &JsonValue) -> &'static str {
    match raw {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "str",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "dict",
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => f.write_str(&super::coerce::format_float(*v)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Map(_) | Self::List(_) | Self::Record(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<JsonMap<String, JsonValue>> for Value {
    fn from(map: JsonMap<String, JsonValue>) -> Self {
        Self::Map(map)
    }
}

impl From<Vec<JsonValue>> for Value {
    fn from(items: Vec<JsonValue>) -> Self {
        Self::List(items)
    }
}

impl From<TypedMap> for Value {
    fn from(record: TypedMap) -> Self {
        Self::Record(record)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}
