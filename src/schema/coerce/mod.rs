// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Type coercion between raw and typed values.
//!
//! ```text
//!            decode(tag, raw, strict)
//! raw JSON  ------------------------->  Value
//! (text from patterns / environment,   |
//!  any JSON from mappings)             | encode(tag, value)
//!                                      v
//!                                 raw text (None = absent)
//!
//! strict:  failure -> CoerceError
//! lenient: failure -> raw value passed through untouched
//! ```

use std::io;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use serde_json::ser::Formatter;
use tracing::trace;

use super::mapping::MappingSchema;
use super::types::TypeTag;
use super::value::{Value, json_kind};
use crate::error::CoerceError;

/// Words accepted as `true` by boolean fields (case-insensitive).
const TRUE_WORDS: &[&str] = &["true", "yes", "on", "1", "t", "y"];
/// Words accepted as `false` by boolean fields (case-insensitive).
const FALSE_WORDS: &[&str] = &["false", "no", "off", "0", "f", "n"];

/// Decodes a raw value into the declared type.
///
/// `null` always decodes to [`Value::None`].
///
/// # Errors
///
/// In strict mode, returns [`CoerceError`] when `raw` cannot become `tag`.
/// Lenient mode never fails; the raw value is returned untouched instead.
pub fn decode(tag: &TypeTag, raw: &JsonValue, strict: bool) -> Result<Value, CoerceError> {
    if raw.is_null() {
        return Ok(Value::None);
    }

    let decoded = match tag {
        TypeTag::Str => decode_str(raw, strict),
        TypeTag::Int => decode_int(raw),
        TypeTag::Float => decode_float(raw),
        TypeTag::Bool => decode_bool(raw),
        TypeTag::Map => decode_container(tag, raw, JsonValue::is_object),
        TypeTag::List => decode_container(tag, raw, JsonValue::is_array),
        TypeTag::Nested(schema) => decode_nested(tag, schema, raw),
    };

    match decoded {
        Ok(value) => Ok(value),
        Err(e) if strict => Err(e),
        Err(e) => {
            trace!(tag = %tag, error = %e, "lenient coercion kept raw value");
            Ok(Value::from_json(raw.clone()))
        }
    }
}

/// Decodes text captured from a string substrate.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_text(tag: &TypeTag, text: &str, strict: bool) -> Result<Value, CoerceError> {
    decode(tag, &JsonValue::String(text.to_owned()), strict)
}

/// Coerces an already-typed value. Values whose kind matches `tag` pass
/// through unchanged, so decoding is idempotent.
///
/// # Errors
///
/// See [`decode`].
pub fn coerce_value(tag: &TypeTag, value: Value, strict: bool) -> Result<Value, CoerceError> {
    if conforms(tag, &value) {
        return Ok(value);
    }
    decode(tag, &value.to_json(), strict)
}

/// Returns `true` when `value` is already of the declared type (or absent).
#[must_use]
pub fn conforms(tag: &TypeTag, value: &Value) -> bool {
    match (tag, value) {
        (_, Value::None)
        | (TypeTag::Str, Value::Str(_))
        | (TypeTag::Int, Value::Int(_))
        | (TypeTag::Float, Value::Float(_))
        | (TypeTag::Bool, Value::Bool(_))
        | (TypeTag::Map, Value::Map(_))
        | (TypeTag::List, Value::List(_)) => true,
        (TypeTag::Nested(schema), Value::Record(record)) => {
            Arc::ptr_eq(schema, record.schema())
        }
        _ => false,
    }
}

/// Encodes a typed value to the raw text stored in string substrates.
///
/// Returns `None` for [`Value::None`], meaning "no raw entry".
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn encode(tag: &TypeTag, value: &Value) -> Option<String> {
    match (tag, value) {
        (_, Value::None) => None,
        (TypeTag::Float, Value::Int(i)) => Some(format_float(*i as f64)),
        (TypeTag::Int, Value::Float(f)) if f.fract() == 0.0 && f.is_finite() => {
            Some(format!("{}", *f as i64))
        }
        (_, Value::Str(s)) => Some(s.clone()),
        (_, Value::Map(_) | Value::List(_) | Value::Record(_)) => {
            Some(to_json_text(&value.to_json()))
        }
        (_, other) => Some(other.to_string()),
    }
}

/// Serializes JSON on one line with `", "` between items and `": "` after keys.
#[must_use]
pub fn to_json_text(value: &JsonValue) -> String {
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), SpacedFormatter);
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(serializer.into_inner()).unwrap_or_else(|_| value.to_string())
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Formats a float so that it reads back as a float: integral values keep a
/// trailing `.0`, everything else uses the shortest round-trip form.
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn decode_str(raw: &JsonValue, strict: bool) -> Result<Value, CoerceError> {
    match raw {
        JsonValue::String(s) => Ok(Value::Str(s.clone())),
        JsonValue::Number(n) if !strict => Ok(Value::Str(n.to_string())),
        JsonValue::Bool(b) if !strict => Ok(Value::Str(b.to_string())),
        other => Err(mismatch(&TypeTag::Str, other)),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn decode_int(raw: &JsonValue) -> Result<Value, CoerceError> {
    match raw {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Value::Int(i));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(Value::Int(f as i64)),
                _ => Err(invalid(&TypeTag::Int, &n.to_string())),
            }
        }
        JsonValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid(&TypeTag::Int, s)),
        other => Err(mismatch(&TypeTag::Int, other)),
    }
}

fn decode_float(raw: &JsonValue) -> Result<Value, CoerceError> {
    match raw {
        JsonValue::Number(n) => n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| invalid(&TypeTag::Float, &n.to_string())),
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(&TypeTag::Float, s)),
        other => Err(mismatch(&TypeTag::Float, other)),
    }
}

fn decode_bool(raw: &JsonValue) -> Result<Value, CoerceError> {
    match raw {
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(1) => Ok(Value::Bool(true)),
            Some(0) => Ok(Value::Bool(false)),
            _ => Err(invalid(&TypeTag::Bool, &n.to_string())),
        },
        JsonValue::String(s) => {
            let word = s.trim().to_ascii_lowercase();
            if TRUE_WORDS.contains(&word.as_str()) {
                Ok(Value::Bool(true))
            } else if FALSE_WORDS.contains(&word.as_str()) {
                Ok(Value::Bool(false))
            } else {
                Err(invalid(&TypeTag::Bool, s))
            }
        }
        other => Err(mismatch(&TypeTag::Bool, other)),
    }
}

fn decode_nested(
    tag: &TypeTag,
    schema: &Arc<MappingSchema>,
    raw: &JsonValue,
) -> Result<Value, CoerceError> {
    match parse_embedded(tag, raw, JsonValue::is_object)? {
        JsonValue::Object(map) => schema
            .build(map)
            .map(Value::Record)
            .map_err(|e| CoerceError::Nested(Box::new(e))),
        other => Err(mismatch(tag, &other)),
    }
}

fn decode_container(
    tag: &TypeTag,
    raw: &JsonValue,
    accepts: fn(&JsonValue) -> bool,
) -> Result<Value, CoerceError> {
    match parse_embedded(tag, raw, accepts)? {
        JsonValue::Object(map) => Ok(Value::Map(map)),
        JsonValue::Array(items) => Ok(Value::List(items)),
        other => Err(mismatch(tag, &other)),
    }
}

/// Accepts a native container, or JSON text holding one.
fn parse_embedded(
    tag: &TypeTag,
    raw: &JsonValue,
    accepts: fn(&JsonValue) -> bool,
) -> Result<JsonValue, CoerceError> {
    if accepts(raw) {
        return Ok(raw.clone());
    }
    let JsonValue::String(text) = raw else {
        return Err(mismatch(tag, raw));
    };
    match serde_json::from_str::<JsonValue>(text) {
        Ok(parsed) if accepts(&parsed) => Ok(parsed),
        _ => Err(invalid(tag, text)),
    }
}

fn invalid(tag: &TypeTag, raw: &str) -> CoerceError {
    CoerceError::Invalid {
        expected: tag.name(),
        raw: raw.to_owned(),
    }
}

fn mismatch(tag: &TypeTag, raw: &JsonValue) -> CoerceError {
    CoerceError::TypeMismatch {
        expected: tag.name(),
        found: json_kind(raw),
    }
}

#[cfg(test)]
mod tests;
