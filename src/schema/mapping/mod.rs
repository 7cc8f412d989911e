// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mapping schemas: typed views over key-value objects.
//!
//! ```text
//! input {k: json}
//!   declared key   -> coerce::decode(tag, raw, strict)
//!   other key      -> kept as-is
//!   missing field  -> initialize_with_none ? default | None : absent
//!   required field missing -> MissingRequired (all names)
//!
//! nested field (schema:<name>) -> MappingSchema::build on the sub-object
//! ```
//!
//! Attributes are constants attached to the schema itself. An input key with
//! the same name is stored as a plain entry and never replaces the attribute.


use std::collections::BTreeMap;
use std::sync::Arc;

use bon::Builder;
use serde::{Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{ErrorClass, MappingError, SchemaError};
use crate::schema::types::{FieldSpec, SchemaOptions};
use crate::schema::value::{Value, json_kind};
use crate::schema::{SchemaDescriptor, coerce, compile_with_reserved};

/// Names a typed mapping owns; fields may not shadow them.
pub const RESERVED_NAMES: &[&str] = &[
    "clear", "copy", "delete", "entry", "get", "insert", "items", "iter", "keys", "len", "pop",
    "remove", "set", "update", "values",
];

/// Options for [`MappingSchema::compile`].
#[derive(Debug, Clone, Builder)]
pub struct MappingOptions {
    #[builder(into, setters(name = with_name), default = String::from("mapping"))]
    name: String,
    #[builder(setters(name = with_strict), default = false)]
    strict: bool,
    #[builder(setters(name = with_initialize_with_none), default = true)]
    initialize_with_none: bool,
    #[builder(setters(name = with_attributes), default)]
    attributes: BTreeMap<String, Value>,
    #[builder(setters(name = with_reserved), default)]
    reserved: Vec<String>,
}

impl Default for MappingOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Schema applied to key-value objects.
#[derive(Debug)]
pub struct MappingSchema {
    descriptor: SchemaDescriptor,
    initialize_with_none: bool,
    attributes: BTreeMap<String, Value>,
}

impl MappingSchema {
    /// Compiles a mapping schema.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when the fields are invalid or an attribute
    /// shares a name with a declared field.
    pub fn compile(
        fields: impl IntoIterator<Item = FieldSpec>,
        options: MappingOptions,
    ) -> Result<Arc<Self>, SchemaError> {
        let schema_options = SchemaOptions::builder()
            .with_name(options.name)
            .with_strict(options.strict)
            .with_reserved(options.reserved)
            .build();
        let descriptor = compile_with_reserved(
            fields,
            &schema_options,
            RESERVED_NAMES,
            ErrorClass::Attribute,
        )?;

        if let Some(name) = options
            .attributes
            .keys()
            .find(|name| descriptor.field(name).is_some())
        {
            return Err(SchemaError::DuplicateField { name: name.clone() });
        }

        Ok(Arc::new(Self {
            descriptor,
            initialize_with_none: options.initialize_with_none,
            attributes: options.attributes,
        }))
    }

    #[must_use]
    pub const fn descriptor(&self) -> &SchemaDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub const fn initialize_with_none(&self) -> bool {
        self.initialize_with_none
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Builds a typed mapping from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Field`] when a strict schema cannot coerce a
    /// declared key, and [`MappingError::MissingRequired`] listing every
    /// required field absent from `input`.
    pub fn build(self: &Arc<Self>, input: JsonMap<String, JsonValue>) -> Result<TypedMap, MappingError> {
        let strict = self.descriptor.is_strict();
        let mut entries = BTreeMap::new();

        for (key, raw) in input {
            let value = match self.descriptor.field(&key) {
                Some(field) => coerce::decode(field.tag(), &raw, strict).map_err(|source| {
                    MappingError::Field {
                        field: key.clone(),
                        source,
                    }
                })?,
                None => Value::from_json(raw),
            };
            entries.insert(key, value);
        }

        let missing: Vec<String> = self
            .descriptor
            .fields()
            .iter()
            .filter(|f| f.is_required() && !entries.contains_key(f.name()))
            .map(|f| f.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(MappingError::MissingRequired { names: missing });
        }

        if self.initialize_with_none {
            for field in self.descriptor.fields() {
                entries
                    .entry(field.name().to_string())
                    .or_insert_with(|| field.default_value());
            }
        }

        Ok(TypedMap {
            schema: Arc::clone(self),
            entries,
        })
    }

    /// Builds a typed mapping from any JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::NotAnObject`] for non-objects, otherwise see
    /// [`MappingSchema::build`].
    pub fn build_json(self: &Arc<Self>, input: JsonValue) -> Result<TypedMap, MappingError> {
        match input {
            JsonValue::Object(map) => self.build(map),
            other => Err(MappingError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }
}

/// A key-value object whose declared keys hold typed values.
#[derive(Debug, Clone)]
pub struct TypedMap {
    schema: Arc<MappingSchema>,
    entries: BTreeMap<String, Value>,
}

impl PartialEq for TypedMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl TypedMap {
    #[must_use]
    pub const fn schema(&self) -> &Arc<MappingSchema> {
        &self.schema
    }

    /// Reads a declared field or a schema attribute.
    ///
    /// An absent declared field falls back to its default.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MissingField`] for an absent field without a
    /// default, and [`MappingError::UnknownField`] for any other name.
    pub fn get(&self, name: &str) -> Result<&Value, MappingError> {
        if let Some(field) = self.schema.descriptor.field(name) {
            return self
                .entries
                .get(name)
                .or_else(|| field.default())
                .ok_or_else(|| MappingError::MissingField {
                    name: name.to_string(),
                });
        }
        self.schema
            .attribute(name)
            .ok_or_else(|| MappingError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Reads any stored key, declared or not.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Writes a key. Declared fields are coerced; other keys are stored as-is.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::Field`] when a strict schema rejects the value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), MappingError> {
        let value = match self.schema.descriptor.field(key) {
            Some(field) => coerce::coerce_value(field.tag(), value.into(), self.schema.descriptor.is_strict())
                .map_err(|source| MappingError::Field {
                    field: key.to_string(),
                    source,
                })?,
            None => value.into(),
        };
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    /// Removes a key, returning its value.
    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes every stored entry.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    #[must_use]
    pub fn into_entries(self) -> BTreeMap<String, Value> {
        self.entries
    }
}

impl Serialize for TypedMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}
