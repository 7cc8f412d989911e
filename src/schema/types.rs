// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declarative field types.
//!
//! ```text
//! TypeTag        str | int | float | bool | dict | list | schema:<name>
//! DeclaredType   Tag(TypeTag) | Named("...")  (resolved at compile time)
//! FieldSpec      name + DeclaredType + default + required
//! SchemaOptions  name, strict, reserved, required_on_init, unsupported policy
//! ```

use std::str::FromStr;
use std::sync::Arc;

use bon::Builder;

use super::mapping::MappingSchema;
use super::value::Value;

/// The closed set of types a field may declare.
#[derive(Debug, Clone)]
pub enum TypeTag {
    Str,
    Int,
    Float,
    Bool,
    /// Structured map, stored as JSON text in string substrates.
    Map,
    /// Ordered list, stored as JSON text in string substrates.
    List,
    /// Nested mapping schema.
    Nested(Arc<MappingSchema>),
}

impl TypeTag {
    /// Name used in messages and definition files.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Str => "str".to_string(),
            Self::Int => "int".to_string(),
            Self::Float => "float".to_string(),
            Self::Bool => "bool".to_string(),
            Self::Map => "dict".to_string(),
            Self::List => "list".to_string(),
            Self::Nested(schema) => format!("schema:{}", schema.descriptor().name()),
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nested(a), Self::Nested(b)) => Arc::ptr_eq(a, b),
            (Self::Str, Self::Str)
            | (Self::Int, Self::Int)
            | (Self::Float, Self::Float)
            | (Self::Bool, Self::Bool)
            | (Self::Map, Self::Map)
            | (Self::List, Self::List) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Parses scalar and container tags. Nested schemas need a registry and are
/// resolved by the definition loader instead.
impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "str" | "string" => Ok(Self::Str),
            "int" | "integer" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "bool" | "boolean" => Ok(Self::Bool),
            "dict" | "map" => Ok(Self::Map),
            "list" => Ok(Self::List),
            other => Err(format!("unsupported type '{other}'")),
        }
    }
}

/// A type as written by the caller, before it is checked.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    Tag(TypeTag),
    Named(String),
}

impl From<TypeTag> for DeclaredType {
    fn from(tag: TypeTag) -> Self {
        Self::Tag(tag)
    }
}

impl From<&str> for DeclaredType {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for DeclaredType {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Arc<MappingSchema>> for DeclaredType {
    fn from(schema: Arc<MappingSchema>) -> Self {
        Self::Tag(TypeTag::Nested(schema))
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag(tag) => write!(f, "{tag}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// One declared field.
///
/// ```
/// use schemata::schema::types::{FieldSpec, TypeTag};
///
/// let spec = FieldSpec::new("cost", TypeTag::Float).with_default(0.0);
/// assert_eq!(spec.name(), "cost");
/// ```
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    declared: DeclaredType,
    default: Option<Value>,
    required: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, declared: impl Into<DeclaredType>) -> Self {
        Self {
            name: name.into(),
            declared: declared.into(),
            default: None,
            required: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn declared(&self) -> &DeclaredType {
        &self.declared
    }

    #[must_use]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub(crate) fn into_parts(self) -> (String, DeclaredType, Option<Value>, bool) {
        (self.name, self.declared, self.default, self.required)
    }
}

/// What to do with a declared type outside [`TypeTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedTypePolicy {
    /// Fail compilation.
    #[default]
    Reject,
    /// Log a warning and treat the field as raw text.
    Warn,
}

/// Options shared by every schema front-end.
#[derive(Debug, Clone, Builder)]
pub struct SchemaOptions {
    #[builder(into, setters(name = with_name), default = String::from("anonymous"))]
    name: String,
    #[builder(setters(name = with_strict), default = false)]
    strict: bool,
    #[builder(setters(name = with_reserved), default)]
    reserved: Vec<String>,
    #[builder(setters(name = with_required_on_init), default)]
    required_on_init: Vec<String>,
    #[builder(setters(name = with_unsupported), default)]
    unsupported: UnsupportedTypePolicy,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SchemaOptions {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    #[must_use]
    pub fn reserved(&self) -> &[String] {
        &self.reserved
    }

    #[must_use]
    pub fn required_on_init(&self) -> &[String] {
        &self.required_on_init
    }

    #[must_use]
    pub const fn unsupported(&self) -> UnsupportedTypePolicy {
        self.unsupported
    }
}
