// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              SchemataError (~24 bytes)
//!                     |
//!   +-------+-------+-------+-------+-------+-----+
//!   |       |       |       |       |       |     |
//!   v       v       v       v       v       v     v
//! Schema  Coerce Pattern Mapping   Env   Config Io/Other
//!  Box     Box     Box     Box     Box    Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Schema   DuplicateField, ReservedName, UnsupportedType, GroupMismatch, ...
//!   Coerce   Invalid, TypeMismatch, Nested
//!   Pattern  NoMatch, Field, MissingRequired, Render, UnknownField
//!   Mapping  Field, MissingRequired, MissingField, UnknownField, NotAnObject
//!   Env      MissingVariables, Field, UnknownField
//!   Config   ParseError, MissingKey, InvalidValue, NotFound
//!
//! Schema-shape problems surface at compile time; per-value problems are
//! local to one field or one line.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`SchemataError`].
pub type SchemataResult<T> = std::result::Result<T, SchemataError>;

/// Top-level library error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum SchemataError {
    /// Schema definition rejected.
    #[error("schema error: {0}")]
    Schema(#[from] Box<SchemaError>),

    /// Value could not be coerced.
    #[error("coercion error: {0}")]
    Coerce(#[from] Box<CoerceError>),

    /// Pattern record error.
    #[error("pattern error: {0}")]
    Pattern(#[from] Box<PatternError>),

    /// Typed mapping error.
    #[error("mapping error: {0}")]
    Mapping(#[from] Box<MappingError>),

    /// Environment proxy error.
    #[error("environment error: {0}")]
    Env(#[from] Box<EnvError>),

    /// Definition file error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for SchemataError {
                fn from(err: $error) -> Self {
                    SchemataError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    SchemaError => Schema,
    CoerceError => Coerce,
    PatternError => Pattern,
    MappingError => Mapping,
    EnvError => Env,
    ConfigError => Config,
    std::io::Error => Io,
}

/// Coarse classification of an error, matching how callers usually branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input or declaration has the right shape but a bad value.
    Value,
    /// A name is unknown, reserved or missing.
    Attribute,
    /// Something of the wrong kind was supplied.
    Type,
}

// --- Schema Errors ---

/// Definition-time errors. Raised while compiling a schema, never on access.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Field name is empty or otherwise unusable.
    #[error("invalid field name {name:?}")]
    InvalidName { name: String },

    /// Field declared twice.
    #[error("field '{name}' is declared more than once")]
    DuplicateField { name: String },

    /// Field shadows a name owned by the record type.
    ///
    /// Pattern records report this as [`ErrorClass::Value`], mappings and
    /// environments as [`ErrorClass::Attribute`].
    #[error("field '{name}' collides with a reserved name")]
    ReservedName { name: String, class: ErrorClass },

    /// Declared type is outside the supported set.
    #[error("field '{field}' has unsupported type '{declared}'")]
    UnsupportedType { field: String, declared: String },

    /// Default value does not fit the declared type.
    #[error("default for field '{field}' is not a valid {expected}: {message}")]
    IncompatibleDefault {
        field: String,
        expected: String,
        message: String,
    },

    /// Required-on-init name is not a declared field.
    #[error("required name '{name}' is not a declared field")]
    UndeclaredRequired { name: String },

    /// Regular expression failed to compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Capture groups and declared fields are not in 1:1 correspondence.
    #[error("capture groups do not match fields: {message}")]
    GroupMismatch { message: String },

    /// Capture group bound to a name that is not a declared field.
    #[error("capture group '{name}' does not name a declared field")]
    UnknownGroup { name: String },

    /// Render template is malformed.
    #[error("invalid template '{template}': {message}")]
    Template { template: String, message: String },

    /// Template placeholder names an undeclared field.
    #[error("template placeholder '{name}' does not name a declared field")]
    UnknownPlaceholder { name: String },

    /// Definition used as the wrong kind of schema.
    #[error("schema '{schema}' is a {found} schema, expected {expected}")]
    WrongKind {
        schema: String,
        expected: String,
        found: String,
    },

    /// Referenced schema does not exist.
    #[error("unknown schema '{name}'")]
    UnknownSchema { name: String },

    /// Nested schema references form a cycle.
    #[error("nested schemas form a cycle: {path}")]
    NestingCycle { path: String },
}

impl SchemaError {
    /// Classifies this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::ReservedName { class, .. } => *class,
            Self::UnsupportedType { .. }
            | Self::UndeclaredRequired { .. }
            | Self::UnknownGroup { .. }
            | Self::UnknownPlaceholder { .. }
            | Self::UnknownSchema { .. } => ErrorClass::Attribute,
            Self::IncompatibleDefault { .. } | Self::WrongKind { .. } => ErrorClass::Type,
            Self::InvalidName { .. }
            | Self::DuplicateField { .. }
            | Self::InvalidPattern { .. }
            | Self::GroupMismatch { .. }
            | Self::Template { .. }
            | Self::NestingCycle { .. } => ErrorClass::Value,
        }
    }
}

// --- Coercion Errors ---

/// Raised when a raw value cannot become its declared type in strict mode.
#[derive(Debug, Error)]
pub enum CoerceError {
    /// Text does not parse as the declared type.
    #[error("cannot decode {raw:?} as {expected}")]
    Invalid { expected: String, raw: String },

    /// Raw value has the wrong kind entirely.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: &'static str,
    },

    /// Nested record failed to build.
    #[error("nested record: {0}")]
    Nested(Box<MappingError>),
}

impl CoerceError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Invalid { .. } => ErrorClass::Value,
            Self::TypeMismatch { .. } | Self::Nested(_) => ErrorClass::Type,
        }
    }
}

// --- Pattern Errors ---

/// Errors raised by pattern records and the line transformer.
#[derive(Debug, Error)]
pub enum PatternError {
    /// Input does not match the schema's pattern.
    #[error("{input:?} does not match pattern '{pattern}'")]
    NoMatch { pattern: String, input: String },

    /// Captured text could not be decoded.
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: CoerceError,
    },

    /// Required field's group did not participate in the match.
    #[error("required field '{field}' was not captured")]
    MissingRequired { field: String },

    /// Template could not format a value.
    #[error("cannot render field '{field}': {message}")]
    Render { field: String, message: String },

    /// Name is not a declared field.
    #[error("no field named '{name}'")]
    UnknownField { name: String },
}

// --- Mapping Errors ---

/// Errors raised by typed mappings.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Declared key could not be coerced.
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: CoerceError,
    },

    /// Required fields absent from the input.
    #[error("missing required fields: {}", .names.join(", "))]
    MissingRequired { names: Vec<String> },

    /// Declared field absent and without a default.
    #[error("field '{name}' is not set")]
    MissingField { name: String },

    /// Name is neither a declared field nor an attribute.
    #[error("no field named '{name}'")]
    UnknownField { name: String },

    /// Input is not a key-value object.
    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },
}

// --- Environment Errors ---

/// Errors raised by the environment proxy.
#[derive(Debug, Error)]
pub enum EnvError {
    /// Required variables absent at construction time.
    #[error("Variables {} are required, but have not been defined.", quote_names(.names))]
    MissingVariables { names: Vec<String> },

    /// Variable value could not be decoded or encoded.
    #[error("variable '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: CoerceError,
    },

    /// Name is not a declared field.
    #[error("no variable named '{name}' in schema")]
    UnknownField { name: String },
}

fn quote_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(",")
}

// --- Config Errors ---

/// Definition-file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a definition file.
    #[error("failed to parse definitions '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required key.
    #[error("missing required key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Definition not found.
    #[error("schema definition not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests;
