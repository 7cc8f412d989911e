// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema compilation and the typed front-ends built on it.
//!
//! ```text
//! Vec<FieldSpec> + SchemaOptions
//!            |
//!            v
//!     compile_schema()  --> SchemaDescriptor (immutable)
//!            |
//!   +--------+-----------+-------------------+
//!   v                    v                   v
//! PatternSchema     MappingSchema     EnvironmentSchema (env::proxy)
//! regex + template  nested records    required-on-init
//!   |                    |                   |
//! PatternRecord       TypedMap        EnvironmentProxy
//!   |
//! transform_lines()
//!
//! Every read goes through coerce::decode, every write through
//! coerce::encode / coerce_value. Records hold no decoded cache beyond
//! their own field values.
//! ```

pub mod coerce;
pub mod mapping;
pub mod pattern;
pub mod transform;
pub mod types;
pub mod value;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{ErrorClass, SchemaError};
use types::{DeclaredType, FieldSpec, SchemaOptions, TypeTag, UnsupportedTypePolicy};
use value::Value;

/// A compiled field.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    tag: TypeTag,
    default: Option<Value>,
    required: bool,
}

impl Field {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn tag(&self) -> &TypeTag {
        &self.tag
    }

    /// Declared default, if any.
    #[must_use]
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Default, or [`Value::None`] when no default was declared.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.default.clone().unwrap_or_default()
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }
}

/// Immutable description of a set of typed fields.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    name: String,
    fields: Vec<Field>,
    reserved: BTreeSet<String>,
    strict: bool,
    required_on_init: Vec<String>,
}

impl SchemaDescriptor {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field in declaration order.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    #[must_use]
    pub const fn reserved(&self) -> &BTreeSet<String> {
        &self.reserved
    }

    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// Names that must be present in the backing store at construction.
    ///
    /// Combines the explicit required-on-init list with fields flagged
    /// `required`, without duplicates, in declaration order for the latter.
    #[must_use]
    pub fn required_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.required_on_init.iter().map(String::as_str).collect();
        for field in &self.fields {
            if field.required && !names.contains(&field.name.as_str()) {
                names.push(&field.name);
            }
        }
        names
    }
}

/// Compiles declared fields into a [`SchemaDescriptor`].
///
/// All shape problems are reported here, never on first access.
///
/// # Errors
///
/// Returns a [`SchemaError`] for empty or duplicate names, names in
/// `options.reserved()`, unsupported types (under
/// [`UnsupportedTypePolicy::Reject`]), defaults that do not fit their type,
/// and required-on-init names that are not declared fields.
///
/// # Example
///
/// ```
/// use schemata::schema::compile_schema;
/// use schemata::schema::types::{FieldSpec, SchemaOptions, TypeTag};
///
/// let schema = compile_schema(
///     vec![FieldSpec::new("FOO", TypeTag::Int), FieldSpec::new("BAR", "str")],
///     &SchemaOptions::default(),
/// )?;
/// assert_eq!(schema.field_names().collect::<Vec<_>>(), ["FOO", "BAR"]);
/// # Ok::<(), schemata::error::SchemaError>(())
/// ```
pub fn compile_schema(
    fields: impl IntoIterator<Item = FieldSpec>,
    options: &SchemaOptions,
) -> Result<SchemaDescriptor, SchemaError> {
    compile_with_reserved(fields, options, &[], ErrorClass::Attribute)
}

/// Like [`compile_schema`], with names owned by a specific front-end added to
/// the reserved set. A collision is reported with `reserved_class`.
pub(crate) fn compile_with_reserved(
    fields: impl IntoIterator<Item = FieldSpec>,
    options: &SchemaOptions,
    builtin_reserved: &[&str],
    reserved_class: ErrorClass,
) -> Result<SchemaDescriptor, SchemaError> {
    let reserved: BTreeSet<String> = builtin_reserved
        .iter()
        .map(|name| (*name).to_string())
        .chain(options.reserved().iter().cloned())
        .collect();

    let mut compiled: Vec<Field> = Vec::new();
    for spec in fields {
        let (name, declared, default, required) = spec.into_parts();

        if name.trim().is_empty() {
            return Err(SchemaError::InvalidName { name });
        }
        if compiled.iter().any(|f| f.name == name) {
            return Err(SchemaError::DuplicateField { name });
        }
        if reserved.contains(&name) {
            return Err(SchemaError::ReservedName {
                name,
                class: reserved_class,
            });
        }

        let tag = resolve_type(&name, declared, options)?;
        let default = match default {
            Some(value) => Some(check_default(&name, &tag, value)?),
            None => None,
        };

        compiled.push(Field {
            name,
            tag,
            default,
            required,
        });
    }

    for name in options.required_on_init() {
        if !compiled.iter().any(|f| &f.name == name) {
            return Err(SchemaError::UndeclaredRequired { name: name.clone() });
        }
    }

    debug!(
        schema = %options.name(),
        fields = compiled.len(),
        strict = options.strict(),
        "Compiled schema"
    );

    Ok(SchemaDescriptor {
        name: options.name().to_string(),
        fields: compiled,
        reserved,
        strict: options.strict(),
        required_on_init: options.required_on_init().to_vec(),
    })
}

fn resolve_type(
    field: &str,
    declared: DeclaredType,
    options: &SchemaOptions,
) -> Result<TypeTag, SchemaError> {
    let name = match declared {
        DeclaredType::Tag(tag) => return Ok(tag),
        DeclaredType::Named(name) => name,
    };

    match TypeTag::from_str(&name) {
        Ok(tag) => Ok(tag),
        Err(_) => match options.unsupported() {
            UnsupportedTypePolicy::Reject => Err(SchemaError::UnsupportedType {
                field: field.to_string(),
                declared: name,
            }),
            UnsupportedTypePolicy::Warn => {
                warn!(
                    schema = %options.name(),
                    field = %field,
                    declared = %name,
                    "Unsupported field type, value will be kept as raw text"
                );
                Ok(TypeTag::Str)
            }
        },
    }
}

fn check_default(field: &str, tag: &TypeTag, value: Value) -> Result<Value, SchemaError> {
    coerce::coerce_value(tag, value, true).map_err(|e| SchemaError::IncompatibleDefault {
        field: field.to_string(),
        expected: tag.name(),
        message: e.to_string(),
    })
}
