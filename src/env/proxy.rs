// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed proxy over an environment namespace.

use bon::Builder;
use tracing::debug;

use super::Namespace;
use crate::error::{EnvError, SchemaError};
use crate::schema::types::{FieldSpec, SchemaOptions, UnsupportedTypePolicy};
use crate::schema::value::Value;
use crate::schema::{Field, SchemaDescriptor, coerce, compile_schema};

/// Options for [`EnvironmentSchema::compile`].
#[derive(Debug, Clone, Builder)]
pub struct EnvOptions {
    #[builder(into, setters(name = with_name), default = String::from("environment"))]
    name: String,
    #[builder(setters(name = with_strict), default = false)]
    strict: bool,
    /// Variables that must be defined when the proxy is bound.
    #[builder(setters(name = with_required), default)]
    required: Vec<String>,
    #[builder(setters(name = with_reserved), default)]
    reserved: Vec<String>,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Schema applied to environment variables.
///
/// Unsupported field types are not an error here: they log a warning and
/// the variable is read as raw text.
#[derive(Debug, Clone)]
pub struct EnvironmentSchema {
    descriptor: SchemaDescriptor,
}

impl EnvironmentSchema {
    /// Compiles an environment schema.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for invalid fields or a required name that
    /// is not a declared field.
    ///
    /// # Example
    ///
    /// ```
    /// use schemata::env::{EnvOptions, EnvironmentSchema, MemoryEnv};
    /// use schemata::schema::types::{FieldSpec, TypeTag};
    ///
    /// let schema = EnvironmentSchema::compile(
    ///     vec![FieldSpec::new("FOO", TypeTag::Int)],
    ///     EnvOptions::default(),
    /// )?;
    /// let mut env = MemoryEnv::new();
    /// env.set("FOO", "100");
    /// let proxy = schema.bind(&mut env)?;
    /// assert_eq!(proxy.get("FOO")?.as_int(), Some(100));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn compile(
        fields: impl IntoIterator<Item = FieldSpec>,
        options: EnvOptions,
    ) -> Result<Self, SchemaError> {
        let schema_options = SchemaOptions::builder()
            .with_name(options.name)
            .with_strict(options.strict)
            .with_required_on_init(options.required)
            .with_reserved(options.reserved)
            .with_unsupported(UnsupportedTypePolicy::Warn)
            .build();
        let descriptor = compile_schema(fields, &schema_options)?;
        Ok(Self { descriptor })
    }

    #[must_use]
    pub const fn descriptor(&self) -> &SchemaDescriptor {
        &self.descriptor
    }

    /// Attaches the schema to `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::MissingVariables`] naming every required variable
    /// that is not defined.
    pub fn bind<N: Namespace>(&self, namespace: N) -> Result<EnvironmentProxy<'_, N>, EnvError> {
        let missing: Vec<String> = self
            .descriptor
            .required_names()
            .into_iter()
            .filter(|name| namespace.get(name).is_none())
            .map(str::to_owned)
            .collect();
        if !missing.is_empty() {
            return Err(EnvError::MissingVariables { names: missing });
        }

        debug!(
            schema = %self.descriptor.name(),
            fields = self.descriptor.fields().len(),
            "Bound environment schema"
        );
        Ok(EnvironmentProxy {
            schema: self,
            namespace,
        })
    }
}

/// Typed, live view of an environment namespace.
#[derive(Debug)]
pub struct EnvironmentProxy<'s, N> {
    schema: &'s EnvironmentSchema,
    namespace: N,
}

impl<N: Namespace> EnvironmentProxy<'_, N> {
    fn field(&self, name: &str) -> Result<&Field, EnvError> {
        self.schema
            .descriptor
            .field(name)
            .ok_or_else(|| EnvError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Reads a variable, decoded to its declared type.
    ///
    /// An undefined variable yields the field default, or [`Value::None`].
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::UnknownField`] for undeclared names and
    /// [`EnvError::Field`] when a strict schema cannot decode the value.
    pub fn get(&self, name: &str) -> Result<Value, EnvError> {
        let field = self.field(name)?;
        match self.namespace.get(name) {
            Some(raw) => coerce::decode_text(field.tag(), &raw, self.schema.descriptor.is_strict())
                .map_err(|source| EnvError::Field {
                    field: name.to_string(),
                    source,
                }),
            None => Ok(field.default_value()),
        }
    }

    /// Writes a variable, encoded from its declared type.
    ///
    /// Writing [`Value::None`] removes the variable.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::UnknownField`] for undeclared names and
    /// [`EnvError::Field`] when a strict schema rejects the value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), EnvError> {
        let field = self.field(name)?;
        let value = coerce::coerce_value(field.tag(), value.into(), self.schema.descriptor.is_strict())
            .map_err(|source| EnvError::Field {
                field: name.to_string(),
                source,
            })?;
        match coerce::encode(field.tag(), &value) {
            Some(text) => self.namespace.set(name, &text),
            None => self.namespace.remove(name),
        }
        Ok(())
    }

    /// Removes a variable; later reads fall back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::UnknownField`] for undeclared names.
    pub fn delete(&mut self, name: &str) -> Result<(), EnvError> {
        self.field(name)?;
        self.namespace.remove(name);
        Ok(())
    }

    /// Decodes every declared variable, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns the first decode error under a strict schema.
    pub fn snapshot(&self) -> Result<Vec<(String, Value)>, EnvError> {
        self.schema
            .descriptor
            .field_names()
            .map(|name| Ok((name.to_string(), self.get(name)?)))
            .collect()
    }

    #[must_use]
    pub const fn namespace(&self) -> &N {
        &self.namespace
    }

    pub const fn namespace_mut(&mut self) -> &mut N {
        &mut self.namespace
    }

    #[must_use]
    pub fn into_namespace(self) -> N {
        self.namespace
    }
}
