// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema definitions loaded from TOML.
//!
//! # Source Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. definition files (-i / --ini, in order)
//! 2. inline TOML strings
//! 3. SCHEMATA_* env vars
//! 4. explicit overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SCHEMATA_SCHEMAS__FRUIT__STRICT=true  → schemas.fruit.strict = true
//! SCHEMATA_SCHEMAS__CSV__ANCHOR=full    → schemas.csv.anchor = "full"
//! ```
//!
//! # Nesting
//!
//! ```toml
//! [schemas.outer]
//! kind = "mapping"
//!
//! [[schemas.outer.fields]]
//! name = "inner"
//! type = "schema:inner"   # resolved recursively, cycles rejected
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::env::{EnvOptions, EnvironmentSchema};
use crate::error::{ConfigError, SchemaError, SchemataResult};
use crate::schema::mapping::{MappingOptions, MappingSchema};
use crate::schema::pattern::{PatternOptions, PatternSchema};
use crate::schema::types::{DeclaredType, FieldSpec};
use crate::schema::value::Value;

use loader::DefinitionLoader;
use types::{FieldDefinition, SchemaDefinition, SchemaKind};

/// Every schema definition from the loaded sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Definitions {
    pub schemas: BTreeMap<String, SchemaDefinition>,
}

impl Definitions {
    /// Create a new definition loader.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use schemata::config::Definitions;
    ///
    /// let definitions = Definitions::builder()
    ///     .add_toml_file("schemas/default.toml")
    ///     .add_toml_file_optional("schemas/local.toml")
    ///     .with_env_prefix("SCHEMATA")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> DefinitionLoader {
        DefinitionLoader::new()
    }

    /// Loads definitions from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// does not match the definition structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SchemataResult<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Loads definitions from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the definition structure.
    pub fn parse(content: &str) -> SchemataResult<Self> {
        Self::builder().add_toml_str(content).build()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Looks up a definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] for unknown names.
    pub fn get(&self, name: &str) -> SchemataResult<&SchemaDefinition> {
        Ok(self
            .schemas
            .get(name)
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))?)
    }

    /// Checks the keys each kind needs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] for a pattern definition without
    /// a `pattern`.
    pub fn validate(&self) -> SchemataResult<()> {
        for (name, definition) in &self.schemas {
            if definition.kind == SchemaKind::Pattern && definition.pattern.is_none() {
                return Err(ConfigError::MissingKey {
                    section: format!("schemas.{name}"),
                    key: "pattern".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Compiles a pattern schema.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names, definitions of another kind, and
    /// any compile failure.
    pub fn pattern(&self, name: &str) -> SchemataResult<PatternSchema> {
        let definition = self.expect_kind(name, SchemaKind::Pattern)?;
        let fields = self.field_specs(definition, &mut vec![name.to_string()])?;

        let options = PatternOptions::builder()
            .with_name(name)
            .with_strict(definition.strict)
            .with_names(definition.names.clone())
            .maybe_with_template(definition.template.clone())
            .with_anchor(definition.anchor)
            .with_reserved(definition.reserved.clone())
            .build();
        let pattern = definition.pattern.as_deref().ok_or_else(|| ConfigError::MissingKey {
            section: format!("schemas.{name}"),
            key: "pattern".to_string(),
        })?;
        Ok(PatternSchema::compile(pattern, fields, options)?)
    }

    /// Compiles a mapping schema, resolving nested schemas.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names, definitions of another kind,
    /// nesting cycles, and any compile failure.
    pub fn mapping(&self, name: &str) -> SchemataResult<Arc<MappingSchema>> {
        self.expect_kind(name, SchemaKind::Mapping)?;
        self.resolve_mapping(name, &mut Vec::new())
    }

    /// Compiles an environment schema.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names, definitions of another kind, and
    /// any compile failure.
    pub fn environment(&self, name: &str) -> SchemataResult<EnvironmentSchema> {
        let definition = self.expect_kind(name, SchemaKind::Environment)?;
        let fields = self.field_specs(definition, &mut vec![name.to_string()])?;

        let options = EnvOptions::builder()
            .with_name(name)
            .with_strict(definition.strict)
            .with_required(definition.required.clone())
            .with_reserved(definition.reserved.clone())
            .build();
        Ok(EnvironmentSchema::compile(fields, options)?)
    }

    /// One line per definition: name, kind and declared fields.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        let width = self.schemas.keys().map(String::len).max().unwrap_or(0);
        self.schemas
            .iter()
            .map(|(name, definition)| {
                let fields = definition
                    .fields
                    .iter()
                    .map(|f| format!("{}: {}", f.name, f.declared))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{name:<width$}  {:<11}  {fields}", definition.kind)
            })
            .collect()
    }

    fn expect_kind(&self, name: &str, expected: SchemaKind) -> SchemataResult<&SchemaDefinition> {
        let definition = self.get(name)?;
        if definition.kind != expected {
            return Err(SchemaError::WrongKind {
                schema: name.to_string(),
                expected: expected.to_string(),
                found: definition.kind.to_string(),
            }
            .into());
        }
        Ok(definition)
    }

    fn resolve_mapping(
        &self,
        name: &str,
        stack: &mut Vec<String>,
    ) -> SchemataResult<Arc<MappingSchema>> {
        if stack.iter().any(|seen| seen == name) {
            let mut path = stack.clone();
            path.push(name.to_string());
            return Err(SchemaError::NestingCycle {
                path: path.join(" -> "),
            }
            .into());
        }

        let definition = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::UnknownSchema {
                name: name.to_string(),
            })?;
        if definition.kind != SchemaKind::Mapping {
            return Err(SchemaError::WrongKind {
                schema: name.to_string(),
                expected: SchemaKind::Mapping.to_string(),
                found: definition.kind.to_string(),
            }
            .into());
        }

        stack.push(name.to_string());
        let fields = self.field_specs(definition, stack)?;
        stack.pop();

        let attributes = definition
            .attributes
            .iter()
            .map(|(key, raw)| (key.clone(), Value::from_json(raw.clone())))
            .collect();
        let options = MappingOptions::builder()
            .with_name(name)
            .with_strict(definition.strict)
            .with_initialize_with_none(definition.initialize_with_none)
            .with_attributes(attributes)
            .with_reserved(definition.reserved.clone())
            .build();
        Ok(MappingSchema::compile(fields, options)?)
    }

    fn field_specs(
        &self,
        definition: &SchemaDefinition,
        stack: &mut Vec<String>,
    ) -> SchemataResult<Vec<FieldSpec>> {
        definition
            .fields
            .iter()
            .map(|field| self.field_spec(field, stack))
            .collect()
    }

    fn field_spec(
        &self,
        field: &FieldDefinition,
        stack: &mut Vec<String>,
    ) -> SchemataResult<FieldSpec> {
        let declared = match field.nested_schema() {
            Some(nested) => DeclaredType::from(self.resolve_mapping(nested, stack)?),
            None => DeclaredType::from(field.declared.as_str()),
        };

        let mut spec = FieldSpec::new(field.name.clone(), declared);
        if let Some(default) = &field.default {
            spec = spec.with_default(Value::from_json(default.clone()));
        }
        if field.required {
            spec = spec.required();
        }
        Ok(spec)
    }
}
