// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Definition file types.
//!
//! # Structure
//!
//! ```text
//! Definitions
//!   schemas: name -> SchemaDefinition
//!                      kind: pattern | mapping | environment
//!                      fields: [FieldDefinition { name, type, default, required }]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::schema::pattern::Anchor;

/// Which front-end a definition compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Pattern,
    Mapping,
    Environment,
}

impl SchemaKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Mapping => "mapping",
            Self::Environment => "environment",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for SchemaKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pattern" => Ok(Self::Pattern),
            "mapping" => Ok(Self::Mapping),
            "environment" => Ok(Self::Environment),
            _ => Err(ConfigError::InvalidValue {
                section: "schemas".to_string(),
                key: "kind".to_string(),
                message: format!("expected 'pattern', 'mapping', or 'environment', got '{s}'"),
            }),
        }
    }
}

const fn default_true() -> bool {
    true
}

/// One `[schemas.<name>]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDefinition {
    pub kind: SchemaKind,
    /// Regular expression (pattern schemas only).
    #[serde(default)]
    pub pattern: Option<String>,
    /// Render template (pattern schemas only).
    #[serde(default)]
    pub template: Option<String>,
    /// Field names bound positionally to unnamed groups.
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default)]
    pub strict: bool,
    /// Mapping schemas only.
    #[serde(default = "default_true")]
    pub initialize_with_none: bool,
    /// Environment variables that must be defined when the proxy is bound.
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub reserved: Vec<String>,
    /// Constant attributes attached to a mapping schema.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, JsonValue>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// One `[[schemas.<name>.fields]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDefinition {
    pub name: String,
    /// Type name, or `schema:<name>` for a nested mapping schema.
    #[serde(rename = "type", default = "default_type")]
    pub declared: String,
    #[serde(default)]
    pub default: Option<JsonValue>,
    #[serde(default)]
    pub required: bool,
}

fn default_type() -> String {
    "str".to_string()
}

impl FieldDefinition {
    /// Name of the nested schema, if the type is `schema:<name>`.
    #[must_use]
    pub fn nested_schema(&self) -> Option<&str> {
        self.declared
            .strip_prefix("schema:")
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}
