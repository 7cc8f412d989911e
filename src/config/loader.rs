// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Definition loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! DefinitionLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix("SCHEMATA")
//!   .set()
//!        |
//!        v
//!    build() --> Definitions
//! ```

use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};
use tracing::debug;

use super::Definitions;
use crate::error::{ConfigError, SchemataResult};

/// Builder for loading definitions from multiple sources.
pub struct DefinitionLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(String, PathBuf)>,
}

impl DefinitionLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML definition file.
    ///
    /// The file is read by `build()`, which fails if it is missing or invalid.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads overrides from `{PREFIX}_SCHEMAS__<name>__<key>` variables.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a definition override, e.g. `schemas.fruit.strict`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the value cannot be
    /// converted to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> SchemataResult<Self> {
        self.builder =
            self.builder
                .set_override(key, value)
                .map_err(|e| ConfigError::InvalidValue {
                    section: "override".to_string(),
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        Ok(self)
    }

    /// Builds the definitions from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required definition file is missing.
    /// - A file has invalid TOML syntax.
    /// - The merged sources do not match the definition structure.
    /// - A definition lacks a key its kind needs.
    pub fn build(self) -> SchemataResult<Definitions> {
        let sources = self.source_list();
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
            None => self.builder,
        };

        let parse_error = |e: config::ConfigError| ConfigError::ParseError {
            path: sources.clone(),
            message: e.to_string(),
        };
        let definitions: Definitions = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize::<Definitions>())
            .map_err(parse_error)?;
        definitions.validate()?;

        debug!(
            schemas = definitions.len(),
            sources = %sources,
            "Loaded schema definitions"
        );
        Ok(definitions)
    }

    fn source_list(&self) -> String {
        if self.files.is_empty() {
            return "<none>".to_string();
        }
        self.files
            .iter()
            .map(|(_, path)| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for DefinitionLoader {
    fn default() -> Self {
        Self::new()
    }
}
