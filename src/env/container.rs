// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory environment with copy-on-write clones.
//!
//! ```text
//! MemoryEnv { data: Arc<EnvData> }
//! clone shares the Arc; the first write through either copy
//! detaches it (Arc::make_mut)
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use super::Namespace;
use super::types::{EnvData, EnvKey};

/// A set of environment variables held in memory.
///
/// Cloning is cheap: copies share storage until one of them is modified.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnv {
    data: Arc<EnvData>,
}

impl MemoryEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment from a map of variables.
    #[must_use]
    pub fn from_map(vars: BTreeMap<String, String>) -> Self {
        vars.into_iter().collect()
    }

    /// Sets a variable, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        Arc::make_mut(&mut self.data)
            .vars_mut()
            .insert(EnvKey::new(key), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.vars().get(&EnvKey::new(key)).map(String::as_str)
    }

    /// Removes a variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        let key = EnvKey::new(key);
        if self.data.vars().contains_key(&key) {
            Arc::make_mut(&mut self.data).vars_mut().remove(&key);
        }
        self
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.data.vars().contains_key(&EnvKey::new(key))
    }

    /// Returns all variables as a map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data
            .vars()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.vars().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.vars().len()
    }

    /// Returns `true` if both values still share one storage block.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<K, V> FromIterator<(K, V)> for MemoryEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (EnvKey::new(k), v.into()))
            .collect();
        Self {
            data: Arc::new(EnvData::from_vars(vars)),
        }
    }
}

impl Namespace for MemoryEnv {
    fn get(&self, name: &str) -> Option<String> {
        Self::get(self, name).map(str::to_owned)
    }

    fn set(&mut self, name: &str, value: &str) {
        Self::set(self, name, value);
    }

    fn remove(&mut self, name: &str) {
        Self::remove(self, name);
    }
}
