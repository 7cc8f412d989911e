// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment namespaces and the typed proxy over them.
//!
//! # Architecture
//!
//! ```text
//! Namespace (get / set / remove by name)
//!   MemoryEnv   copy-on-write BTreeMap, snapshot via current_env()
//!   ProcessEnv  live process environment (unsafe to construct)
//!
//! EnvironmentSchema::bind(namespace) -> EnvironmentProxy
//!   get    -> namespace.get -> coerce::decode_text | default | None
//!   set    -> coerce::encode -> namespace.set   (None removes)
//!   delete -> namespace.remove
//! ```
//!
//! - **Case-insensitive on Windows** for `MemoryEnv`
//! - **No caching**: every read goes back to the namespace

pub mod container;
pub mod process;
pub mod proxy;
mod types;


pub use container::MemoryEnv;
pub use process::ProcessEnv;
pub use proxy::{EnvOptions, EnvironmentProxy, EnvironmentSchema};

/// A mutable store of named text values.
pub trait Namespace {
    /// Looks up a variable.
    fn get(&self, name: &str) -> Option<String>;

    /// Stores a variable, replacing any existing value.
    fn set(&mut self, name: &str, value: &str);

    /// Removes a variable if present.
    fn remove(&mut self, name: &str);
}

impl<N: Namespace + ?Sized> Namespace for &mut N {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn set(&mut self, name: &str, value: &str) {
        (**self).set(name, value);
    }

    fn remove(&mut self, name: &str) {
        (**self).remove(name);
    }
}

/// Captures the current process environment.
#[must_use]
pub fn current_env() -> MemoryEnv {
    std::env::vars_os()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect()
}
