// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The live process environment.

use super::Namespace;

/// Reads and writes the environment of the current process.
///
/// Reads observe external changes immediately; nothing is cached.
#[derive(Debug)]
pub struct ProcessEnv {
    _private: (),
}

impl ProcessEnv {
    /// Creates a handle to the process environment.
    ///
    /// # Safety
    ///
    /// Writing the environment is only sound while no other thread reads or
    /// writes it. The caller must guarantee that for the lifetime of the
    /// returned value, or never call [`Namespace::set`] and
    /// [`Namespace::remove`] on it.
    #[must_use]
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Namespace for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&mut self, name: &str, value: &str) {
        // SAFETY: exclusive access was asserted by the caller of `ProcessEnv::new`.
        unsafe { std::env::set_var(name, value) };
    }

    fn remove(&mut self, name: &str) {
        // SAFETY: exclusive access was asserted by the caller of `ProcessEnv::new`.
        unsafe { std::env::remove_var(name) };
    }
}
