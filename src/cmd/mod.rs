// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   transform, map, env, schemas
//! ```

pub mod env;
pub mod map;
pub mod schemas;
pub mod transform;


use anyhow::Context;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Reads the whole input file, or stdin when no file is given.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("failed to read stdin")?;
            Ok(bytes)
        }
    }
}
