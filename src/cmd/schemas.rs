// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Listing commands.

use crate::config::Definitions;

/// Display every loaded schema definition.
pub fn run_schemas_command(definitions: &Definitions) {
    if definitions.is_empty() {
        println!("No schemas defined");
    } else {
        for line in definitions.describe() {
            println!("{line}");
        }
    }
}

/// Display loaded definition files.
pub fn run_inis_command(definition_files: &[String]) {
    if definition_files.is_empty() {
        println!("No definition files loaded");
    } else {
        for line in definition_files {
            println!("{line}");
        }
    }
}
