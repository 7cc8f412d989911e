// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the env command.

use clap::Args;

/// Reads every declared variable through an environment schema.
#[derive(Debug, Clone, Args)]
pub struct EnvArgs {
    /// Name of an environment schema.
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Prints a JSON object instead of NAME=value lines.
    #[arg(long)]
    pub json: bool,
}
