// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the map command.

use clap::Args;
use std::path::PathBuf;

/// Builds typed mappings from a JSON object or an array of objects.
#[derive(Debug, Clone, Args)]
pub struct MapArgs {
    /// Name of a mapping schema.
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// JSON input file, stdin when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Pretty-prints the output.
    #[arg(short = 'p', long)]
    pub pretty: bool,
}
