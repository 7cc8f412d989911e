// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the transform command.

use clap::Args;
use std::path::PathBuf;

use crate::utility::encoding::Encoding;

/// Rewrites each line of the input through a pattern schema.
///
/// Lines that do not match are written unchanged unless --strict is given.
#[derive(Debug, Clone, Args)]
pub struct TransformArgs {
    /// Name of a pattern schema.
    #[arg(value_name = "SCHEMA")]
    pub schema: String,

    /// Input file, stdin when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Stops at the first line that does not parse or render.
    #[arg(long)]
    pub strict: bool,

    /// Encoding of the input bytes.
    #[arg(short = 'e', long, value_enum, default_value_t = Encoding::Utf8)]
    pub encoding: Encoding,
}
