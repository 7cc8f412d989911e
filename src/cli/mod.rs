// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for schemata using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! schemata [global options] <command>
//! version
//! inis
//! schemas
//! transform <schema> [FILE]
//! map <schema> [FILE]
//! env <schema>
//! ```

pub mod env;
pub mod global;
pub mod map;
pub mod transform;

#[cfg(test)]
mod tests;

use crate::cli::env::EnvArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::map::MapArgs;
use crate::cli::transform::TransformArgs;
use clap::{Parser, Subcommand};

/// Typed views over strings, mappings and the environment.
#[derive(Debug, Parser)]
#[command(
    name = "schemata",
    author,
    version,
    about = "Typed views over strings, mappings and the environment",
    long_about = "schemata Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Declares typed fields once and reads them from regex-matched\n\
                  text, JSON objects or environment variables.\n\n\
                  `schemata transform <schema> data.csv` rewrites every matching\n\
                  line through a pattern schema. See `schemata <command> --help`\n\
                  for more information about a command.",
    after_help = "DEFINITION FILES:\n\n\
                  By default, schemata loads `schemata.toml` from the current\n\
                  directory when it exists. Additional files can be given with\n\
                  --ini, those are loaded afterwards and override earlier ones.\n\
                  SCHEMATA_* environment variables and --set come last.\n\
                  Use --no-default-inis to only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists the definition files in load order.
    Inis,

    /// Lists every loaded schema definition.
    Schemas,

    /// Rewrites lines of text through a pattern schema.
    Transform(TransformArgs),

    /// Builds typed mappings from JSON objects.
    Map(MapArgs),

    /// Reads the environment through an environment schema.
    Env(EnvArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
