// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use schemata::cli::global::GlobalOptions;
use schemata::cli::{Cli, Command};
use schemata::utility::encoding::Encoding;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["schemata", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["schemata"]).unwrap();
    assert!(cli.command.is_none());
}

// =============================================================================
// Transform Command
// =============================================================================

#[test]
fn cli_transform_from_stdin_with_acp() {
    let cli = Cli::try_parse_from(["schemata", "transform", "prices", "--encoding", "acp"]).unwrap();
    let Some(Command::Transform(args)) = cli.command else {
        panic!("expected transform");
    };
    assert!(args.file.is_none());
    assert_eq!(args.encoding, Encoding::Acp);
}

#[test]
fn cli_transform_unknown_encoding_rejected() {
    let result = Cli::try_parse_from(["schemata", "transform", "prices", "-e", "latin9"]);
    assert!(result.is_err());
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_after_subcommand_rejected() {
    let result = Cli::try_parse_from(["schemata", "schemas", "-l", "3"]);
    assert!(result.is_err());
}

#[test]
fn cli_global_options_default() {
    let global = GlobalOptions::default();
    assert!(global.inis.is_empty());
    assert!(global.overrides.is_empty());
    assert_eq!(global.definition_files().len(), 1);
}

#[test]
fn cli_file_log_level() {
    let cli = Cli::try_parse_from([
        "schemata",
        "--file-log-level",
        "6",
        "--log-file",
        "logs/run.log",
        "env",
        "svc",
    ])
    .unwrap();
    assert_eq!(cli.global.file_log_level, Some(6));
    assert_eq!(cli.global.log_level, None);
    assert!(matches!(cli.command, Some(Command::Env(ref args)) if !args.json));
}
