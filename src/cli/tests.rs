// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use crate::cli::global::DEFAULT_INI;
use crate::cli::{Cli, Command};
use crate::utility::encoding::Encoding;
use clap::Parser;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["schemata", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));

    let cli = Cli::try_parse_from(["schemata", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "schemata",
        "-l",
        "5",
        "-i",
        "a.toml",
        "--ini",
        "b.toml",
        "--log-file",
        "run.log",
        "--log-json",
        "schemas",
    ])
    .unwrap();
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.file_log_level, None);
    assert!(cli.global.log_json);
    assert!(matches!(cli.command, Some(Command::Schemas)));
    assert_eq!(
        cli.global.definition_files(),
        [
            PathBuf::from(DEFAULT_INI),
            PathBuf::from("a.toml"),
            PathBuf::from("b.toml")
        ]
    );
}

#[test]
fn test_no_default_inis() {
    let cli = Cli::try_parse_from(["schemata", "--no-default-inis", "-i", "a.toml", "inis"]).unwrap();
    assert_eq!(cli.global.definition_files(), [PathBuf::from("a.toml")]);
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["schemata", "-l", "7", "version"]).is_err());
}

#[test]
fn test_log_json_requires_log_file() {
    assert!(Cli::try_parse_from(["schemata", "--log-json", "version"]).is_err());
}

#[test]
fn test_parse_overrides() {
    let cli = Cli::try_parse_from([
        "schemata",
        "-s",
        "schemas.fruit.strict=true",
        "--set",
        "schemas.fruit.template={item}=x",
        "schemas",
    ])
    .unwrap();
    insta::assert_debug_snapshot!(cli.global.overrides, @r#"
    [
        (
            "schemas.fruit.strict",
            "true",
        ),
        (
            "schemas.fruit.template",
            "{item}=x",
        ),
    ]
    "#);
}

#[test]
fn test_malformed_override_rejected() {
    assert!(Cli::try_parse_from(["schemata", "-s", "no-equals", "schemas"]).is_err());
    assert!(Cli::try_parse_from(["schemata", "-s", "=value", "schemas"]).is_err());
}

#[test]
fn test_parse_transform() {
    let cli = Cli::try_parse_from([
        "schemata",
        "transform",
        "fruit",
        "data.csv",
        "--strict",
        "-e",
        "utf16le",
    ])
    .unwrap();
    let Some(Command::Transform(args)) = cli.command else {
        panic!("expected transform, got {:?}", cli.command);
    };
    assert_eq!(args.schema, "fruit");
    assert_eq!(args.file, Some(PathBuf::from("data.csv")));
    assert!(args.strict);
    assert_eq!(args.encoding, Encoding::Utf16Le);
}

#[test]
fn test_parse_transform_defaults() {
    let cli = Cli::try_parse_from(["schemata", "transform", "fruit"]).unwrap();
    let Some(Command::Transform(args)) = cli.command else {
        panic!("expected transform, got {:?}", cli.command);
    };
    assert_eq!(args.file, None);
    assert!(!args.strict);
    assert_eq!(args.encoding, Encoding::Utf8);
}

#[test]
fn test_parse_map_and_env() {
    let cli = Cli::try_parse_from(["schemata", "map", "outer", "-p"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Map(ref args)) if args.schema == "outer" && args.pretty));

    let cli = Cli::try_parse_from(["schemata", "env", "svc", "--json"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Env(ref args)) if args.schema == "svc" && args.json));
}

#[test]
fn test_schema_name_required() {
    assert!(Cli::try_parse_from(["schemata", "transform"]).is_err());
    assert!(Cli::try_parse_from(["schemata", "env"]).is_err());
}
