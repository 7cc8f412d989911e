// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for definition loading.
//!
//! Tests the config module with realistic TOML definition files.

use std::io::Write as _;

use schemata::config::Definitions;
use schemata::config::loader::DefinitionLoader;
use schemata::env::MemoryEnv;
use schemata::schema::transform::transform_text;
use schemata::schema::value::Value;

const BASE: &str = r#"
[schemas.access_log]
kind = "pattern"
pattern = '(?P<status>\d{3}) (?P<bytes>\d+) (?P<path>\S+)'
template = '{path} -> {status} ({bytes:,d} bytes)'

[[schemas.access_log.fields]]
name = "status"
type = "int"

[[schemas.access_log.fields]]
name = "bytes"
type = "int"

[[schemas.access_log.fields]]
name = "path"

[schemas.runtime]
kind = "environment"

[[schemas.runtime.fields]]
name = "THREADS"
type = "int"
default = 1
"#;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// =============================================================================
// Loading from files
// =============================================================================

#[test]
fn config_load_and_transform() {
    let file = write_temp(BASE);
    let definitions = Definitions::from_file(file.path()).unwrap();
    let schema = definitions.pattern("access_log").unwrap();

    let out: Vec<String> = transform_text(&schema, "200 123456 /index.html\n# comment", false)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(out, ["/index.html -> 200 (123,456 bytes)", "# comment"]);
}

#[test]
fn config_layered_files() {
    let base = write_temp(BASE);
    let local = write_temp("[schemas.access_log]\nstrict = true\n");

    let loader = DefinitionLoader::new()
        .add_toml_file(base.path())
        .add_toml_file(local.path());
    assert_eq!(loader.loaded_files().len(), 2);

    let definitions = loader.build().unwrap();
    assert!(definitions.get("access_log").unwrap().strict);
    assert_eq!(definitions.len(), 2);
}

#[test]
fn config_environment_schema_from_file() {
    let file = write_temp(BASE);
    let definitions = Definitions::from_file(file.path()).unwrap();
    let schema = definitions.environment("runtime").unwrap();

    let proxy = schema.bind(MemoryEnv::new()).unwrap();
    assert_eq!(proxy.get("THREADS").unwrap(), Value::Int(1));

    let env: MemoryEnv = [("THREADS", "8")].into_iter().collect();
    let proxy = schema.bind(env).unwrap();
    assert_eq!(proxy.get("THREADS").unwrap(), Value::Int(8));
}

#[test]
fn config_invalid_toml_rejected() {
    let file = write_temp("[schemas.broken\nkind = ");
    assert!(Definitions::from_file(file.path()).is_err());
}

#[test]
fn config_optional_file_may_be_absent() {
    let dir = tempfile::tempdir().unwrap();
    let definitions = DefinitionLoader::new()
        .add_toml_file_optional(dir.path().join("schemata.toml"))
        .build()
        .unwrap();
    assert!(definitions.is_empty());
}
