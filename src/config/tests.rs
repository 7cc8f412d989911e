// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write as _;
use std::sync::Arc;

use super::types::{SchemaKind, SchemaDefinition};
use super::{DefinitionLoader, Definitions};
use crate::error::{ConfigError, SchemaError, SchemataError};
use crate::schema::pattern::Anchor;
use crate::schema::types::TypeTag;
use crate::schema::value::Value;

const FRUIT: &str = r#"
[schemas.fruit]
kind = "pattern"
pattern = '(?P<item>[^,]+),\$?(?P<cost>[0-9.]+)'
template = '{item},${cost:.2f}'

[[schemas.fruit.fields]]
name = "item"
type = "str"

[[schemas.fruit.fields]]
name = "cost"
type = "float"
default = 0.0
"#;

const NESTED: &str = r#"
[schemas.inner]
kind = "mapping"

[[schemas.inner.fields]]
name = "foo"

[schemas.outer]
kind = "mapping"
initialize_with_none = false

[schemas.outer.attributes]
version = 2

[[schemas.outer.fields]]
name = "inner"
type = "schema:inner"

[[schemas.outer.fields]]
name = "count"
type = "int"
required = true
"#;

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_parse_pattern_definition() {
    let definitions = Definitions::parse(FRUIT).unwrap();
    let fruit: &SchemaDefinition = definitions.get("fruit").unwrap();

    assert_eq!(fruit.kind, SchemaKind::Pattern);
    assert_eq!(fruit.anchor, Anchor::Prefix);
    assert!(!fruit.strict);
    assert!(fruit.initialize_with_none);
    assert_eq!(fruit.fields.len(), 2);
    assert_eq!(fruit.fields[1].default, Some(serde_json::json!(0.0)));
}

#[test]
fn test_missing_field_type_defaults_to_str() {
    let definitions = Definitions::parse(NESTED).unwrap();
    assert_eq!(definitions.get("inner").unwrap().fields[0].declared, "str");
}

#[test]
fn test_unknown_definition_key_rejected() {
    let err = Definitions::parse("[schemas.x]\nkind = \"mapping\"\ncolour = \"red\"\n").unwrap_err();
    assert!(matches!(err, SchemataError::Config(ref e) if matches!(**e, ConfigError::ParseError { .. })));
}

#[test]
fn test_bad_kind_rejected() {
    let err = Definitions::parse("[schemas.x]\nkind = \"table\"\n").unwrap_err();
    assert!(matches!(err, SchemataError::Config(_)));
    assert!("Environment".parse::<SchemaKind>().is_ok());
    assert!("table".parse::<SchemaKind>().is_err());
}

#[test]
fn test_pattern_definition_requires_pattern() {
    let err = Definitions::parse("[schemas.x]\nkind = \"pattern\"\n").unwrap_err();
    insta::assert_snapshot!(err, @"config error: missing required key 'pattern' in section '[schemas.x]'");
}

#[test]
fn test_later_sources_override_earlier() {
    let definitions = DefinitionLoader::new()
        .add_toml_str(FRUIT)
        .add_toml_str("[schemas.fruit]\nstrict = true\nanchor = \"full\"\n")
        .build()
        .unwrap();
    let fruit = definitions.get("fruit").unwrap();
    assert!(fruit.strict);
    assert_eq!(fruit.anchor, Anchor::Full);
}

#[test]
fn test_explicit_override() {
    let definitions = DefinitionLoader::new()
        .add_toml_str(FRUIT)
        .set("schemas.fruit.strict", true)
        .unwrap()
        .build()
        .unwrap();
    assert!(definitions.get("fruit").unwrap().strict);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(FRUIT.as_bytes()).unwrap();

    let definitions = DefinitionLoader::new()
        .add_toml_file(file.path())
        .with_env_prefix("SCHEMATA_TEST_UNUSED")
        .build()
        .unwrap();
    assert_eq!(definitions.len(), 1);
}

#[test]
fn test_missing_required_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = Definitions::from_file(dir.path().join("absent.toml"));
    assert!(result.is_err());
}

#[test]
fn test_loader_tracks_files() {
    let dir = tempfile::tempdir().unwrap();
    let loader = DefinitionLoader::new()
        .add_toml_str(FRUIT)
        .add_toml_file_optional(dir.path().join("absent.toml"));

    insta::assert_debug_snapshot!(loader.format_loaded_files(), @r#"
    [
        "1. [string] <string>",
    ]
    "#);
}

// ============================================================================
// Compiling
// ============================================================================

#[test]
fn test_compile_pattern_definition() {
    let definitions = Definitions::parse(FRUIT).unwrap();
    let schema = definitions.pattern("fruit").unwrap();
    let record = schema.parse("apple,$2").unwrap();
    assert_eq!(record.render().unwrap(), "apple,$2.00");
}

#[test]
fn test_compile_nested_mapping_definition() {
    let definitions = Definitions::parse(NESTED).unwrap();
    let outer = definitions.mapping("outer").unwrap();

    let field = outer.descriptor().field("inner").unwrap();
    let TypeTag::Nested(inner) = field.tag() else {
        panic!("expected a nested tag, got {:?}", field.tag());
    };
    assert_eq!(inner.descriptor().name(), "inner");
    assert!(!outer.initialize_with_none());
    assert_eq!(outer.attribute("version"), Some(&Value::Int(2)));

    let map = outer
        .build_json(serde_json::json!({"count": "3", "inner": {"foo": "bar"}}))
        .unwrap();
    let record = map.get("inner").unwrap().as_record().unwrap();
    assert!(Arc::ptr_eq(record.schema(), inner));
}

#[test]
fn test_wrong_kind_rejected() {
    let definitions = Definitions::parse(FRUIT).unwrap();
    let err = definitions.mapping("fruit").unwrap_err();
    insta::assert_snapshot!(err, @"schema error: schema 'fruit' is a pattern schema, expected mapping");
}

#[test]
fn test_unknown_definition() {
    let definitions = Definitions::parse(FRUIT).unwrap();
    let err = definitions.environment("nope").unwrap_err();
    assert!(matches!(err, SchemataError::Config(ref e) if matches!(**e, ConfigError::NotFound(_))));
}

#[test]
fn test_unknown_nested_schema() {
    let definitions = Definitions::parse(
        "[schemas.a]\nkind = \"mapping\"\n[[schemas.a.fields]]\nname = \"b\"\ntype = \"schema:missing\"\n",
    )
    .unwrap();
    let err = definitions.mapping("a").unwrap_err();
    assert!(matches!(err, SchemataError::Schema(ref e) if matches!(**e, SchemaError::UnknownSchema { .. })));
}

#[test]
fn test_nesting_cycle_rejected() {
    let definitions = Definitions::parse(
        r#"
[schemas.a]
kind = "mapping"
[[schemas.a.fields]]
name = "b"
type = "schema:b"

[schemas.b]
kind = "mapping"
[[schemas.b.fields]]
name = "a"
type = "schema:a"
"#,
    )
    .unwrap();
    let err = definitions.mapping("a").unwrap_err();
    insta::assert_snapshot!(err, @"schema error: nested schemas form a cycle: a -> b -> a");
}

#[test]
fn test_compile_environment_definition() {
    let definitions = Definitions::parse(
        r#"
[schemas.svc]
kind = "environment"
required = ["PORT"]

[[schemas.svc.fields]]
name = "PORT"
type = "int"
"#,
    )
    .unwrap();
    let schema = definitions.environment("svc").unwrap();
    assert_eq!(schema.descriptor().required_names(), ["PORT"]);
}

#[test]
fn test_describe_lists_definitions() {
    let definitions = Definitions::parse(NESTED).unwrap();
    insta::assert_debug_snapshot!(definitions.describe(), @r#"
    [
        "inner  mapping      foo: str",
        "outer  mapping      inner: schema:inner, count: int",
    ]
    "#);
}
