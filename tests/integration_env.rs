// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for environment proxies over an in-memory namespace.

use schemata::env::{EnvOptions, EnvironmentSchema, MemoryEnv};
use schemata::error::EnvError;
use schemata::schema::types::{FieldSpec, TypeTag};
use schemata::schema::value::Value;

fn service() -> EnvironmentSchema {
    EnvironmentSchema::compile(
        vec![
            FieldSpec::new("FOO", TypeTag::Int),
            FieldSpec::new("WORKERS", TypeTag::Int).with_default(4),
            FieldSpec::new("FEATURES", TypeTag::List),
        ],
        EnvOptions::builder()
            .with_name("service")
            .with_required(vec!["FOO".to_string()])
            .build(),
    )
    .unwrap()
}

// =============================================================================
// Reading and writing
// =============================================================================

#[test]
fn env_reads_then_delete_falls_back() {
    let schema = service();
    let env: MemoryEnv = [("FOO", "100")].into_iter().collect();
    let mut proxy = schema.bind(env).unwrap();

    assert_eq!(proxy.get("FOO").unwrap(), Value::Int(100));
    proxy.delete("FOO").unwrap();
    assert_eq!(proxy.get("FOO").unwrap(), Value::None);
    assert_eq!(proxy.get("WORKERS").unwrap(), Value::Int(4));
}

#[test]
fn env_writes_are_visible_in_namespace() {
    let schema = service();
    let env: MemoryEnv = [("FOO", "1")].into_iter().collect();
    let mut proxy = schema.bind(env).unwrap();

    proxy.set("WORKERS", "16").unwrap();
    proxy
        .set("FEATURES", Value::from_json(serde_json::json!(["a", "b"])))
        .unwrap();

    let env = proxy.into_namespace();
    assert_eq!(env.get("WORKERS"), Some("16"));
    assert_eq!(env.get("FEATURES"), Some(r#"["a", "b"]"#));
}

#[test]
fn env_proxy_over_borrowed_namespace() {
    let schema = service();
    let mut env: MemoryEnv = [("FOO", "1")].into_iter().collect();
    {
        let mut proxy = schema.bind(&mut env).unwrap();
        proxy.set("FOO", 2).unwrap();
    }
    assert_eq!(env.get("FOO"), Some("2"));
}

#[test]
fn env_missing_required_reported_on_bind() {
    let err = service().bind(MemoryEnv::new()).unwrap_err();
    assert!(matches!(err, EnvError::MissingVariables { ref names } if names == &["FOO"]));
}
