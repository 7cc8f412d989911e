// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    CoerceError, ConfigError, EnvError, ErrorClass, MappingError, SchemaError, SchemataError,
    SchemataResult,
};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "schemas.fruit".to_string(),
        key: "pattern".to_string(),
    };
    insta::assert_snapshot!(err.to_string(), @"missing required key 'pattern' in section '[schemas.fruit]'");
}

#[test]
fn test_missing_variables_lists_every_name() {
    let err = EnvError::MissingVariables {
        names: vec!["FOO".to_string(), "BAR".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Variables 'FOO','BAR' are required, but have not been defined."
    );
}

#[test]
fn test_missing_required_fields_display() {
    let err = MappingError::MissingRequired {
        names: vec!["a".to_string(), "b".to_string()],
    };
    insta::assert_snapshot!(err.to_string(), @"missing required fields: a, b");
}

#[test]
fn test_schema_error_classes() {
    let reserved = SchemaError::ReservedName {
        name: "items".to_string(),
        class: ErrorClass::Attribute,
    };
    let mismatch = SchemaError::GroupMismatch {
        message: "field 'bar' has no capture group".to_string(),
    };
    let kind = SchemaError::WrongKind {
        schema: "fruit".to_string(),
        expected: "mapping".to_string(),
        found: "pattern".to_string(),
    };

    assert_eq!(reserved.class(), ErrorClass::Attribute);
    assert_eq!(mismatch.class(), ErrorClass::Value);
    assert_eq!(kind.class(), ErrorClass::Type);
}

#[test]
fn test_coerce_error_nests_mapping_error() {
    let inner = MappingError::UnknownField {
        name: "x".to_string(),
    };
    let err = CoerceError::Nested(Box::new(inner));
    insta::assert_snapshot!(err.to_string(), @"nested record: no field named 'x'");
    assert_eq!(err.class(), ErrorClass::Type);
}

#[test]
fn test_schemata_error_from_boxes() {
    let err: SchemataError = SchemaError::DuplicateField {
        name: "foo".to_string(),
    }
    .into();
    assert!(matches!(err, SchemataError::Schema(_)));
    insta::assert_snapshot!(err.to_string(), @"schema error: field 'foo' is declared more than once");
}

#[test]
fn test_schemata_error_size() {
    // Box<str> variants are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<SchemataError>();
    assert!(size <= 24, "SchemataError is {size} bytes, expected <= 24");
}

#[test]
fn test_schemata_result_size() {
    let size = std::mem::size_of::<SchemataResult<()>>();
    assert!(size <= 24, "SchemataResult<()> is {size} bytes, expected <= 24");
}
