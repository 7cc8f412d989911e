// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::compile_schema;
use super::types::{FieldSpec, SchemaOptions, TypeTag, UnsupportedTypePolicy};
use super::value::Value;
use crate::error::{ErrorClass, SchemaError};

#[test]
fn test_fields_keep_declaration_order() {
    let schema = compile_schema(
        vec![
            FieldSpec::new("b", TypeTag::Int),
            FieldSpec::new("a", "bool"),
            FieldSpec::new("c", "dict"),
        ],
        &SchemaOptions::default(),
    )
    .unwrap();

    assert_eq!(schema.field_names().collect::<Vec<_>>(), ["b", "a", "c"]);
    assert_eq!(schema.position("c"), Some(2));
    assert_eq!(schema.field("a").unwrap().tag(), &TypeTag::Bool);
    assert_eq!(schema.field("c").unwrap().tag(), &TypeTag::Map);
}

#[test]
fn test_duplicate_and_empty_names_rejected() {
    let err = compile_schema(
        vec![FieldSpec::new("x", TypeTag::Int), FieldSpec::new("x", TypeTag::Str)],
        &SchemaOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateField { .. }));

    let err = compile_schema(vec![FieldSpec::new("  ", TypeTag::Int)], &SchemaOptions::default())
        .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidName { .. }));
}

#[test]
fn test_caller_reserved_names_rejected() {
    let options = SchemaOptions::builder()
        .with_reserved(vec!["self".to_string()])
        .build();
    let err = compile_schema(vec![FieldSpec::new("self", TypeTag::Str)], &options).unwrap_err();
    assert!(matches!(err, SchemaError::ReservedName { .. }));
    assert_eq!(err.class(), ErrorClass::Attribute);
}

#[test]
fn test_unsupported_type_rejected_by_default() {
    let err = compile_schema(vec![FieldSpec::new("x", "tuple")], &SchemaOptions::default())
        .unwrap_err();
    insta::assert_snapshot!(err, @"field 'x' has unsupported type 'tuple'");
}

#[test]
fn test_unsupported_type_falls_back_to_text_when_warning() {
    let options = SchemaOptions::builder()
        .with_unsupported(UnsupportedTypePolicy::Warn)
        .build();
    let schema = compile_schema(vec![FieldSpec::new("x", "tuple")], &options).unwrap();
    assert_eq!(schema.field("x").unwrap().tag(), &TypeTag::Str);
}

#[test]
fn test_defaults_are_coerced_at_compile_time() {
    let schema = compile_schema(
        vec![
            FieldSpec::new("n", TypeTag::Int).with_default("12"),
            FieldSpec::new("f", TypeTag::Float).with_default(3),
        ],
        &SchemaOptions::default(),
    )
    .unwrap();
    assert_eq!(schema.field("n").unwrap().default(), Some(&Value::Int(12)));
    assert_eq!(schema.field("f").unwrap().default(), Some(&Value::Float(3.0)));
}

#[test]
fn test_incompatible_default_rejected() {
    let err = compile_schema(
        vec![FieldSpec::new("n", TypeTag::Int).with_default("twelve")],
        &SchemaOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::IncompatibleDefault { ref field, .. } if field == "n"));
    assert_eq!(err.class(), ErrorClass::Type);
}

#[test]
fn test_required_names_merge_both_sources() {
    let options = SchemaOptions::builder()
        .with_required_on_init(vec!["B".to_string()])
        .build();
    let schema = compile_schema(
        vec![
            FieldSpec::new("A", TypeTag::Str).required(),
            FieldSpec::new("B", TypeTag::Str).required(),
            FieldSpec::new("C", TypeTag::Str),
        ],
        &options,
    )
    .unwrap();
    assert_eq!(schema.required_names(), ["B", "A"]);
}

#[test]
fn test_undeclared_required_name_rejected() {
    let options = SchemaOptions::builder()
        .with_required_on_init(vec!["MISSING".to_string()])
        .build();
    let err = compile_schema(vec![FieldSpec::new("A", TypeTag::Str)], &options).unwrap_err();
    assert!(matches!(err, SchemaError::UndeclaredRequired { ref name } if name == "MISSING"));
}
