// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use serde_json::json;

use super::{coerce_value, conforms, decode, decode_text, encode, format_float};
use crate::error::CoerceError;
use crate::schema::mapping::{MappingOptions, MappingSchema};
use crate::schema::types::{FieldSpec, TypeTag};
use crate::schema::value::Value;

#[test]
fn test_decode_integer_from_text() {
    assert_eq!(decode_text(&TypeTag::Int, "20", false).unwrap(), Value::Int(20));
    assert_eq!(decode_text(&TypeTag::Int, " -7 ", true).unwrap(), Value::Int(-7));
}

#[test]
fn test_lenient_numeric_failure_passes_raw_text_through() {
    let value = decode_text(&TypeTag::Int, "twenty", false).unwrap();
    assert_eq!(value, Value::Str("twenty".to_string()));

    let value = decode_text(&TypeTag::Float, "1,5", false).unwrap();
    assert_eq!(value, Value::Str("1,5".to_string()));
}

#[test]
fn test_strict_numeric_failure_raises() {
    let err = decode_text(&TypeTag::Int, "twenty", true).unwrap_err();
    assert!(matches!(err, CoerceError::Invalid { .. }));
    insta::assert_snapshot!(err.to_string(), @r#"cannot decode "twenty" as int"#);
}

#[test]
fn test_decode_float_is_locale_independent() {
    assert_eq!(decode_text(&TypeTag::Float, "9.6", true).unwrap(), Value::Float(9.6));
    assert_eq!(decode(&TypeTag::Float, &json!(3), true).unwrap(), Value::Float(3.0));
}

#[test]
fn test_integral_float_becomes_integer() {
    assert_eq!(decode(&TypeTag::Int, &json!(2.0), true).unwrap(), Value::Int(2));
    assert!(decode(&TypeTag::Int, &json!(2.5), true).is_err());
}

#[test]
fn test_boolean_vocabulary() {
    let words = [
        ("true", true),
        ("Yes", true),
        ("ON", true),
        ("1", true),
        ("false", false),
        ("no", false),
        ("Off", false),
        ("0", false),
    ];
    for (word, expected) in words {
        assert_eq!(
            decode_text(&TypeTag::Bool, word, true).unwrap(),
            Value::Bool(expected),
            "word {word:?}"
        );
    }
    assert!(decode_text(&TypeTag::Bool, "maybe", true).is_err());
    assert_eq!(
        decode_text(&TypeTag::Bool, "maybe", false).unwrap(),
        Value::Str("maybe".to_string())
    );
}

#[test]
fn test_string_field_rejects_numbers_in_strict_mode() {
    let err = decode(&TypeTag::Str, &json!(123), true).unwrap_err();
    assert!(matches!(err, CoerceError::TypeMismatch { found: "number", .. }));
    assert_eq!(
        decode(&TypeTag::Str, &json!(123), false).unwrap(),
        Value::Str("123".to_string())
    );
}

#[test]
fn test_structured_map_from_json_text() {
    let value = decode_text(&TypeTag::Map, r#"{"foo": "bar"}"#, true).unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.get("foo"), Some(&json!("bar")));
}

#[test]
fn test_absent_raw_decodes_to_none() {
    for tag in [TypeTag::Str, TypeTag::Int, TypeTag::Map, TypeTag::List] {
        assert_eq!(decode(&tag, &json!(null), true).unwrap(), Value::None);
    }
}

#[test]
fn test_list_rejects_object_text() {
    assert!(decode_text(&TypeTag::List, r#"{"a": 1}"#, true).is_err());
    let value = decode_text(&TypeTag::List, "[1, 2, 3]", true).unwrap();
    assert_eq!(value.as_list().map(<[_]>::len), Some(3));
}

#[test]
fn test_matching_values_are_idempotent() {
    let values = [
        (TypeTag::Str, Value::from("x")),
        (TypeTag::Int, Value::Int(4)),
        (TypeTag::Float, Value::Float(0.5)),
        (TypeTag::Bool, Value::Bool(true)),
    ];
    for (tag, value) in values {
        assert!(conforms(&tag, &value));
        assert_eq!(coerce_value(&tag, value.clone(), true).unwrap(), value);
    }
}

#[test]
fn test_coerce_value_converts_text() {
    assert_eq!(
        coerce_value(&TypeTag::Int, Value::from("50"), true).unwrap(),
        Value::Int(50)
    );
}

#[test]
fn test_nested_schema_decodes_records() {
    let inner = MappingSchema::compile(
        vec![FieldSpec::new("foo", TypeTag::Str)],
        MappingOptions::builder().with_name("inner").build(),
    )
    .unwrap();
    let tag = TypeTag::Nested(inner.clone());

    let value = decode_text(&tag, r#"{"foo": "bar"}"#, true).unwrap();
    let record = value.as_record().unwrap();
    assert_eq!(record.get("foo").unwrap(), &Value::from("bar"));
    assert!(conforms(&tag, &value));
}

#[test]
fn test_encode_scalars() {
    insta::assert_snapshot!(encode(&TypeTag::Int, &Value::Int(100)).unwrap(), @"100");
    insta::assert_snapshot!(encode(&TypeTag::Float, &Value::Int(3)).unwrap(), @"3.0");
    insta::assert_snapshot!(encode(&TypeTag::Int, &Value::Float(3.0)).unwrap(), @"3");
    insta::assert_snapshot!(encode(&TypeTag::Bool, &Value::Bool(false)).unwrap(), @"false");
    assert_eq!(encode(&TypeTag::Str, &Value::None), None);
}

#[test]
fn test_encode_map_is_spaced_json() {
    let value = decode(&TypeTag::Map, &json!({"bing": "bong"}), true).unwrap();
    insta::assert_snapshot!(encode(&TypeTag::Map, &value).unwrap(), @r#"{"bing": "bong"}"#);

    let value = decode(&TypeTag::List, &json!([1, {"a": [true, null]}, []]), true).unwrap();
    insta::assert_snapshot!(encode(&TypeTag::List, &value).unwrap(), @r#"[1, {"a": [true, null]}, []]"#);
}

#[test]
fn test_format_float() {
    assert_eq!(format_float(2.0), "2.0");
    assert_eq!(format_float(9.6), "9.6");
    assert_eq!(format_float(f64::INFINITY), "inf");
}
