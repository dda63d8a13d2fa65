//! Tests for JSON schemas.

use std::io::Write;

use formguard::prelude::*;

const SIGNUP: &str = r#"{
    "fields": {
        "username": { "required": true, "minLength": 3, "maxLength": 20,
                      "pattern": "^[a-z0-9_]+$" },
        "email": { "required": true, "email": true,
                   "messages": { "email": "Bad email" } },
        "age": { "min": 18, "max": 120 }
    }
}"#;

fn values(pairs: &[(&str, FieldValue)]) -> FormValues {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_compile_and_validate() {
    let rules = FormSchema::from_json_str(SIGNUP).unwrap().compile().unwrap();
    assert_eq!(rules.len(), 3);

    let errors = rules.validate(&values(&[
        ("username", "Bad Name".into()),
        ("email", "nope".into()),
        ("age", 17.into()),
    ]));
    assert_eq!(errors.first("username"), Some("Invalid format"));
    assert_eq!(errors.first("email"), Some("Bad email"));
    assert_eq!(errors.first("age"), Some("Must be at least 18"));
}

#[test]
fn test_field_rules_match_schema() {
    let rules = FormSchema::from_json_str(SIGNUP).unwrap().compile().unwrap();
    let username = rules.get("username").unwrap();
    assert_eq!(
        username.rules(),
        vec![
            RuleKind::Required,
            RuleKind::MinLength,
            RuleKind::MaxLength,
            RuleKind::Pattern
        ]
    );
}

#[test]
fn test_unknown_key_rejected() {
    let err = FormSchema::from_json_str(r#"{"fields": {"a": {"requried": true}}}"#).unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
}

#[test]
fn test_unknown_message_rule_rejected() {
    let err = FormSchema::from_json_str(r#"{"fields": {"a": {"messages": {"nope": "x"}}}}"#)
        .unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
}

#[test]
fn test_invalid_pattern_names_field() {
    let schema = FormSchema::from_json_str(r#"{"fields": {"zip": {"pattern": "(\\d"}}}"#).unwrap();
    let err = schema.compile().unwrap_err();
    assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    assert_eq!(err.field(), Some("zip"));
}

#[test]
fn test_inconsistent_bounds_rejected() {
    let schema =
        FormSchema::from_json_str(r#"{"fields": {"a": {"minLength": 5, "maxLength": 2}}}"#).unwrap();
    assert!(matches!(
        schema.compile(),
        Err(SchemaError::InvalidLengthBounds { min: 5, max: 2, .. })
    ));

    let schema = FormSchema::from_json_str(r#"{"fields": {"a": {"min": 10, "max": 1}}}"#).unwrap();
    assert!(matches!(
        schema.compile(),
        Err(SchemaError::InvalidRange { .. })
    ));
}

#[test]
fn test_numeric_policy_precedence() {
    let json = r#"{
        "numericPolicy": "strict",
        "fields": {
            "a": { "min": 1 },
            "b": { "min": 1, "numericPolicy": "lenient" }
        }
    }"#;
    let rules = FormSchema::from_json_str(json).unwrap().compile().unwrap();
    assert_eq!(rules.get("a").unwrap().policy(), NumericPolicy::Strict);
    assert_eq!(rules.get("b").unwrap().policy(), NumericPolicy::Lenient);

    let rules = FormSchema::from_json_str(r#"{"fields": {"a": {"min": 1}}}"#)
        .unwrap()
        .compile_with(NumericPolicy::Strict)
        .unwrap();
    assert_eq!(rules.get("a").unwrap().policy(), NumericPolicy::Strict);
}

#[test]
fn test_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SIGNUP.as_bytes()).unwrap();

    let schema = FormSchema::from_path(file.path()).unwrap();
    assert_eq!(schema.fields.len(), 3);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = FormSchema::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.json"));
}
