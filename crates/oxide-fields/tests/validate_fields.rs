//! Tests for rule-driven validation of submitted values.

mod common;
use common::*;

use oxide_fields::{
    validate_all, validate_field, FieldValue, RuleType, Rules, ValidationRule, Values,
};

#[test]
fn missing_required_field() {
    let mut values = Values::new();
    let rules = Rules::new().rule("name", ValidationRule::new().required());
    let errors = validate_all(&mut values, &rules);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("name"), Some(" is required"));
    assert!(!values.contains("name"));
}

#[test]
fn empty_required_field() {
    let mut values = query("name=");
    let rules = Rules::new().rule("name", ValidationRule::new().required());
    let errors = validate_all(&mut values, &rules);
    assert_eq!(errors.get("name"), Some(" is required"));
}

#[test]
fn maximum_length_exceeded() {
    let mut values = query("name=abc");
    let rules = Rules::new().rule("name", ValidationRule::new().max_length(2));
    let errors = validate_all(&mut values, &rules);
    assert_eq!(errors.get("name"), Some(" maximum length is 2"));
    assert_eq!(values.get_text("name"), Some("abc"));
}

#[test]
fn minimum_length_not_met() {
    let mut values = query("name=ab");
    let rules = Rules::new().rule("name", ValidationRule::new().min_length(3));
    let errors = validate_all(&mut values, &rules);
    assert_eq!(errors.get("name"), Some(" minimum length is 3"));
}

#[test]
fn boolean_is_coerced_in_place() {
    let mut values = query("flag=Y&other=no");
    let rules = Rules::new()
        .rule("flag", ValidationRule::new().of_type(RuleType::Boolean))
        .rule("other", ValidationRule::new().of_type(RuleType::Boolean));
    let errors = validate_all(&mut values, &rules);
    assert!(errors.is_empty());
    assert_eq!(values.get("flag"), Some(&FieldValue::Bool(true)));
    assert_eq!(values.get("other"), Some(&FieldValue::Bool(false)));
}

#[test]
fn missing_boolean_gets_text_default() {
    let mut values = Values::new();
    let rules = Rules::new().rule(
        "flag",
        ValidationRule::new()
            .of_type(RuleType::Boolean)
            .default_value("Y"),
    );
    let errors = validate_all(&mut values, &rules);
    assert!(errors.is_empty());
    // missing fields receive the default without running the type check
    assert_eq!(values.get("flag"), Some(&FieldValue::from("Y")));
}

#[test]
fn invalid_email() {
    let mut values = query("email=bad");
    let rules = Rules::new().rule("email", ValidationRule::new().of_type(RuleType::Email));
    let errors = validate_all(&mut values, &rules);
    assert_eq!(errors.get("email"), Some(" is an invalid email address"));
}

#[test]
fn valid_email() {
    let mut values = query("email=ada%40example.org");
    let rules = Rules::new().rule("email", ValidationRule::new().of_type(RuleType::Email));
    assert!(validate_all(&mut values, &rules).is_empty());
}

#[test]
fn integer_check() {
    let mut values = query("age=forty&height=1.82&count=12");
    let rules = Rules::new()
        .rule("age", ValidationRule::new().of_type(RuleType::Integer))
        .rule("height", ValidationRule::new().of_type(RuleType::Integer))
        .rule("count", ValidationRule::new().of_type(RuleType::Integer));
    let errors = validate_all(&mut values, &rules);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("age"), Some(" is not a number"));
}

#[test]
fn missing_optional_field_gets_default() {
    let mut values = Values::new();
    let rules = Rules::new().rule("x", ValidationRule::new().default_value("foo"));
    let errors = validate_all(&mut values, &rules);
    assert!(errors.is_empty());
    assert_eq!(values.get_text("x"), Some("foo"));
}

#[test]
fn missing_optional_field_without_default_gets_empty() {
    let mut values = Values::new();
    let rules = Rules::new().rule("x", ValidationRule::new().max_length(3));
    assert!(validate_all(&mut values, &rules).is_empty());
    assert_eq!(values.get_text("x"), Some(""));
}

#[test]
fn empty_optional_field_gets_default() {
    let mut values = query("x=");
    let rules = Rules::new().rule("x", ValidationRule::new().default_value("foo"));
    assert!(validate_all(&mut values, &rules).is_empty());
    assert_eq!(values.get_text("x"), Some("foo"));
}

#[test]
fn unruled_fields_are_untouched() {
    let mut values = query("extra=%3Cb%3E&name=Ada");
    let rules = Rules::new().rule("name", ValidationRule::new().required());
    let errors = validate_all(&mut values, &rules);
    assert!(errors.is_empty());
    assert!(!errors.contains("extra"));
    assert_eq!(values.get_text("extra"), Some("<b>"));
}

#[test]
fn every_failure_is_reported() {
    let mut values = query("title=Professor&email=nope");
    let rules = Rules::from_json(
        r#"{
            "title": {"required": true, "maxLength": 5},
            "firstName": {"maxLength": 50},
            "lastName": {"required": true, "maxLength": 50},
            "email": {"type": "email"}
        }"#,
    )
    .unwrap();

    let errors = validate_all(&mut values, &rules);
    let reported: Vec<_> = errors.iter().collect();
    assert_eq!(
        reported,
        [
            ("title", " maximum length is 5"),
            ("lastName", " is required"),
            ("email", " is an invalid email address"),
        ]
    );
    assert_eq!(values.get_text("firstName"), Some(""));
}

#[test]
fn validate_field_returns_coerced_value() {
    let rule = ValidationRule::new().of_type(RuleType::Boolean);
    assert_eq!(
        validate_field(&FieldValue::from("on"), &rule),
        Ok(FieldValue::Bool(true))
    );
}

#[test]
fn validate_field_leaves_input_alone() {
    let rule = ValidationRule::new().default_value("x");
    let value = FieldValue::from("");
    assert_eq!(validate_field(&value, &rule), Ok(FieldValue::from("x")));
    assert_eq!(value, FieldValue::from(""));
}
