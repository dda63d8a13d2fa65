//! Tests for caller-owned form state.

use formguard::prelude::*;

fn signup_rules() -> FormRules {
    FormRules::new()
        .field("username", FieldValidation::new().required().min_length(3))
        .field("email", FieldValidation::new().required().email())
}

fn signup_form() -> FormValidationState {
    FormValidationState::new(signup_rules(), FormValues::new())
}

#[test]
fn test_no_errors_before_interaction() {
    let form = signup_form();
    assert!(form.is_valid());
    assert!(form.errors().is_empty());
    assert!(!form.is_touched("username"));
}

#[test]
fn test_change_validates_field() {
    let mut form = signup_form();
    form.set_value("username", "ab");
    assert_eq!(form.error("username"), Some("Must be at least 3 characters"));
    assert!(!form.errors().contains("email"));

    form.set_value("username", "abc");
    assert_eq!(form.error("username"), None);
}

#[test]
fn test_visible_error_requires_touch() {
    let mut form = signup_form();
    form.set_value("email", "nope");
    assert!(form.error("email").is_some());
    assert_eq!(form.visible_error("email"), None);

    form.blur("email");
    assert!(form.is_touched("email"));
    assert_eq!(
        form.visible_error("email"),
        Some("Please enter a valid email address")
    );
}

#[test]
fn test_blur_validates_untouched_empty_field() {
    let mut form = signup_form();
    form.blur("username");
    assert_eq!(form.visible_error("username"), Some("This field is required"));
}

#[test]
fn test_submit_touches_and_validates_everything() {
    let mut form = signup_form();
    form.set_value("username", "ada");

    assert!(!form.submit());
    assert!(form.is_touched("username"));
    assert!(form.is_touched("email"));
    assert_eq!(form.visible_error("email"), Some("This field is required"));

    form.set_value("email", "ada@example.com");
    assert!(form.submit());
    assert!(form.is_valid());
}

#[test]
fn test_dirty_tracks_initial_values() {
    let mut initial = FormValues::new();
    initial.insert("username".to_string(), "ada".into());
    let mut form = FormValidationState::new(signup_rules(), initial);

    assert!(!form.is_form_dirty());
    form.set_value("username", "bob");
    assert!(form.is_dirty("username"));
    assert!(form.is_form_dirty());

    form.set_value("username", "ada");
    assert!(!form.is_dirty("username"));
    assert!(!form.is_form_dirty());
}

#[test]
fn test_reset_restores_initial_state() {
    let mut initial = FormValues::new();
    initial.insert("username".to_string(), "ada".into());
    let mut form = FormValidationState::new(signup_rules(), initial);

    form.set_value("username", "x");
    form.submit();
    assert!(!form.is_valid());

    form.reset();
    assert!(form.is_valid());
    assert!(!form.is_touched("username"));
    assert!(!form.is_form_dirty());
    assert_eq!(form.value("username"), Some(&FieldValue::from("ada")));
}

#[test]
fn test_fields_without_rules_are_always_valid() {
    let mut form = signup_form();
    form.set_value("nickname", "");
    assert!(form.validate_field("nickname"));
    assert_eq!(form.error("nickname"), None);
    assert_eq!(form.value("nickname"), Some(&FieldValue::from("")));
}

#[test]
fn test_state_matches_stateless_validation() {
    let mut form = signup_form();
    form.set_value("username", "ab");
    form.set_value("email", "a@b.com");
    form.validate_all();
    assert_eq!(form.errors(), &validate_form(form.values(), form.rules()));
}
