//! Caller-owned form state: values, touched and dirty flags, errors.
//!
//! The state owns no validation logic. Every stored error is re-derived from
//! the field's current value and its [`FieldValidation`](crate::FieldValidation).

use std::collections::HashSet;

use crate::form::{FormErrors, FormRules, FormValues};
use crate::value::FieldValue;

/// Validation state of one form instance.
///
/// # Example
///
/// ```
/// use formguard::{FieldValidation, FormRules, FormValidationState, FormValues};
///
/// let rules = FormRules::new().field("name", FieldValidation::new().required());
/// let mut form = FormValidationState::new(rules, FormValues::new());
///
/// form.set_value("name", "");
/// assert_eq!(form.visible_error("name"), None); // not touched yet
///
/// form.blur("name");
/// assert_eq!(form.visible_error("name"), Some("This field is required"));
///
/// form.set_value("name", "Ada");
/// assert!(form.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct FormValidationState {
    rules: FormRules,
    initial: FormValues,
    values: FormValues,
    errors: FormErrors,
    touched: HashSet<String>,
    dirty: HashSet<String>,
}

impl FormValidationState {
    /// Create state for a form with the given initial values.
    ///
    /// No validation runs until a field changes, blurs, or the form is
    /// submitted.
    pub fn new(rules: FormRules, initial: FormValues) -> Self {
        Self {
            rules,
            values: initial.clone(),
            initial,
            errors: FormErrors::new(),
            touched: HashSet::new(),
            dirty: HashSet::new(),
        }
    }

    /// Store a new value for `field` and re-validate it.
    pub fn set_value(&mut self, field: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        let initial = self.initial.get(field).unwrap_or(&FieldValue::Null);
        if &value == initial {
            self.dirty.remove(field);
        } else {
            self.dirty.insert(field.to_string());
        }
        self.values.insert(field.to_string(), value);
        self.validate_field(field);
    }

    /// Mark `field` as touched and re-validate it.
    pub fn blur(&mut self, field: &str) {
        if self.touched.insert(field.to_string()) {
            log::debug!("Field '{}' touched", field);
        }
        self.validate_field(field);
    }

    /// Re-validate a single field. Returns `true` if it is valid.
    pub fn validate_field(&mut self, field: &str) -> bool {
        let Some(validation) = self.rules.get(field) else {
            return true;
        };
        let value = self.values.get(field).unwrap_or(&FieldValue::Null);
        let error = validation.validate(value);
        let valid = error.is_none();
        self.errors.set(field, error);
        valid
    }

    /// Re-validate every field with rules. Returns `true` if the form is valid.
    pub fn validate_all(&mut self) -> bool {
        self.errors = self.rules.validate(&self.values);
        self.errors.is_valid()
    }

    /// Touch every field with rules and validate the whole form.
    ///
    /// Returns `true` if the form may be submitted.
    pub fn submit(&mut self) -> bool {
        let names: Vec<String> = self.rules.field_names().map(str::to_string).collect();
        self.touched.extend(names);
        let valid = self.validate_all();
        log::debug!(
            "Form submitted: valid={}, invalid_fields={}",
            valid,
            self.errors.len()
        );
        valid
    }

    /// Restore initial values and clear errors and flags.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.dirty.clear();
        log::debug!("Form reset");
    }

    /// Get the current value of a field.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Get all current values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Get the rules this state validates against.
    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    /// Get the errors from the last validation of each field.
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Get the current error of a field, touched or not.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.first(field)
    }

    /// Get the error of a field only once the user has touched it.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    /// Check if the user has left the field at least once.
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Check if the field's value differs from its initial value.
    pub fn is_dirty(&self, field: &str) -> bool {
        self.dirty.contains(field)
    }

    /// Check if any field differs from its initial value.
    pub fn is_form_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Check if no field currently has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_valid()
    }
}
