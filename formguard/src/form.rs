//! Form-level rule sets and error aggregation.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Serialize;

use crate::field::FieldValidation;
use crate::value::FieldValue;

/// Current values of a form, keyed by field name.
pub type FormValues = HashMap<String, FieldValue>;

/// Rules for every validated field of a form.
///
/// # Example
///
/// ```
/// use formguard::{FieldValidation, FormRules, FormValues};
///
/// let rules = FormRules::new()
///     .field("name", FieldValidation::new().required())
///     .field("email", FieldValidation::new().required().email());
///
/// let mut values = FormValues::new();
/// values.insert("name".into(), "Ada".into());
/// values.insert("email".into(), "ada@example.com".into());
///
/// assert!(rules.validate(&values).is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormRules {
    fields: BTreeMap<String, FieldValidation>,
}

impl FormRules {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the rules for a field.
    pub fn field(mut self, name: impl Into<String>, validation: FieldValidation) -> Self {
        self.insert(name, validation);
        self
    }

    /// Add (or replace) the rules for a field in place.
    pub fn insert(&mut self, name: impl Into<String>, validation: FieldValidation) {
        self.fields.insert(name.into(), validation);
    }

    /// Get the rules for a field.
    pub fn get(&self, name: &str) -> Option<&FieldValidation> {
        self.fields.get(name)
    }

    /// Names of all fields with rules.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over `(field, rules)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValidation)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields with rules.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field has rules.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate `values` against these rules.
    pub fn validate(&self, values: &FormValues) -> FormErrors {
        validate_form(values, self)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValidation)> for FormRules {
    fn from_iter<I: IntoIterator<Item = (K, FieldValidation)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Errors of a form, keyed by field name.
///
/// A field is present only while it is invalid, and then always with at least
/// one message. The form is valid iff this is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    /// Create an empty (valid) error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of validating `field`.
    ///
    /// `Some` stores the message as the field's only error; `None` clears it.
    pub fn set(&mut self, field: impl Into<String>, error: Option<String>) {
        let field = field.into();
        match error {
            Some(msg) => {
                self.errors.insert(field, vec![msg]);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// Remove every error.
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Same as [`is_valid`](Self::is_valid).
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get all messages of a field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Get the first message of a field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|msgs| msgs.first()).map(String::as_str)
    }

    /// Check if a field is invalid.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Names of invalid fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Get the first invalid field and its first message (if any).
    pub fn first_error(&self) -> Option<(&str, &str)> {
        self.errors
            .iter()
            .find_map(|(field, msgs)| msgs.first().map(|m| (field.as_str(), m.as_str())))
    }

    /// Iterate over `(field, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// Validate a whole record.
///
/// Every field with rules is checked; a field missing from `values` is
/// checked as [`FieldValue::Null`]. Values without rules are ignored.
/// Passing fields are omitted from the result.
pub fn validate_form(values: &FormValues, rules: &FormRules) -> FormErrors {
    let mut errors = FormErrors::new();
    for (field, validation) in rules.iter() {
        let value = values.get(field).unwrap_or(&FieldValue::Null);
        errors.set(field, validation.validate(value));
    }
    errors
}
