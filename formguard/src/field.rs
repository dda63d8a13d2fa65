//! Per-field rule configuration.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::rules::{self, NumericPolicy, RuleKind};
use crate::value::FieldValue;

/// Caller-supplied rule: returns a message when the value is invalid.
pub type CustomRule = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// A failed rule and the message reported for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The rule that failed.
    pub rule: RuleKind,
    /// Message after overrides have been applied.
    pub message: String,
}

/// Declarative rules for a single field.
///
/// Rules run in the fixed order of [`RuleKind::ALL`] and stop at the first
/// failure, so a field reports at most one message per pass.
///
/// # Example
///
/// ```
/// use formguard::{FieldValidation, RuleKind};
///
/// let username = FieldValidation::new()
///     .required()
///     .min_length(3)
///     .message(RuleKind::Required, "Username is required");
///
/// assert_eq!(
///     username.validate(&"".into()).as_deref(),
///     Some("Username is required")
/// );
/// assert_eq!(username.validate(&"bob".into()), None);
/// ```
#[derive(Clone, Default)]
pub struct FieldValidation {
    required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    email: bool,
    pattern: Option<Regex>,
    min: Option<f64>,
    max: Option<f64>,
    custom: Option<CustomRule>,
    messages: HashMap<RuleKind, String>,
    numeric_policy: NumericPolicy,
}

impl FieldValidation {
    /// Create a rule set with no rules; every value passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Require at least `min` characters (or list items).
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Allow at most `max` characters (or list items).
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require a valid email address when the value is non-empty.
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Require non-empty text to match `re`.
    pub fn pattern(mut self, re: Regex) -> Self {
        self.pattern = Some(re);
        self
    }

    /// Compile `pattern` and require non-empty text to match it.
    pub fn try_pattern(self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.pattern(Regex::new(pattern)?))
    }

    /// Require a numeric value of at least `min`.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Require a numeric value of at most `max`.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Add a caller-defined rule, evaluated after all built-in rules.
    pub fn custom<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(f));
        self
    }

    /// Replace the default message of `rule`.
    pub fn message(mut self, rule: RuleKind, msg: impl Into<String>) -> Self {
        self.messages.insert(rule, msg.into());
        self
    }

    /// Set how `min`/`max` treat unparsable input.
    pub fn numeric_policy(mut self, policy: NumericPolicy) -> Self {
        self.numeric_policy = policy;
        self
    }

    /// Check if the field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the configured numeric policy.
    pub fn policy(&self) -> NumericPolicy {
        self.numeric_policy
    }

    /// Get the message override for `rule` (if any).
    pub fn message_for(&self, rule: RuleKind) -> Option<&str> {
        self.messages.get(&rule).map(String::as_str)
    }

    /// Rules configured on this field, in evaluation order.
    pub fn rules(&self) -> Vec<RuleKind> {
        RuleKind::ALL
            .into_iter()
            .filter(|kind| self.has_rule(*kind))
            .collect()
    }

    /// Check if `rule` is configured on this field.
    pub fn has_rule(&self, rule: RuleKind) -> bool {
        match rule {
            RuleKind::Required => self.required,
            RuleKind::MinLength => self.min_length.is_some(),
            RuleKind::MaxLength => self.max_length.is_some(),
            RuleKind::Email => self.email,
            RuleKind::Pattern => self.pattern.is_some(),
            RuleKind::Min => self.min.is_some(),
            RuleKind::Max => self.max.is_some(),
            RuleKind::Custom => self.custom.is_some(),
        }
    }

    /// Run the rules and return the first violation.
    pub fn check(&self, value: &FieldValue) -> Option<Violation> {
        RuleKind::ALL.into_iter().find_map(|rule| {
            self.run(rule, value).map(|default| Violation {
                rule,
                message: self.messages.get(&rule).cloned().unwrap_or(default),
            })
        })
    }

    /// Run the rules and return the first error message.
    pub fn validate(&self, value: &FieldValue) -> Option<String> {
        self.check(value).map(|v| v.message)
    }

    fn run(&self, rule: RuleKind, value: &FieldValue) -> Option<String> {
        match rule {
            RuleKind::Required => self.required.then(|| rules::required(value)).flatten(),
            RuleKind::MinLength => self.min_length.and_then(|n| rules::min_length(value, n)),
            RuleKind::MaxLength => self.max_length.and_then(|n| rules::max_length(value, n)),
            RuleKind::Email => self.email.then(|| rules::email(value)).flatten(),
            RuleKind::Pattern => self.pattern.as_ref().and_then(|re| rules::pattern(value, re)),
            RuleKind::Min => self
                .min
                .and_then(|n| rules::min(value, n, self.numeric_policy)),
            RuleKind::Max => self
                .max
                .and_then(|n| rules::max(value, n, self.numeric_policy)),
            RuleKind::Custom => self.custom.as_ref().and_then(|f| f(value)),
        }
    }
}

impl fmt::Debug for FieldValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidation")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("email", &self.email)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("min", &self.min)
            .field("max", &self.max)
            .field("custom", &self.custom.is_some())
            .field("messages", &self.messages)
            .field("numeric_policy", &self.numeric_policy)
            .finish()
    }
}

/// Validate a single value against its rules.
///
/// Returns `None` when the value is valid.
pub fn validate_field(value: &FieldValue, validation: &FieldValidation) -> Option<String> {
    validation.validate(value)
}
