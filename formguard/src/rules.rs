//! Primitive validation rules.
//!
//! Every rule is a pure function of a value and its parameter. A rule returns
//! `None` when the value passes and its default message when it fails.

use std::fmt;
use std::str::FromStr;

use email_address::EmailAddress;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::value::FieldValue;

/// Default message for `required`.
pub const REQUIRED_MESSAGE: &str = "This field is required";
/// Default message for `email`.
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
/// Default message for `pattern`.
pub const PATTERN_MESSAGE: &str = "Invalid format";
/// Message for unparsable numeric input under [`NumericPolicy::Strict`].
pub const NOT_A_NUMBER_MESSAGE: &str = "Must be a valid number";

/// The closed set of rules a field can be configured with.
///
/// Declaration order is evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Email,
    Pattern,
    Min,
    Max,
    Custom,
}

impl RuleKind {
    /// All rules in evaluation order.
    pub const ALL: [RuleKind; 8] = [
        RuleKind::Required,
        RuleKind::MinLength,
        RuleKind::MaxLength,
        RuleKind::Email,
        RuleKind::Pattern,
        RuleKind::Min,
        RuleKind::Max,
        RuleKind::Custom,
    ];

    /// Name used in schemas and message overrides.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::MinLength => "minLength",
            RuleKind::MaxLength => "maxLength",
            RuleKind::Email => "email",
            RuleKind::Pattern => "pattern",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
            RuleKind::Custom => "custom",
        }
    }

    /// Default message template, with `N` standing for the rule parameter.
    pub fn message_template(&self) -> &'static str {
        match self {
            RuleKind::Required => REQUIRED_MESSAGE,
            RuleKind::MinLength => "Must be at least N characters",
            RuleKind::MaxLength => "Must be no more than N characters",
            RuleKind::Email => EMAIL_MESSAGE,
            RuleKind::Pattern => PATTERN_MESSAGE,
            RuleKind::Min => "Must be at least N",
            RuleKind::Max => "Must be no more than N",
            RuleKind::Custom => "(caller-defined)",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown rule name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule '{0}'")]
pub struct UnknownRule(pub String);

impl FromStr for RuleKind {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// How `min`/`max` treat input that cannot be read as a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericPolicy {
    /// Unparsable input passes the numeric rules.
    #[default]
    Lenient,
    /// Non-empty unparsable input fails the first numeric rule.
    Strict,
}

/// Fails on null, the empty string and the empty list.
pub fn required(value: &FieldValue) -> Option<String> {
    value.is_empty().then(|| REQUIRED_MESSAGE.to_string())
}

/// Fails when a text or list value is shorter than `min`.
pub fn min_length(value: &FieldValue, min: usize) -> Option<String> {
    match value.length() {
        Some(len) if len < min => Some(format!("Must be at least {min} characters")),
        _ => None,
    }
}

/// Fails when a text or list value is longer than `max`.
pub fn max_length(value: &FieldValue, max: usize) -> Option<String> {
    match value.length() {
        Some(len) if len > max => Some(format!("Must be no more than {max} characters")),
        _ => None,
    }
}

/// Fails when non-empty text is not shaped like `local@domain.tld`.
pub fn email(value: &FieldValue) -> Option<String> {
    match value.as_text() {
        Some(s) if !s.is_empty() && !is_email(s) => Some(EMAIL_MESSAGE.to_string()),
        _ => None,
    }
}

/// Fails when non-empty text does not match `re` anywhere.
pub fn pattern(value: &FieldValue, re: &Regex) -> Option<String> {
    match value.as_text() {
        Some(s) if !s.is_empty() && !re.is_match(s) => Some(PATTERN_MESSAGE.to_string()),
        _ => None,
    }
}

/// Fails when the numeric value is below `min`.
pub fn min(value: &FieldValue, min: f64, policy: NumericPolicy) -> Option<String> {
    match numeric(value, policy) {
        Numeric::Number(n) if n < min => Some(format!("Must be at least {min}")),
        Numeric::Invalid => Some(NOT_A_NUMBER_MESSAGE.to_string()),
        _ => None,
    }
}

/// Fails when the numeric value is above `max`.
pub fn max(value: &FieldValue, max: f64, policy: NumericPolicy) -> Option<String> {
    match numeric(value, policy) {
        Numeric::Number(n) if n > max => Some(format!("Must be no more than {max}")),
        Numeric::Invalid => Some(NOT_A_NUMBER_MESSAGE.to_string()),
        _ => None,
    }
}

enum Numeric {
    Number(f64),
    Skip,
    Invalid,
}

fn numeric(value: &FieldValue, policy: NumericPolicy) -> Numeric {
    match value.as_number() {
        Some(n) => Numeric::Number(n),
        None if policy == NumericPolicy::Strict && !value.is_empty() => Numeric::Invalid,
        None => Numeric::Skip,
    }
}

fn is_email(s: &str) -> bool {
    let Ok(addr) = EmailAddress::from_str(s) else {
        return false;
    };
    // Display-name forms like `Name <a@b.com>` parse too; only bare addresses count.
    if addr.email() != s {
        return false;
    }
    // Quoted local parts and address literals are RFC-valid but not `local@domain.tld`.
    let local = addr.local_part();
    if local.chars().any(|c| c.is_whitespace() || c == '"') {
        return false;
    }
    let domain = addr.domain();
    !domain.starts_with('[')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
