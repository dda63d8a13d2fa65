//! Declarative form schemas loaded from JSON.
//!
//! A schema mirrors [`FieldValidation`] with plain data so rule sets can live
//! in configuration files:
//!
//! ```json
//! {
//!   "numericPolicy": "lenient",
//!   "fields": {
//!     "email": { "required": true, "email": true },
//!     "age": { "min": 18, "messages": { "min": "You must be an adult" } }
//!   }
//! }
//! ```
//!
//! Regular expressions are compiled and bounds are checked in
//! [`FormSchema::compile`], so a compiled [`FormRules`] never fails at
//! validation time.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::SchemaError;
use crate::field::FieldValidation;
use crate::form::FormRules;
use crate::rules::{NumericPolicy, RuleKind};

/// Rules for a single field, as written in a schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldSchema {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub email: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Overrides the schema-wide policy for this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_policy: Option<NumericPolicy>,
    /// Message overrides keyed by rule name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub messages: HashMap<RuleKind, String>,
}

impl FieldSchema {
    /// Compile into a [`FieldValidation`], checking the pattern and bounds.
    pub fn compile(
        &self,
        field: &str,
        default_policy: NumericPolicy,
    ) -> Result<FieldValidation, SchemaError> {
        if let (Some(min), Some(max)) = (self.min_length, self.max_length)
            && min > max
        {
            return Err(SchemaError::InvalidLengthBounds {
                field: field.to_string(),
                min,
                max,
            });
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(SchemaError::InvalidRange {
                field: field.to_string(),
                min,
                max,
            });
        }

        let mut validation = FieldValidation::new()
            .numeric_policy(self.numeric_policy.unwrap_or(default_policy));

        if self.required {
            validation = validation.required();
        }
        if let Some(n) = self.min_length {
            validation = validation.min_length(n);
        }
        if let Some(n) = self.max_length {
            validation = validation.max_length(n);
        }
        if self.email {
            validation = validation.email();
        }
        if let Some(pattern) = &self.pattern {
            let re = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
                field: field.to_string(),
                source,
            })?;
            validation = validation.pattern(re);
        }
        if let Some(n) = self.min {
            validation = validation.min(n);
        }
        if let Some(n) = self.max {
            validation = validation.max(n);
        }
        for (rule, msg) in &self.messages {
            validation = validation.message(*rule, msg.clone());
        }

        Ok(validation)
    }
}

/// A form's rules, as written in a schema file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormSchema {
    /// Policy for fields that do not set their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_policy: Option<NumericPolicy>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldSchema>,
}

impl FormSchema {
    /// Parse a schema from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
        log::debug!("Loaded schema from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Compile every field, using [`NumericPolicy::Lenient`] as the fallback policy.
    pub fn compile(&self) -> Result<FormRules, SchemaError> {
        self.compile_with(NumericPolicy::default())
    }

    /// Compile every field.
    ///
    /// A field's own policy wins over the schema's, which wins over
    /// `default_policy`.
    pub fn compile_with(&self, default_policy: NumericPolicy) -> Result<FormRules, SchemaError> {
        let policy = self.numeric_policy.unwrap_or(default_policy);
        let mut rules = FormRules::new();
        for (field, schema) in &self.fields {
            rules.insert(field.clone(), schema.compile(field, policy)?);
        }
        log::debug!("Compiled schema with {} fields", rules.len());
        Ok(rules)
    }
}
