//! Form validation engine.
//!
//! Declarative per-field rules are evaluated in a fixed order, stopping at the
//! first failure, and per-field results are aggregated across a whole form.
//! The engine is pure: the same value and rules always give the same result.
//!
//! # Example
//!
//! ```
//! use formguard::{validate_field, validate_form, FieldValidation, FormRules, FormValues};
//!
//! let age = FieldValidation::new().required().min(18.0);
//! assert_eq!(validate_field(&"17".into(), &age).as_deref(), Some("Must be at least 18"));
//! assert_eq!(validate_field(&"18".into(), &age), None);
//!
//! let rules = FormRules::new()
//!     .field("a", FieldValidation::new().required())
//!     .field("b", FieldValidation::new().required());
//!
//! let mut values = FormValues::new();
//! values.insert("a".into(), "".into());
//! values.insert("b".into(), "ok".into());
//!
//! let errors = validate_form(&values, &rules);
//! assert_eq!(errors.get("a"), Some(&["This field is required".to_string()][..]));
//! assert!(!errors.contains("b"));
//! ```

pub mod error;
pub mod prelude;
pub mod rules;
pub mod schema;
pub mod state;

mod field;
mod form;
mod value;

pub use error::SchemaError;
pub use field::{CustomRule, FieldValidation, Violation, validate_field};
pub use form::{FormErrors, FormRules, FormValues, validate_form};
pub use rules::{NumericPolicy, RuleKind};
pub use schema::{FieldSchema, FormSchema};
pub use state::FormValidationState;
pub use value::FieldValue;
