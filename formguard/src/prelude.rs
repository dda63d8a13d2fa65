//! Prelude module for convenient imports.
//!
//! ```
//! use formguard::prelude::*;
//! ```

// Engine
pub use crate::field::{FieldValidation, validate_field};
pub use crate::form::{FormErrors, FormRules, FormValues, validate_form};
pub use crate::rules::{NumericPolicy, RuleKind};
pub use crate::value::FieldValue;

// Caller-owned state
pub use crate::state::FormValidationState;

// Schemas
pub use crate::error::SchemaError;
pub use crate::schema::FormSchema;
