//! Form validation engine.
//!
//! Primitive validators and sanitizers, the rule table, a pure evaluator, and
//! the preset schemas used by the site's forms, all without I/O.
//!
//! The `xss` sanitizer is a denylist and does not replace output encoding or
//! a Content-Security-Policy; see [`sanitizers`].

pub mod evaluator;
pub mod messages;
pub mod presets;
pub mod rules;
pub mod sanitizers;
pub mod validators;

pub use evaluator::{validate, validate_field, validate_with_locale};
pub use messages::Locale;
pub use rules::{CustomOutcome, FieldType, Rule, Schema, ValidationResult};
