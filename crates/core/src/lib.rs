//! Climatiza core library.
//!
//! Schema-driven form validation and sanitization: primitive validators and
//! sanitizers, the rule table, the validation engine, and the preset schemas
//! used by the site's forms. Pure logic, no I/O.

pub mod error;
pub mod types;
pub mod validation;
