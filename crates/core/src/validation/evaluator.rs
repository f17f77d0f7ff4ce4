//! Validation engine. Pure logic, no I/O.
//!
//! Each schema field runs through a fixed pipeline and stops at the first
//! failure:
//!
//! ```text
//! required -> sanitize -> type -> length -> pattern -> custom
//! ```
//!
//! An optional field that is absent or blank skips the whole pipeline and is
//! passed through unchanged. Fields never influence each other.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde_json::Value;

use super::messages::Locale;
use super::rules::{
    CustomOutcome, FieldOutcome, FieldType, Rule, Schema, ValidationResult, Violation,
    ViolationKind,
};
use super::validators;
use crate::types::Record;

/// Validate a record against a schema with pt-BR messages.
pub fn validate(schema: &Schema, record: &Record) -> ValidationResult {
    validate_with_locale(schema, record, Locale::default())
}

/// Validate a record against a schema, rendering messages in `locale`.
///
/// Every schema field lands in exactly one of `errors` or `sanitized`.
/// Record keys the schema does not declare are ignored.
pub fn validate_with_locale(schema: &Schema, record: &Record, locale: Locale) -> ValidationResult {
    let mut errors = IndexMap::new();
    let mut sanitized = IndexMap::new();

    for (name, rule) in schema.fields() {
        let raw = record.get(name).unwrap_or(&Value::Null);
        match validate_field(rule, raw, locale) {
            FieldOutcome::Accepted(value) => {
                sanitized.insert(name.to_string(), value);
            }
            FieldOutcome::Rejected(violation) => {
                errors.insert(name.to_string(), violation.message);
            }
        }
    }

    tracing::debug!(
        fields = schema.len(),
        errors = errors.len(),
        "Validated record"
    );

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        sanitized,
    }
}

/// Run a single raw value through `rule`.
pub fn validate_field(rule: &Rule, raw: &Value, locale: Locale) -> FieldOutcome {
    match check_field(rule, raw) {
        Ok(value) => FieldOutcome::Accepted(value),
        Err(kind) => FieldOutcome::Rejected(Violation {
            message: locale.message(&kind),
            kind,
        }),
    }
}

fn check_field(rule: &Rule, raw: &Value) -> Result<Value, ViolationKind> {
    if !validators::required(raw) {
        return if rule.required {
            Err(ViolationKind::Required)
        } else {
            Ok(raw.clone())
        };
    }

    let value = apply_sanitizer(rule, raw);
    let value = check_type(rule, value)?;
    check_length(rule, &value)?;
    check_pattern(rule, &value)?;
    check_custom(rule, &value)?;
    Ok(value)
}

/// Sanitizers only see strings; other JSON values pass through.
fn apply_sanitizer(rule: &Rule, raw: &Value) -> Value {
    match (&rule.sanitize, raw) {
        (Some(sanitize), Value::String(s)) => Value::String(sanitize(s)),
        _ => raw.clone(),
    }
}

fn check_type(rule: &Rule, value: Value) -> Result<Value, ViolationKind> {
    let (check, violation): (fn(&str) -> bool, ViolationKind) = match rule.field_type {
        None | Some(FieldType::String) => return Ok(value),
        Some(FieldType::Number) => return coerce_number(value),
        Some(FieldType::Email) => (validators::email, ViolationKind::InvalidEmail),
        Some(FieldType::Phone) => (validators::phone, ViolationKind::InvalidPhone),
        Some(FieldType::Url) => (validators::url, ViolationKind::InvalidUrl),
    };

    match textual(&value) {
        Some(text) if check(&text) => Ok(value),
        _ => Err(violation),
    }
}

fn coerce_number(value: Value) -> Result<Value, ViolationKind> {
    match value {
        Value::Number(_) => Ok(value),
        Value::String(s) => validators::parse_number(&s)
            .map(Value::Number)
            .ok_or(ViolationKind::NotANumber),
        _ => Err(ViolationKind::NotANumber),
    }
}

/// Text form used by format checks. Arrays and objects have none.
fn textual(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

fn check_length(rule: &Rule, value: &Value) -> Result<(), ViolationKind> {
    let Value::String(s) = value else {
        return Ok(());
    };
    if let Some(min) = rule.min_length {
        if !validators::min_length(s, min) {
            return Err(ViolationKind::TooShort { min });
        }
    }
    if let Some(max) = rule.max_length {
        if !validators::max_length(s, max) {
            return Err(ViolationKind::TooLong { max });
        }
    }
    Ok(())
}

fn check_pattern(rule: &Rule, value: &Value) -> Result<(), ViolationKind> {
    match (&rule.pattern, value) {
        (Some(pattern), Value::String(s)) if !pattern.is_full_match(s) => {
            Err(ViolationKind::InvalidFormat)
        }
        _ => Ok(()),
    }
}

fn check_custom(rule: &Rule, value: &Value) -> Result<(), ViolationKind> {
    let Some(custom) = &rule.custom else {
        return Ok(());
    };
    match custom(value) {
        CustomOutcome::Pass => Ok(()),
        CustomOutcome::Reject => Err(ViolationKind::Invalid),
        CustomOutcome::RejectWith(msg) => Err(ViolationKind::Custom(msg)),
    }
}
