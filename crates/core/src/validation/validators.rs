//! Primitive validators: pure predicates over a single value.
//!
//! Every function here is total. Malformed input yields `false`, never a
//! panic.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use validator::ValidateUrl;

/// Permissive `local@domain.tld` shape. Not RFC 5322.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Brazilian phone number, already formatted: `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`.
pub const PHONE_PATTERN: &str = r"^\(\d{2}\) \d{4,5}-\d{4}$";

/// Lowercase alphanumeric segments separated by single hyphens.
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("valid regex"));

/// True when the value is present: not `null` and, for strings, not blank
/// after trimming.
pub fn required(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

pub fn email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Strictly formatted phone numbers only. Run the phone sanitizer first when
/// the input may be bare digits.
pub fn phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// True iff the value parses as an absolute URL.
pub fn url(value: &str) -> bool {
    value.validate_url()
}

/// Inclusive lower bound on the number of characters.
pub fn min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Inclusive upper bound on the number of characters.
pub fn max_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

pub fn slug(value: &str) -> bool {
    SLUG_RE.is_match(value)
}

/// Non-empty and made of ASCII letters and digits only.
pub fn alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// True when the trimmed value parses as a finite number.
pub fn numeric(value: &str) -> bool {
    parse_number(value).is_some()
}

/// Parse a textual number the way form inputs are read: surrounding
/// whitespace is ignored, integral text stays integral, non-finite values
/// are rejected.
pub(crate) fn parse_number(value: &str) -> Option<serde_json::Number> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Some(int.into());
    }
    // `f64::from_str` accepts "inf" and "NaN"; `from_f64` rejects both.
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
}
