//! Primitive sanitizers: pure `&str -> String` transforms applied to a raw
//! value before any validation check runs.
//!
//! # Limitation
//!
//! [`xss`] is a denylist. It removes `<script>` blocks, `javascript:` and
//! inline `on<event>=` assignments and nothing else. It does not parse HTML
//! and is no substitute for output encoding ([`html`]) or a
//! Content-Security-Policy.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static SCRIPT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid regex"));

static JAVASCRIPT_SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("valid regex"));

static EVENT_HANDLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on\w+\s*=").expect("valid regex"));

static SLUG_DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid regex"));

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static HYPHEN_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid regex"));

/// Escape HTML-significant characters in a single pass.
///
/// `&`, `<`, `>`, `"`, `'` and `/` become entities. Text inserted by this
/// pass is never escaped again, so `&` in the input yields exactly `&amp;`.
pub fn html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Strip `'`, `"`, `;` and `\`.
pub fn sql(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | ';' | '\\'))
        .collect()
}

/// Best-effort removal of script injection vectors.
///
/// Removes, in order: `<script>...</script>` blocks (case-insensitive,
/// shortest match, across newlines), `javascript:` and `on<word>=`. Any other
/// markup passes through untouched; see the module docs.
pub fn xss(value: &str) -> String {
    let without_scripts = SCRIPT_BLOCK_RE.replace_all(value, "");
    let without_scheme = JAVASCRIPT_SCHEME_RE.replace_all(&without_scripts, "");
    EVENT_HANDLER_RE
        .replace_all(&without_scheme, "")
        .into_owned()
}

pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

pub fn lowercase(value: &str) -> String {
    value.to_lowercase()
}

pub fn uppercase(value: &str) -> String {
    value.to_uppercase()
}

/// Turn free text into a URL slug: `"Olá Mundo!"` becomes `"ola-mundo"`.
///
/// Idempotent.
pub fn slug(value: &str) -> String {
    let folded: String = value
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    let kept = SLUG_DISALLOWED_RE.replace_all(&folded, "");
    let hyphenated = WHITESPACE_RUN_RE.replace_all(&kept, "-");
    let collapsed = HYPHEN_RUN_RE.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Format a Brazilian phone number from whatever digits the input holds.
///
/// 11 digits become `(DD) DDDDD-DDDD`, 10 digits `(DD) DDDD-DDDD`. Any other
/// digit count returns the input unchanged.
pub fn phone(value: &str) -> String {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => value.to_string(),
    }
}
