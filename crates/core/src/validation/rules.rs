//! Rule table, schema and result types.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Semantic type check applied after sanitization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Implicit default: no format check.
    String,
    /// Accepts JSON numbers and numeric text; the sanitized value becomes a number.
    Number,
    Email,
    Url,
    Phone,
}

/// Verdict of a caller-supplied custom check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOutcome {
    Pass,
    /// Rejected with the engine's generic "invalid field" message.
    Reject,
    /// Rejected with a caller-supplied message.
    RejectWith(String),
}

impl From<bool> for CustomOutcome {
    fn from(ok: bool) -> Self {
        if ok {
            Self::Pass
        } else {
            Self::Reject
        }
    }
}

impl From<Result<(), String>> for CustomOutcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(msg) => Self::RejectWith(msg),
        }
    }
}

/// Pure string transform applied to the raw value before any check.
pub type SanitizeFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Predicate over the sanitized working value.
pub type CustomCheck = Arc<dyn Fn(&Value) -> CustomOutcome + Send + Sync>;

/// Constraints for one field.
///
/// A flat set of optional members; everything left unset is a no-op.
/// Built with the consuming builder methods and never mutated afterwards.
///
/// ```
/// use climatiza_core::validation::rules::{FieldType, Rule};
/// use climatiza_core::validation::sanitizers;
///
/// let rule = Rule::required()
///     .sanitize(sanitizers::trim)
///     .of_type(FieldType::Email)
///     .max_length(254);
/// assert!(rule.is_required());
/// ```
#[derive(Clone, Default)]
pub struct Rule {
    pub(crate) required: bool,
    pub(crate) field_type: Option<FieldType>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) pattern: Option<FieldPattern>,
    pub(crate) custom: Option<CustomCheck>,
    pub(crate) sanitize: Option<SanitizeFn>,
}

impl Rule {
    /// A rule for a field that must be present and non-blank.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// A rule for a field that may be absent. Absent or blank values skip
    /// every other check.
    pub fn optional() -> Self {
        Self::default()
    }

    pub fn of_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Require string values to fully match `source`.
    pub fn pattern(mut self, source: &str) -> Result<Self, CoreError> {
        self.pattern = Some(FieldPattern::new(source)?);
        Ok(self)
    }

    pub fn custom<F, O>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> O + Send + Sync + 'static,
        O: Into<CustomOutcome>,
    {
        self.custom = Some(Arc::new(move |value: &Value| -> CustomOutcome {
            check(value).into()
        }));
        self
    }

    /// Set the sanitizer, replacing any previous one.
    pub fn sanitize<F>(mut self, sanitizer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.sanitize = Some(Arc::new(sanitizer));
        self
    }

    /// Append a sanitizer that runs after the current one.
    pub fn then_sanitize<F>(mut self, sanitizer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let chained: SanitizeFn = match self.sanitize.take() {
            Some(first) => Arc::new(move |value: &str| sanitizer(&first(value))),
            None => Arc::new(sanitizer),
        };
        self.sanitize = Some(chained);
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn field_type(&self) -> Option<FieldType> {
        self.field_type
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("required", &self.required)
            .field("field_type", &self.field_type)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(FieldPattern::source))
            .field("custom", &self.custom.is_some())
            .field("sanitize", &self.sanitize.is_some())
            .finish()
    }
}

/// A compiled, fully anchored field pattern.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    source: String,
    anchored: Regex,
}

impl FieldPattern {
    pub fn new(source: &str) -> Result<Self, CoreError> {
        let anchored =
            Regex::new(&format!("^(?:{source})$")).map_err(|e| CoreError::InvalidPattern {
                pattern: source.to_string(),
                source: e,
            })?;
        Ok(Self {
            source: source.to_string(),
            anchored,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, value: &str) -> bool {
        self.anchored.is_match(value)
    }
}

/// Ordered, immutable mapping from field name to rule.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: IndexMap<String, Rule>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn get(&self, field: &str) -> Option<&Rule> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Collects fields for a [`Schema`]. Duplicate names are reported by
/// [`SchemaBuilder::build`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: IndexMap<String, Rule>,
    duplicate: Option<String>,
}

impl SchemaBuilder {
    pub fn field(mut self, name: impl Into<String>, rule: Rule) -> Self {
        let name = name.into();
        if self.fields.contains_key(&name) {
            self.duplicate.get_or_insert(name);
        } else {
            self.fields.insert(name, rule);
        }
        self
    }

    pub fn build(self) -> Result<Schema, CoreError> {
        if let Some(name) = self.duplicate {
            return Err(CoreError::DuplicateField(name));
        }
        Ok(Schema {
            fields: self.fields,
        })
    }
}

/// Outcome of validating one record against a schema.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// One message per failing field.
    pub errors: IndexMap<String, String>,
    /// Sanitized value per passing field.
    pub sanitized: IndexMap<String, Value>,
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Required,
    InvalidEmail,
    InvalidPhone,
    InvalidUrl,
    NotANumber,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidFormat,
    /// Custom check returned a bare rejection.
    Invalid,
    /// Custom check returned its own message.
    Custom(String),
}

/// A rejected field: what failed and the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

/// Result of running one field through its rule.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    Accepted(Value),
    Rejected(Violation),
}
