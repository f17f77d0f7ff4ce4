//! Preset schemas for the site's forms and a name-keyed registry.
//!
//! Schemas are built once at startup and shared behind `Arc`.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::rules::{FieldType, Rule, Schema};
use super::sanitizers;
use super::validators::SLUG_PATTERN;
use crate::error::CoreError;

pub const CONTACT: &str = "contact";
pub const BLOG_POST: &str = "blog_post";
pub const QUOTE_REQUEST: &str = "quote_request";
pub const NEWSLETTER: &str = "newsletter";

/// Services a quote can be requested for.
pub const SERVICES: &[&str] = &["installation", "maintenance", "cleaning", "repair", "pmoc"];

/// Upper bound on air-conditioning units in a single quote.
pub const MAX_QUOTE_UNITS: i64 = 100;

/// Maximum email length (RFC 5321 path limit).
const MAX_EMAIL_LENGTH: usize = 254;

fn email_rule(rule: Rule) -> Rule {
    rule.sanitize(sanitizers::trim)
        .then_sanitize(sanitizers::lowercase)
        .of_type(FieldType::Email)
        .max_length(MAX_EMAIL_LENGTH)
}

fn phone_rule(rule: Rule) -> Rule {
    rule.sanitize(sanitizers::phone).of_type(FieldType::Phone)
}

/// Free text that ends up rendered on a page.
fn text_rule(rule: Rule) -> Rule {
    rule.sanitize(sanitizers::trim).then_sanitize(sanitizers::xss)
}

/// Contact form: `name`, `email`, `phone` (optional), `message`.
pub fn contact() -> Result<Schema, CoreError> {
    Schema::builder()
        .field(
            "name",
            Rule::required()
                .sanitize(sanitizers::trim)
                .min_length(2)
                .max_length(100),
        )
        .field("email", email_rule(Rule::required()))
        .field("phone", phone_rule(Rule::optional()))
        .field(
            "message",
            text_rule(Rule::required()).min_length(10).max_length(2000),
        )
        .build()
}

/// Blog post authoring: `title`, `slug`, `content`, `excerpt` (optional).
pub fn blog_post() -> Result<Schema, CoreError> {
    Schema::builder()
        .field(
            "title",
            text_rule(Rule::required()).min_length(5).max_length(200),
        )
        .field(
            "slug",
            Rule::required()
                .sanitize(sanitizers::slug)
                .max_length(200)
                .pattern(SLUG_PATTERN)?,
        )
        .field(
            "content",
            Rule::required().sanitize(sanitizers::xss).min_length(50),
        )
        .field("excerpt", text_rule(Rule::optional()).max_length(300))
        .build()
}

/// Service quote request.
pub fn quote_request() -> Result<Schema, CoreError> {
    Schema::builder()
        .field(
            "name",
            Rule::required()
                .sanitize(sanitizers::trim)
                .min_length(2)
                .max_length(100),
        )
        .field("email", email_rule(Rule::required()))
        .field("phone", phone_rule(Rule::required()))
        .field(
            "service",
            Rule::required()
                .sanitize(sanitizers::trim)
                .then_sanitize(sanitizers::lowercase)
                .custom(|v: &Value| v.as_str().is_some_and(|s| SERVICES.contains(&s))),
        )
        .field(
            "units",
            Rule::optional()
                .of_type(FieldType::Number)
                .custom(|v: &Value| {
                    v.as_i64()
                        .is_some_and(|n| (1..=MAX_QUOTE_UNITS).contains(&n))
                }),
        )
        .field("message", text_rule(Rule::optional()).max_length(2000))
        .build()
}

/// Newsletter sign-up.
pub fn newsletter() -> Result<Schema, CoreError> {
    Schema::builder()
        .field("email", email_rule(Rule::required()))
        .build()
}

/// Immutable lookup of schemas by form name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, Arc<Schema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every preset form.
    pub fn with_presets() -> Result<Self, CoreError> {
        Self::new()
            .register(CONTACT, contact()?)?
            .register(BLOG_POST, blog_post()?)?
            .register(QUOTE_REQUEST, quote_request()?)?
            .register(NEWSLETTER, newsletter()?)
    }

    pub fn register(mut self, name: impl Into<String>, schema: Schema) -> Result<Self, CoreError> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(CoreError::DuplicateSchema(name));
        }
        self.schemas.insert(name, Arc::new(schema));
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    /// Like [`SchemaRegistry::get`], but a missing form is an error.
    pub fn require(&self, name: &str) -> Result<Arc<Schema>, CoreError> {
        self.get(name).ok_or_else(|| CoreError::NotFound {
            entity: "Form",
            name: name.to_string(),
        })
    }

    /// Registered form names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Registered forms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Schema>)> {
        self.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
    }
}
