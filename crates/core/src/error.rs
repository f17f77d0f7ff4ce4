/// Errors raised while building schemas or looking them up.
///
/// The validation engine itself never returns these: per-field failures are
/// reported through [`crate::validation::rules::ValidationResult::errors`].
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Duplicate field in schema: {0}")]
    DuplicateField(String),

    #[error("Duplicate schema name: {0}")]
    DuplicateSchema(String),

    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },
}
