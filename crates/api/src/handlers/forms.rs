//! Handlers for the `/forms` resource.
//!
//! Callers post raw form payloads; the matching schema validates and
//! sanitizes them. `validate` is a dry run that always answers 200, `submit`
//! rejects invalid payloads with 422.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use climatiza_core::types::Record;
use climatiza_core::validation::rules::FieldType;
use climatiza_core::validation::{validate_with_locale, Locale, ValidationResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters accepted by the validation endpoints.
#[derive(Debug, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<String>,
}

/// A registered form and its fields.
#[derive(Debug, Serialize)]
pub struct FormSummary {
    pub name: String,
    pub fields: Vec<FieldSummary>,
}

#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub required: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
}

/// Accepted submission, as forwarded downstream.
#[derive(Debug, Serialize)]
pub struct Submission {
    pub form: String,
    pub sanitized: IndexMap<String, Value>,
}

/// GET /api/v1/forms
///
/// List every registered form with its fields.
pub async fn list_forms(State(state): State<AppState>) -> Json<DataResponse<Vec<FormSummary>>> {
    let forms = state
        .forms
        .iter()
        .map(|(name, schema)| FormSummary {
            name: name.to_string(),
            fields: schema
                .fields()
                .map(|(field, rule)| FieldSummary {
                    name: field.to_string(),
                    required: rule.is_required(),
                    field_type: rule.field_type(),
                })
                .collect(),
        })
        .collect();
    Json(DataResponse { data: forms })
}

/// POST /api/v1/forms/{name}/validate
///
/// Dry run: validate the payload and return the full result, valid or not.
pub async fn validate_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<LocaleParams>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<DataResponse<ValidationResult>>> {
    let result = run_validation(&state, &name, &params, payload)?;
    tracing::debug!(
        form = %name,
        is_valid = result.is_valid,
        errors = result.errors.len(),
        "Dry-run validation"
    );
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/forms/{name}/submit
///
/// Validate and accept a submission. Returns 202 with the sanitized values,
/// or 422 with one message per failing field.
pub async fn submit_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<LocaleParams>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<Submission>>)> {
    let result = run_validation(&state, &name, &params, payload)?;

    if !result.is_valid {
        tracing::info!(
            form = %name,
            failed = ?result.errors.keys().collect::<Vec<_>>(),
            "Rejected form submission"
        );
        return Err(AppError::InvalidForm(result.errors));
    }

    // Field names only: values may carry personal data.
    tracing::info!(
        form = %name,
        fields = ?result.sanitized.keys().collect::<Vec<_>>(),
        "Accepted form submission"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: Submission {
                form: name,
                sanitized: result.sanitized,
            },
        }),
    ))
}

fn run_validation(
    state: &AppState,
    name: &str,
    params: &LocaleParams,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<ValidationResult> {
    let schema = state.forms.require(name)?;
    let locale = resolve_locale(state, params)?;
    let Json(body) = payload?;
    let record = into_record(body)?;
    Ok(validate_with_locale(&schema, &record, locale))
}

fn resolve_locale(state: &AppState, params: &LocaleParams) -> AppResult<Locale> {
    match params.locale.as_deref() {
        None => Ok(state.config.default_locale),
        Some(tag) => Locale::from_tag(tag)
            .ok_or_else(|| AppError::BadRequest(format!("Unsupported locale '{tag}'"))),
    }
}

fn into_record(body: Value) -> AppResult<Record> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}
