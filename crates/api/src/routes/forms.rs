//! Route definitions for the `/forms` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// GET    /                 -> list_forms
/// POST   /{name}/validate  -> validate_form  (dry run, ?locale)
/// POST   /{name}/submit    -> submit_form    (?locale)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(forms::list_forms))
        .route("/{name}/validate", post(forms::validate_form))
        .route("/{name}/submit", post(forms::submit_form))
}
