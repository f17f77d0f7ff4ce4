use std::sync::Arc;

use climatiza_core::validation::presets::SchemaRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything sits behind `Arc` and is read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Form schemas, built once at startup.
    pub forms: Arc<SchemaRegistry>,
}
