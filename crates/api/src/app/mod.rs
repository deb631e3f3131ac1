//! HTTP API application wiring (axum router + middleware).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: the uniform `{"error": ...}` envelope

use std::path::Path;
use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use chirpy_store::ChirpStore;

use crate::config::Platform;
use crate::middleware::{self, HitCounter};

pub mod dto;
pub mod errors;
pub mod routes;

/// Cross-request shared state. Everything else is per-request.
pub struct AppState {
    pub store: Arc<dyn ChirpStore>,
    pub hits: HitCounter,
    pub platform: Platform,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(state: AppState, asset_root: impl AsRef<Path>) -> Router {
    let state = Arc::new(state);

    // Only the static branch counts hits; the counter runs before the file
    // server regardless of whether the file exists.
    let app_files = Router::new()
        .nest_service("/app", ServeDir::new(asset_root.as_ref()))
        .layer(axum::middleware::from_fn_with_state(
            state.hits.clone(),
            middleware::track_hits,
        ));

    routes::router()
        .merge(app_files)
        .layer(ServiceBuilder::new().layer(Extension(state)))
}
