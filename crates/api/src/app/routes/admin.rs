//! Administrative endpoints: liveness, hit metrics, and the dev-only reset.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::app::{AppState, errors};
use crate::config::Platform;

/// GET /admin/healthz - Liveness probe. No side effects.
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /admin/metrics - Render the hit count into the admin page.
pub async fn metrics(Extension(state): Extension<Arc<AppState>>) -> Html<String> {
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>
"#,
        state.hits.value()
    ))
}

/// POST /admin/reset - Wipe all users and zero the hit counter.
///
/// Dev-only: production deployments must never allow an external reset. The
/// counter is only cleared once the store purge succeeded, so a failed reset
/// leaves both halves of the action untouched.
pub async fn reset(Extension(state): Extension<Arc<AppState>>) -> axum::response::Response {
    if state.platform != Platform::Dev {
        return errors::json_error(StatusCode::FORBIDDEN, "Forbidden");
    }

    if let Err(e) = state.store.delete_all_users().await {
        return errors::internal_error(e);
    }
    state.hits.reset();

    (StatusCode::OK, "OK").into_response()
}
