use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::app::{AppState, dto, errors};

/// POST /api/users - Sign up with an email address.
pub async fn create_user(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<dto::CreateUserRequest>, JsonRejection>,
) -> axum::response::Response {
    // Decode failures share the internal path with store failures; the
    // client only ever sees the generic envelope.
    let Json(req) = match payload {
        Ok(json) => json,
        Err(e) => return errors::internal_error(e),
    };

    // Uniqueness is the store's call; a duplicate email surfaces as an
    // internal error like any other persistence failure.
    match state.store.create_user(&req.email).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
