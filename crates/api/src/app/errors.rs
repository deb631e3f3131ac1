use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use chirpy_store::StoreError;

/// Fixed message for every 500. Internal detail is logged, never sent.
pub const INTERNAL_SERVER_MESSAGE: &str = "Something went wrong";

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Log the cause, answer with the sanitized generic envelope.
pub fn internal_error(err: impl std::fmt::Display) -> axum::response::Response {
    tracing::error!(error = %err, "request failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_MESSAGE)
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "Chirp not found"),
        other => internal_error(other),
    }
}
