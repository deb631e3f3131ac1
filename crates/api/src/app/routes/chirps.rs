use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use chirpy_core::{ChirpId, UserId, moderation};

use crate::app::{AppState, dto, errors};

/// POST /api/chirps - Post a chirp.
///
/// Moderation runs before any store interaction: an over-long body never
/// reaches the store, and the persisted body is always the cleaned one.
pub async fn create_chirp(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<dto::CreateChirpRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(e) => return errors::internal_error(e),
    };

    let cleaned = match moderation::clean_body(&req.body) {
        Ok(cleaned) => cleaned,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let user_id: UserId = match req.user_id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "Invalid user ID"),
    };

    match state.store.create_chirp(&cleaned, user_id).await {
        Ok(chirp) => (StatusCode::CREATED, Json(chirp)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /api/chirps - List every chirp, creation order ascending.
pub async fn list_chirps(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    match state.store.list_chirps().await {
        Ok(chirps) => (StatusCode::OK, Json(chirps)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /api/chirps/:id - Fetch a single chirp.
pub async fn get_chirp(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ChirpId = match id.parse() {
        Ok(id) => id,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "Invalid chirp ID"),
    };

    match state.store.get_chirp(id).await {
        Ok(chirp) => (StatusCode::OK, Json(chirp)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
