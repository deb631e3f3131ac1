use axum::{
    Router,
    routing::{get, post},
};

pub mod admin;
pub mod chirps;
pub mod users;

/// Router for the API and admin endpoints (everything except `/app/*`).
pub fn router() -> Router {
    Router::new()
        .route("/admin/healthz", get(admin::healthz))
        .route("/admin/metrics", get(admin::metrics))
        .route("/admin/reset", post(admin::reset))
        .route("/api/users", post(users::create_user))
        .route("/api/chirps", post(chirps::create_chirp).get(chirps::list_chirps))
        .route("/api/chirps/:id", get(chirps::get_chirp))
}
