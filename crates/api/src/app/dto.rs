use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
    /// Kept as a string and parsed into `UserId` by the handler so a
    /// malformed id becomes a 400, not a decode failure.
    pub user_id: String,
}
