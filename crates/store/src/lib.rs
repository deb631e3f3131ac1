//! `chirpy-store` — the narrow persistence interface behind the API.
//!
//! Handlers talk to [`ChirpStore`] and nothing else. Two implementations:
//! [`memory::InMemoryStore`] for tests/dev and [`postgres::PostgresStore`]
//! for real deployments. Uniqueness and referential integrity are the
//! store's responsibility; callers only see the typed [`StoreError`].

use async_trait::async_trait;
use thiserror::Error;

use chirpy_core::{Chirp, ChirpId, User, UserId};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Persistence failure surfaced to handlers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// Email uniqueness violated on user creation.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Chirp creation referenced a user that does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// Any other database failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD backend for users and chirps.
///
/// `list_chirps` returns creation order ascending. `delete_all_users` is the
/// administrative bulk reset; it also removes every chirp so no chirp can
/// outlive its owner.
#[async_trait]
pub trait ChirpStore: Send + Sync {
    async fn create_user(&self, email: &str) -> StoreResult<User>;
    async fn create_chirp(&self, body: &str, user_id: UserId) -> StoreResult<Chirp>;
    async fn get_chirp(&self, id: ChirpId) -> StoreResult<Chirp>;
    async fn list_chirps(&self) -> StoreResult<Vec<Chirp>>;
    async fn delete_all_users(&self) -> StoreResult<()>;
}
