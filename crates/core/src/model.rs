//! The two persisted records: users and chirps.
//!
//! These are owned by the store; this crate only defines their shape and
//! JSON mapping. Timestamps serialize as RFC 3339 via chrono's serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ChirpId, UserId};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// A short text post. The body is stored post-moderation and never exceeds
/// 140 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
