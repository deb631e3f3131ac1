//! In-memory store for tests/dev.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use chirpy_core::{Chirp, ChirpId, User, UserId};

use crate::{ChirpStore, StoreError, StoreResult};

/// Lock-guarded vectors standing in for the users and chirps tables.
///
/// Insertion order doubles as creation order, which keeps `list_chirps`
/// deterministic without re-sorting.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    chirps: Vec<Chirp>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panic mid-mutation; no recovery is useful.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ChirpStore for InMemoryStore {
    async fn create_user(&self, email: &str) -> StoreResult<User> {
        let mut inner = self.lock();
        if inner.users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }
        let user = User {
            id: UserId::new(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn create_chirp(&self, body: &str, user_id: UserId) -> StoreResult<Chirp> {
        let mut inner = self.lock();
        if !inner.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::UnknownUser(user_id));
        }
        let chirp = Chirp {
            id: ChirpId::new(),
            body: body.to_string(),
            user_id,
            created_at: Utc::now(),
        };
        inner.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn get_chirp(&self, id: ChirpId) -> StoreResult<Chirp> {
        self.lock()
            .chirps
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_chirps(&self) -> StoreResult<Vec<Chirp>> {
        Ok(self.lock().chirps.clone())
    }

    async fn delete_all_users(&self) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.chirps.clear();
        inner.users.clear();
        Ok(())
    }
}
