//! Postgres-backed store.
//!
//! Thin mapping between the `users`/`chirps` tables and the domain records.
//! Every uniqueness and referential-integrity guarantee is enforced by the
//! database; this module only translates SQLSTATEs into [`StoreError`]
//! variants the handlers can reason about.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use chirpy_core::{Chirp, ChirpId, User, UserId};

use crate::{ChirpStore, StoreError, StoreResult};

// Postgres SQLSTATEs this module distinguishes.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect to the database behind `url`.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
        email: row.try_get("email")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn chirp_from_row(row: &sqlx::postgres::PgRow) -> Result<Chirp, sqlx::Error> {
    Ok(Chirp {
        id: ChirpId::from_uuid(row.try_get::<Uuid, _>("id")?),
        body: row.try_get("body")?,
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl ChirpStore for PostgresStore {
    async fn create_user(&self, email: &str) -> StoreResult<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (id, email, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, email, created_at
            "#,
        )
        .bind(UserId::new().as_uuid())
        .bind(email)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if sqlstate(&e).as_deref() == Some(UNIQUE_VIOLATION) {
                StoreError::DuplicateEmail(email.to_string())
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(user_from_row(&row)?)
    }

    async fn create_chirp(&self, body: &str, user_id: UserId) -> StoreResult<Chirp> {
        let row = sqlx::query(
            r#"
            INSERT INTO chirps (id, body, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, body, user_id, created_at
            "#,
        )
        .bind(ChirpId::new().as_uuid())
        .bind(body)
        .bind(user_id.as_uuid())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if sqlstate(&e).as_deref() == Some(FOREIGN_KEY_VIOLATION) {
                StoreError::UnknownUser(user_id)
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(chirp_from_row(&row)?)
    }

    async fn get_chirp(&self, id: ChirpId) -> StoreResult<Chirp> {
        let row = sqlx::query(
            r#"
            SELECT id, body, user_id, created_at
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(chirp_from_row(&row)?)
    }

    async fn list_chirps(&self) -> StoreResult<Vec<Chirp>> {
        let rows = sqlx::query(
            r#"
            SELECT id, body, user_id, created_at
            FROM chirps
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let chirps = rows
            .iter()
            .map(chirp_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(chirps)
    }

    async fn delete_all_users(&self) -> StoreResult<()> {
        // Chirps first so the users delete never trips the FK.
        sqlx::query("DELETE FROM chirps").execute(&self.pool).await?;
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(())
    }
}
