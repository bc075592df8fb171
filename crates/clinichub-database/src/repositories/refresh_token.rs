//! Refresh token repository implementation.
//!
//! Rotation safety lives here: [`RefreshTokenRepository::claim`] validates
//! and deletes a token row in a single statement, so two concurrent
//! refreshes of the same token can never both win.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use clinichub_core::error::{AppError, ErrorKind};
use clinichub_core::result::AppResult;
use clinichub_entity::session::ClientMetadata;
use clinichub_entity::token::RefreshToken;

/// Repository for server-tracked refresh tokens.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist everything a token issuance touches, atomically.
    ///
    /// One transaction covers: sweeping the user's already-expired token
    /// rows, inserting the new token row, appending a ledger entry when
    /// client metadata is present, and stamping `users.last_login`. A
    /// failure partway leaves no usable refresh token without its ledger
    /// entry. Spans `refresh_tokens`, `user_sessions`, and `users`.
    pub async fn record_issuance(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        metadata: Option<&ClientMetadata>,
    ) -> AppResult<RefreshToken> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1 AND expires_at < NOW()")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to sweep expired tokens", e)
            })?;

        let token = sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (user_id, token_hash, expires_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store refresh token", e)
        })?;

        if let Some(meta) = metadata {
            sqlx::query(
                "INSERT INTO user_sessions (user_id, ip_address, user_agent) VALUES ($1, $2, $3)",
            )
            .bind(user_id)
            .bind(&meta.ip_address)
            .bind(&meta.user_agent)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to append session ledger", e)
            })?;
        }

        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit issuance", e)
        })?;

        Ok(token)
    }

    /// Atomically claim a live token row: validate and delete in one
    /// statement. Returns the deleted row, or `None` if no unexpired row
    /// matched — either because the token never existed, already expired,
    /// or a concurrent claim won the race.
    pub async fn claim(&self, user_id: Uuid, token_hash: &str) -> AppResult<Option<RefreshToken>> {
        sqlx::query_as::<_, RefreshToken>(
            "DELETE FROM refresh_tokens \
             WHERE user_id = $1 AND token_hash = $2 AND expires_at > NOW() \
             RETURNING *",
        )
        .bind(user_id)
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim refresh token", e))
    }

    /// Delete every refresh token held by a user (admin revocation,
    /// deactivation).
    pub async fn delete_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke user tokens", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Delete all expired token rows across users. Returns the count.
    pub async fn purge_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge expired tokens", e)
            })?;
        Ok(result.rows_affected())
    }
}
