//! Session ledger repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use clinichub_core::error::{AppError, ErrorKind};
use clinichub_core::result::AppResult;
use clinichub_entity::session::UserSession;

/// Repository for the append-mostly login/logout audit ledger.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session ledger repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close every open ledger entry for a user. Returns the count closed.
    ///
    /// Entries are appended inside the issuance transaction (see
    /// `RefreshTokenRepository::record_issuance`), never from here.
    pub async fn close_open_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE user_sessions SET logout_at = NOW() \
             WHERE user_id = $1 AND logout_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to close ledger entries", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Most recent ledger entries for a user, newest first.
    pub async fn recent_for_user(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<UserSession>> {
        sqlx::query_as::<_, UserSession>(
            "SELECT * FROM user_sessions WHERE user_id = $1 \
             ORDER BY login_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list recent sessions", e)
        })
    }

    /// Delete ledger entries older than the cutoff. Returns the count.
    pub async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE login_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge old ledger entries", e)
            })?;
        Ok(result.rows_affected())
    }
}
