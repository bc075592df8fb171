//! Refresh token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A server-tracked refresh token.
///
/// Only a SHA-256 fingerprint of the raw token is persisted, so a database
/// compromise cannot be used to mint sessions. A user may hold several
/// rows at once (one per device). Rows are removed on logout, rotation,
/// revocation, or by the expiry sweep.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshToken {
    /// Unique token record identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// SHA-256 hex fingerprint of the raw token.
    pub token_hash: String,
    /// Server-side expiry; checked in addition to the JWT `exp` claim.
    pub expires_at: DateTime<Utc>,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}
