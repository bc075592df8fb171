//! Session audit ledger model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One login/logout audit record.
///
/// Created on login, closed on logout. Append-mostly, purely observability:
/// never consulted for authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSession {
    /// Unique ledger entry identifier.
    pub id: Uuid,
    /// The user who logged in.
    pub user_id: Uuid,
    /// Client IP address, if known.
    pub ip_address: Option<String>,
    /// Client User-Agent header, if known.
    pub user_agent: Option<String>,
    /// When the login happened.
    pub login_at: DateTime<Utc>,
    /// When the session was closed; `None` while still open.
    pub logout_at: Option<DateTime<Utc>>,
}

/// Client metadata captured at login time for the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientMetadata {
    /// Client IP address.
    pub ip_address: Option<String>,
    /// Client User-Agent header.
    pub user_agent: Option<String>,
}
