//! JWT claims structures for access and refresh tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinichub_entity::user::UserRole;

/// Claims payload embedded in every access token.
///
/// The identity fields here are a snapshot from issuance time; session
/// verification re-fetches live user and clinic state rather than trusting
/// them for liveness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Email at issuance time.
    pub email: String,
    /// Role at issuance time (lowercase wire form).
    pub role: UserRole,
    /// The user's clinic (tenant).
    pub clinic_id: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Claims payload embedded in every refresh token.
///
/// Deliberately minimal: the server-side row carries everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Always `"refresh"`; rejects an access token presented as refresh.
    pub token_type: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// The refresh token type tag.
pub const REFRESH_TOKEN_TYPE: &str = "refresh";

impl AccessClaims {
    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

impl RefreshClaims {
    /// Whether the type tag marks this as a refresh token.
    pub fn is_refresh(&self) -> bool {
        self.token_type == REFRESH_TOKEN_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_helpers() {
        let now = Utc::now().timestamp();
        let live = AccessClaims {
            sub: Uuid::new_v4(),
            email: "a@b.c".into(),
            role: UserRole::Doctor,
            clinic_id: Uuid::new_v4(),
            iat: now,
            exp: now + 900,
        };
        assert!(!live.is_expired());

        let dead = AccessClaims { exp: now - 1, ..live.clone() };
        assert!(dead.is_expired());
    }

    #[test]
    fn test_refresh_type_tag() {
        let claims = RefreshClaims {
            sub: Uuid::new_v4(),
            token_type: REFRESH_TOKEN_TYPE.into(),
            iat: 0,
            exp: 0,
        };
        assert!(claims.is_refresh());
    }
}
