//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use clinichub_core::config::AuthConfig;
use clinichub_core::error::AppError;
use clinichub_entity::user::User;

use super::claims::{AccessClaims, REFRESH_TOKEN_TYPE, RefreshClaims};

/// Creates signed JWT access and refresh tokens.
///
/// Access and refresh tokens are signed with separate HMAC secrets.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret for access tokens.
    access_key: EncodingKey,
    /// HMAC secret for refresh tokens.
    refresh_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
        }
    }

    /// Generates a new access + refresh token pair for the given user.
    ///
    /// Signing failure means a misconfigured secret and is surfaced as a
    /// Configuration error.
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let access_exp = now + chrono::Duration::minutes(self.access_ttl_minutes);
        let refresh_exp = now + chrono::Duration::days(self.refresh_ttl_days);

        let access_claims = AccessClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            clinic_id: user.clinic_id,
            iat: now.timestamp(),
            exp: access_exp.timestamp(),
        };

        let refresh_claims = RefreshClaims {
            sub: user.id,
            token_type: REFRESH_TOKEN_TYPE.to_string(),
            iat: now.timestamp(),
            exp: refresh_exp.timestamp(),
        };

        let access_token = encode(&Header::default(), &access_claims, &self.access_key)
            .map_err(|e| AppError::configuration(format!("Failed to sign access token: {e}")))?;

        let refresh_token = encode(&Header::default(), &refresh_claims, &self.refresh_key)
            .map_err(|e| AppError::configuration(format!("Failed to sign refresh token: {e}")))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at: access_exp,
            refresh_expires_at: refresh_exp,
        })
    }
}
