//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// Access and refresh tokens are signed with *separate* secrets so a
/// leaked access-token secret cannot be used to mint refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for access token signing (HMAC-SHA256).
    #[serde(default = "default_secret")]
    pub access_token_secret: String,
    /// Secret key for refresh token signing (HMAC-SHA256).
    #[serde(default = "default_secret")]
    pub refresh_token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Whether session cookies carry the `Secure` attribute.
    /// Disabled for local development over plain HTTP.
    #[serde(default = "default_true")]
    pub cookies_secure: bool,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: default_secret(),
            refresh_token_secret: default_secret(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            cookies_secure: true,
            password_min_length: default_password_min(),
        }
    }
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    8
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_token_lifetimes() {
        let config = AuthConfig::default();
        assert_eq!(config.access_ttl_minutes, 15);
        assert_eq!(config.refresh_ttl_days, 7);
        assert!(config.cookies_secure);
    }
}
