//! Session cookie construction.
//!
//! Both tokens travel only in `HttpOnly` cookies; response bodies never
//! carry raw token values.

use axum_extra::extract::cookie::{Cookie, SameSite};

use clinichub_auth::jwt::TokenPair;
use clinichub_core::config::AuthConfig;

/// Cookie holding the access token.
pub const ACCESS_COOKIE: &str = "access-token";
/// Cookie holding the refresh token.
pub const REFRESH_COOKIE: &str = "refresh-token";

/// Builds the access and refresh cookies for a freshly-issued pair.
///
/// Max-age mirrors each token's TTL; an expired cookie and an expired
/// token drop out together.
pub fn session_cookies(
    pair: &TokenPair,
    config: &AuthConfig,
) -> (Cookie<'static>, Cookie<'static>) {
    let access = build(
        ACCESS_COOKIE,
        pair.access_token.clone(),
        time::Duration::minutes(config.access_ttl_minutes as i64),
        config.cookies_secure,
    );
    let refresh = build(
        REFRESH_COOKIE,
        pair.refresh_token.clone(),
        time::Duration::days(config.refresh_ttl_days as i64),
        config.cookies_secure,
    );
    (access, refresh)
}

/// Builds expired cookies that clear both tokens client-side.
pub fn clearing_cookies(config: &AuthConfig) -> (Cookie<'static>, Cookie<'static>) {
    let access = build(
        ACCESS_COOKIE,
        String::new(),
        time::Duration::ZERO,
        config.cookies_secure,
    );
    let refresh = build(
        REFRESH_COOKIE,
        String::new(),
        time::Duration::ZERO,
        config.cookies_secure,
    );
    (access, refresh)
}

fn build(name: &'static str, value: String, max_age: time::Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .path("/")
        .max_age(max_age)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_pair() -> TokenPair {
        TokenPair {
            access_token: "access.jwt.value".into(),
            refresh_token: "refresh.jwt.value".into(),
            access_expires_at: Utc::now(),
            refresh_expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_cookies_carry_session_attributes() {
        let config = AuthConfig::default();
        let (access, refresh) = session_cookies(&test_pair(), &config);

        for cookie in [&access, &refresh] {
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Lax));
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.path(), Some("/"));
        }
        assert_eq!(access.name(), ACCESS_COOKIE);
        assert_eq!(refresh.name(), REFRESH_COOKIE);
        assert_eq!(access.max_age(), Some(time::Duration::minutes(15)));
        assert_eq!(refresh.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn test_secure_flag_follows_config() {
        let config = AuthConfig {
            cookies_secure: false,
            ..AuthConfig::default()
        };
        let (access, _) = session_cookies(&test_pair(), &config);
        assert_eq!(access.secure(), Some(false));
    }

    #[test]
    fn test_clearing_cookies_expire_immediately() {
        let (access, refresh) = clearing_cookies(&AuthConfig::default());
        assert_eq!(access.max_age(), Some(time::Duration::ZERO));
        assert_eq!(refresh.max_age(), Some(time::Duration::ZERO));
        assert!(access.value().is_empty());
        assert!(refresh.value().is_empty());
    }
}
