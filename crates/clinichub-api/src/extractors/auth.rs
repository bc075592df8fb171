//! `CurrentUser` extractor — resolves the session cookie (or bearer
//! header) into a verified identity.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use clinichub_auth::session::SessionIdentity;
use clinichub_core::error::AppError;

use crate::cookies::ACCESS_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, available to any handler that asks for it.
///
/// Verification goes through the session manager, so the identity here
/// reflects current database state, not token claims.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionIdentity);

impl std::ops::Deref for CurrentUser {
    type Target = SessionIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = access_token_from_parts(parts)
            .ok_or_else(|| AppError::invalid_token("Missing access token"))?;

        let identity = state.session_manager.verify(&token).await?;
        Ok(CurrentUser(identity))
    }
}

/// Pulls the access token from the session cookie, falling back to an
/// `Authorization: Bearer` header for non-browser clients.
fn access_token_from_parts(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(ACCESS_COOKIE) {
        return Some(cookie.value().to_string());
    }

    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}
