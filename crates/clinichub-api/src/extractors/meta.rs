//! `ClientMeta` extractor — client address and user agent for the ledger.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;

use clinichub_entity::session::ClientMetadata;

use crate::state::AppState;

/// Client metadata recorded alongside ledger entries. Always succeeds;
/// absent headers record as `NULL`.
#[derive(Debug, Clone)]
pub struct ClientMeta(pub ClientMetadata);

impl std::ops::Deref for ClientMeta {
    type Target = ClientMetadata;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for ClientMeta {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Behind a proxy, X-Forwarded-For holds "client, proxy1, proxy2";
        // the first entry is the original client.
        let ip_address = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get("x-real-ip")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            });

        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Ok(ClientMeta(ClientMetadata {
            ip_address,
            user_agent,
        }))
    }
}
