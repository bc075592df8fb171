//! JWT token validation.
//!
//! Decoding is stateless: signature and expiry only. Liveness (deactivated
//! user or clinic, revoked refresh token) is checked against the database
//! by the session manager, never here.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use clinichub_core::config::AuthConfig;
use clinichub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims};

/// Validates JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret for access token verification.
    access_key: DecodingKey,
    /// HMAC secret for refresh token verification.
    refresh_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            access_key: DecodingKey::from_secret(config.access_token_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        let token_data = decode::<AccessClaims>(token, &self.access_key, &self.validation)
            .map_err(map_jwt_error)?;
        Ok(token_data.claims)
    }

    /// Decodes and validates a refresh token string, including its type tag.
    pub fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let token_data = decode::<RefreshClaims>(token, &self.refresh_key, &self.validation)
            .map_err(map_jwt_error)?;

        let claims = token_data.claims;
        if !claims.is_refresh() {
            return Err(AppError::invalid_token(
                "Invalid token type: expected refresh token",
            ));
        }
        Ok(claims)
    }
}

/// Maps jsonwebtoken failures into the `InvalidToken` taxonomy.
fn map_jwt_error(e: jsonwebtoken::errors::Error) -> AppError {
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::invalid_token("Token has expired")
        }
        jsonwebtoken::errors::ErrorKind::InvalidToken => {
            AppError::invalid_token("Invalid token format")
        }
        jsonwebtoken::errors::ErrorKind::InvalidSignature => {
            AppError::invalid_token("Invalid token signature")
        }
        _ => AppError::invalid_token(format!("Token validation failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use chrono::Utc;
    use clinichub_core::error::ErrorKind;
    use clinichub_entity::user::{User, UserRole};
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_token_secret: "access-secret-for-tests".into(),
            refresh_token_secret: "refresh-secret-for-tests".into(),
            ..AuthConfig::default()
        }
    }

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            clinic_id: Uuid::new_v4(),
            email: "doctor@example-clinic.test".into(),
            password_hash: String::new(),
            first_name: "Ada".into(),
            last_name: "Nguyen".into(),
            role: UserRole::Doctor,
            phone: None,
            license_number: None,
            specialization: None,
            is_active: true,
            email_verified: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_access_token_round_trips_identity_fields() {
        let config = test_config();
        let user = test_user();
        let pair = JwtEncoder::new(&config).generate_token_pair(&user).unwrap();

        let claims = JwtDecoder::new(&config)
            .decode_access_token(&pair.access_token)
            .unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, UserRole::Doctor);
        assert_eq!(claims.clinic_id, user.clinic_id);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_refresh_token_carries_type_tag() {
        let config = test_config();
        let pair = JwtEncoder::new(&config)
            .generate_token_pair(&test_user())
            .unwrap();

        let claims = JwtDecoder::new(&config)
            .decode_refresh_token(&pair.refresh_token)
            .unwrap();
        assert!(claims.is_refresh());
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        // Secrets differ, so an access token fails refresh verification
        // before the type check even runs.
        let config = test_config();
        let pair = JwtEncoder::new(&config)
            .generate_token_pair(&test_user())
            .unwrap();

        let err = JwtDecoder::new(&config)
            .decode_refresh_token(&pair.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config();
        let pair = JwtEncoder::new(&config)
            .generate_token_pair(&test_user())
            .unwrap();

        let other = AuthConfig {
            access_token_secret: "a-different-secret".into(),
            ..test_config()
        };
        let err = JwtDecoder::new(&other)
            .decode_access_token(&pair.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&test_config())
            .decode_access_token("not.a.jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }
}
