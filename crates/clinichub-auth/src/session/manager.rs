//! Session lifecycle orchestration.
//!
//! The manager owns the full credential flow: login, signup, per-request
//! verification, refresh rotation, and logout. Handlers talk to this type;
//! they never touch the token repositories directly.

use tracing::{info, warn};
use uuid::Uuid;

use clinichub_core::config::AuthConfig;
use clinichub_core::error::AppError;
use clinichub_core::result::AppResult;
use clinichub_database::repositories::{
    ClinicRepository, RefreshTokenRepository, SessionRepository, UserRepository,
};
use clinichub_entity::session::{ClientMetadata, UserSession};
use clinichub_entity::user::model::CreateUser;
use clinichub_entity::user::{User, UserRole};

use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair, token_fingerprint};
use crate::password::{PasswordHasher, PasswordPolicy};

use super::identity::SessionIdentity;

/// Input for account registration.
#[derive(Debug, Clone)]
pub struct SignupData {
    /// The clinic the account registers under.
    pub clinic_id: Uuid,
    /// Email address.
    pub email: String,
    /// Plaintext password, checked against the policy before hashing.
    pub password: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Requested role.
    pub role: UserRole,
    /// Phone number.
    pub phone: Option<String>,
    /// Professional license number.
    pub license_number: Option<String>,
    /// Medical specialization.
    pub specialization: Option<String>,
}

/// Coordinates authentication state across tokens, users, and the ledger.
#[derive(Debug, Clone)]
pub struct SessionManager {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    hasher: PasswordHasher,
    policy: PasswordPolicy,
    users: UserRepository,
    clinics: ClinicRepository,
    tokens: RefreshTokenRepository,
    ledger: SessionRepository,
}

impl SessionManager {
    pub fn new(
        config: &AuthConfig,
        users: UserRepository,
        clinics: ClinicRepository,
        tokens: RefreshTokenRepository,
        ledger: SessionRepository,
    ) -> Self {
        Self {
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
            hasher: PasswordHasher::new(),
            policy: PasswordPolicy::new(config.password_min_length),
            users,
            clinics,
            tokens,
            ledger,
        }
    }

    /// Authenticates credentials and issues a fresh token pair.
    ///
    /// Every failure mode (unknown email, wrong password, deactivated user,
    /// deactivated clinic) collapses into the same `InvalidCredentials`
    /// error so responses never reveal which check failed.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        meta: &ClientMetadata,
    ) -> AppResult<(SessionIdentity, TokenPair)> {
        let row = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::invalid_credentials("Invalid email or password"))?;

        if !row.is_session_valid() {
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        if !self
            .hasher
            .verify_password(password, &row.user.password_hash)?
        {
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        let pair = self.issue(&row.user, Some(meta)).await?;
        info!(user_id = %row.user.id, clinic_id = %row.user.clinic_id, "user logged in");
        Ok((SessionIdentity::from_row(&row), pair))
    }

    /// Registers a new account and logs it straight in.
    pub async fn signup(
        &self,
        data: SignupData,
        meta: &ClientMetadata,
    ) -> AppResult<(User, TokenPair)> {
        // Clinic existence is a validation failure, not a 404: the client
        // supplied a bad tenant id.
        self.clinics
            .find_active(data.clinic_id)
            .await?
            .ok_or_else(|| AppError::validation("Invalid clinic"))?;

        self.policy.check(&data.password)?;
        let password_hash = self.hasher.hash_password(&data.password)?;

        let user = self
            .users
            .create(&CreateUser {
                clinic_id: data.clinic_id,
                email: data.email,
                password_hash,
                first_name: data.first_name,
                last_name: data.last_name,
                role: data.role,
                phone: data.phone,
                license_number: data.license_number,
                specialization: data.specialization,
            })
            .await?;

        let pair = self.issue(&user, Some(meta)).await?;
        info!(user_id = %user.id, clinic_id = %user.clinic_id, role = %user.role, "user registered");
        Ok((user, pair))
    }

    /// Verifies an access token against live database state.
    ///
    /// Token claims prove only that the token was validly signed; identity
    /// and liveness come from the current user and clinic rows. A missing
    /// or deactivated user, or a deactivated clinic, yields `SessionRevoked`.
    pub async fn verify(&self, access_token: &str) -> AppResult<SessionIdentity> {
        let claims = self.decoder.decode_access_token(access_token)?;

        let row = self
            .users
            .find_with_clinic(claims.sub)
            .await?
            .ok_or_else(|| AppError::session_revoked("Session is no longer valid"))?;

        if !row.is_session_valid() {
            return Err(AppError::session_revoked("Session is no longer valid"));
        }

        Ok(SessionIdentity::from_row(&row))
    }

    /// Rotates a refresh token: claims the old one, issues a new pair.
    ///
    /// The claim deletes the stored row in the same statement that checks
    /// it, so a replayed or concurrently-used token finds nothing and is
    /// rejected. The loser of a race gets `SessionRevoked`, same as a
    /// stolen-then-reused token.
    ///
    /// Rotation continues an existing session; it never appends to the
    /// ledger, which records logins only.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(SessionIdentity, TokenPair)> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let fingerprint = token_fingerprint(refresh_token);

        self.tokens
            .claim(claims.sub, &fingerprint)
            .await?
            .ok_or_else(|| AppError::session_revoked("Refresh token is no longer valid"))?;

        // The old row is gone either way now; a deactivated account ends
        // its session here rather than getting fresh tokens.
        let row = self
            .users
            .find_with_clinic(claims.sub)
            .await?
            .ok_or_else(|| AppError::session_revoked("Session is no longer valid"))?;

        if !row.is_session_valid() {
            return Err(AppError::session_revoked("Session is no longer valid"));
        }

        let pair = self.issue(&row.user, None).await?;
        Ok((SessionIdentity::from_row(&row), pair))
    }

    /// Ends a session. Best-effort: logout must always succeed from the
    /// client's point of view, so storage failures are logged and swallowed.
    pub async fn logout(&self, refresh_token: Option<&str>) {
        let Some(token) = refresh_token else {
            return;
        };

        let claims = match self.decoder.decode_refresh_token(token) {
            Ok(claims) => claims,
            // An expired or garbled cookie still clears client-side.
            Err(e) => {
                warn!(error = %e, "logout with undecodable refresh token");
                return;
            }
        };

        let fingerprint = token_fingerprint(token);
        if let Err(e) = self.tokens.claim(claims.sub, &fingerprint).await {
            warn!(user_id = %claims.sub, error = %e, "failed to delete refresh token on logout");
        }
        match self.ledger.close_open_for_user(claims.sub).await {
            Ok(closed) => {
                info!(user_id = %claims.sub, closed, "user logged out");
            }
            Err(e) => {
                warn!(user_id = %claims.sub, error = %e, "failed to close ledger entries on logout");
            }
        }
    }

    /// Revokes every refresh token a user holds and closes their open
    /// ledger entries. Used on deactivation and forced sign-out.
    pub async fn revoke_all(&self, user_id: Uuid) -> AppResult<u64> {
        let revoked = self.tokens.delete_all_for_user(user_id).await?;
        self.ledger.close_open_for_user(user_id).await?;
        info!(user_id = %user_id, revoked, "revoked all sessions for user");
        Ok(revoked)
    }

    /// The user's most recent ledger entries, newest first.
    pub async fn recent_sessions(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<UserSession>> {
        self.ledger.recent_for_user(user_id, limit).await
    }

    /// Changes a user's password after re-verifying the current one, then
    /// revokes all outstanding refresh tokens.
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        // The caller is already authenticated; a wrong current password is
        // a bad request here, not a failed login.
        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::validation("Current password is incorrect"));
        }

        self.policy.check(new_password)?;
        let hash = self.hasher.hash_password(new_password)?;
        self.users.change_password(user.id, &hash).await?;

        // Old tokens were minted against the old credential.
        self.revoke_all(user.id).await?;
        Ok(())
    }

    /// Signs and persists a token pair for a user.
    ///
    /// Ledger metadata is recorded when present; the whole issuance commits
    /// in one transaction inside the repository.
    async fn issue(&self, user: &User, meta: Option<&ClientMetadata>) -> AppResult<TokenPair> {
        let pair = self.encoder.generate_token_pair(user)?;
        let fingerprint = token_fingerprint(&pair.refresh_token);
        self.tokens
            .record_issuance(user.id, &fingerprint, pair.refresh_expires_at, meta)
            .await?;
        Ok(pair)
    }
}
