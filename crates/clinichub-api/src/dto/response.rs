//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clinichub_auth::session::SessionIdentity;
use clinichub_entity::session::UserSession;
use clinichub_entity::user::{User, UserRole};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Full user record for responses. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Owning clinic.
    pub clinic_id: Uuid,
    /// Email address.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role (lowercase wire form).
    pub role: UserRole,
    /// Phone number.
    pub phone: Option<String>,
    /// Professional license number.
    pub license_number: Option<String>,
    /// Medical specialization.
    pub specialization: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Email verification flag.
    pub email_verified: bool,
    /// Last successful login.
    pub last_login: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            clinic_id: user.clinic_id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            phone: user.phone.clone(),
            license_number: user.license_number.clone(),
            specialization: user.specialization.clone(),
            is_active: user.is_active,
            email_verified: user.email_verified,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

/// The verified caller, as returned by login and `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    /// User ID.
    pub id: Uuid,
    /// Owning clinic.
    pub clinic_id: Uuid,
    /// Clinic display name.
    pub clinic_name: String,
    /// Email address.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Role (lowercase wire form).
    pub role: UserRole,
    /// Email verification flag.
    pub email_verified: bool,
    /// Permissions granted by the role, sorted.
    pub permissions: Vec<String>,
}

impl IdentityResponse {
    /// Builds the response from a verified identity plus its permissions.
    pub fn new(identity: &SessionIdentity, permissions: Vec<&'static str>) -> Self {
        Self {
            id: identity.id,
            clinic_id: identity.clinic_id,
            clinic_name: identity.clinic_name.clone(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            role: identity.role,
            email_verified: identity.email_verified,
            permissions: permissions.into_iter().map(String::from).collect(),
        }
    }
}

/// Login and refresh response. Tokens travel in cookies; the body carries
/// only their expirations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The authenticated user.
    pub user: IdentityResponse,
    /// When the access token expires.
    pub access_expires_at: DateTime<Utc>,
    /// When the refresh token expires.
    pub refresh_expires_at: DateTime<Utc>,
}

/// One session-history entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntryResponse {
    /// Ledger entry ID.
    pub id: Uuid,
    /// Client IP address.
    pub ip_address: Option<String>,
    /// Client user agent.
    pub user_agent: Option<String>,
    /// Login time.
    pub login_at: DateTime<Utc>,
    /// Logout time; `None` while still open.
    pub logout_at: Option<DateTime<Utc>>,
}

impl From<UserSession> for SessionEntryResponse {
    fn from(entry: UserSession) -> Self {
        Self {
            id: entry.id,
            ip_address: entry.ip_address,
            user_agent: entry.user_agent,
            login_at: entry.login_at,
            logout_at: entry.logout_at,
        }
    }
}
