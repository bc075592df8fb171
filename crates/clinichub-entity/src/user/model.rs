//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user belonging to exactly one clinic.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// The clinic (tenant) this user belongs to.
    pub clinic_id: Uuid,
    /// Email address, unique, stored lowercase.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// Phone number.
    pub phone: Option<String>,
    /// Professional license number (doctors, nurses, pharmacists).
    pub license_number: Option<String>,
    /// Medical specialization.
    pub specialization: Option<String>,
    /// Whether the account is active. Deactivation is the soft-delete path.
    pub is_active: bool,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Last successful login time.
    pub last_login: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A user joined with its clinic's liveness columns.
///
/// Used by session verification, which must recheck both active flags on
/// every request.
#[derive(Debug, Clone, FromRow)]
pub struct UserWithClinic {
    /// The user row.
    #[sqlx(flatten)]
    pub user: User,
    /// The clinic's active flag.
    pub clinic_is_active: bool,
    /// The clinic's name.
    pub clinic_name: String,
}

impl UserWithClinic {
    /// Whether both the user and its clinic are active.
    pub fn is_session_valid(&self) -> bool {
        self.user.is_active && self.clinic_is_active
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Owning clinic.
    pub clinic_id: Uuid,
    /// Email address (will be lowercased on insert).
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Assigned role.
    pub role: UserRole,
    /// Phone number.
    pub phone: Option<String>,
    /// Professional license number.
    pub license_number: Option<String>,
    /// Medical specialization.
    pub specialization: Option<String>,
}

/// Data for updating a user's own profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfile {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New specialization.
    pub specialization: Option<String>,
}
