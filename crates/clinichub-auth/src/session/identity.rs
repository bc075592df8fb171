//! Verified caller identity, produced by session verification.

use serde::Serialize;
use uuid::Uuid;

use clinichub_entity::user::{UserRole, UserWithClinic};

/// The authenticated caller, as established for one request.
///
/// Built from live database state during verification, never from token
/// claims alone, so a deactivated user or clinic can not appear here.
#[derive(Debug, Clone, Serialize)]
pub struct SessionIdentity {
    /// User ID.
    pub id: Uuid,
    /// The clinic (tenant) the user belongs to.
    pub clinic_id: Uuid,
    /// Clinic display name.
    pub clinic_name: String,
    /// Email address.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Current role, from the database row.
    pub role: UserRole,
    /// Whether the email address has been verified.
    pub email_verified: bool,
}

impl SessionIdentity {
    /// Builds an identity from a verified user-with-clinic row.
    pub fn from_row(row: &UserWithClinic) -> Self {
        Self {
            id: row.user.id,
            clinic_id: row.user.clinic_id,
            clinic_name: row.clinic_name.clone(),
            email: row.user.email.clone(),
            first_name: row.user.first_name.clone(),
            last_name: row.user.last_name.clone(),
            role: row.user.role,
            email_verified: row.user.email_verified,
        }
    }
}
