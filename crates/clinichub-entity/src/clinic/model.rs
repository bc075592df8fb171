//! Clinic entity model.
//!
//! The clinic is the multi-tenancy isolation boundary: every user belongs
//! to exactly one clinic, and a session is valid only while both the user
//! and its clinic are active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

/// A clinic (tenant).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Clinic {
    /// Unique clinic identifier.
    pub id: Uuid,
    /// Clinic name.
    pub name: String,
    /// Contact email, unique, stored lowercase.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Whether the clinic is active. Deactivating a clinic invalidates
    /// every session in it on the next verification.
    pub is_active: bool,
    /// When the clinic was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new clinic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClinic {
    /// Clinic name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
}

/// Per-role user count for the dashboard breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleCount {
    /// The role.
    pub role: UserRole,
    /// Number of active users holding it.
    pub count: i64,
}

/// Aggregate user statistics for one clinic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicStats {
    /// Total users in the clinic.
    pub total_users: i64,
    /// Users with `is_active = true`.
    pub active_users: i64,
    /// Active users broken down by role.
    pub users_by_role: Vec<RoleCount>,
    /// Users created in the last 30 days.
    pub recent_registrations: i64,
}
