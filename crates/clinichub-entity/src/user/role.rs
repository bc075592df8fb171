//! User role enumeration.
//!
//! One closed enum with a central serialization mapping: the database
//! persists SCREAMING_SNAKE_CASE (`LAB_TECH`), the wire format is lowercase
//! snake_case (`lab_tech`). No ad hoc case conversion anywhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in a clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Clinic administrator.
    Admin,
    /// Physician.
    Doctor,
    /// Nurse.
    Nurse,
    /// Laboratory technician.
    LabTech,
    /// Patient.
    Patient,
    /// Front-desk receptionist.
    Receptionist,
    /// Pharmacist.
    Pharmacist,
}

impl UserRole {
    /// Numeric rank used for "acts on behalf of" comparisons.
    ///
    /// patient < receptionist < {lab_tech, pharmacist} < nurse < doctor < admin.
    /// Distinct from the permission table.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Patient => 1,
            Self::Receptionist => 2,
            Self::LabTech => 3,
            Self::Pharmacist => 3,
            Self::Nurse => 4,
            Self::Doctor => 5,
            Self::Admin => 6,
        }
    }

    /// Check whether this role can act on behalf of `other`.
    pub fn can_act_for(&self, other: &UserRole) -> bool {
        self.rank() >= other.rank()
    }

    /// Check whether this role is the clinic administrator.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as its lowercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
            Self::LabTech => "lab_tech",
            Self::Patient => "patient",
            Self::Receptionist => "receptionist",
            Self::Pharmacist => "pharmacist",
        }
    }

    /// All roles, for table-driven tests and admin listings.
    pub const ALL: [UserRole; 7] = [
        Self::Admin,
        Self::Doctor,
        Self::Nurse,
        Self::LabTech,
        Self::Patient,
        Self::Receptionist,
        Self::Pharmacist,
    ];
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = clinichub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "nurse" => Ok(Self::Nurse),
            "lab_tech" => Ok(Self::LabTech),
            "patient" => Ok(Self::Patient),
            "receptionist" => Ok(Self::Receptionist),
            "pharmacist" => Ok(Self::Pharmacist),
            other => Err(clinichub_core::AppError::validation(format!(
                "Unknown role: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(UserRole::Admin.can_act_for(&UserRole::Doctor));
        assert!(UserRole::Doctor.can_act_for(&UserRole::Nurse));
        assert!(UserRole::Nurse.can_act_for(&UserRole::Pharmacist));
        assert!(!UserRole::Patient.can_act_for(&UserRole::Receptionist));
        // lab_tech and pharmacist share a rank, so each can act for the other
        assert!(UserRole::LabTech.can_act_for(&UserRole::Pharmacist));
        assert!(UserRole::Pharmacist.can_act_for(&UserRole::LabTech));
    }

    #[test]
    fn test_from_str_accepts_both_cases() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("LAB_TECH".parse::<UserRole>().unwrap(), UserRole::LabTech);
        assert!("janitor".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_wire_form_is_lowercase() {
        let json = serde_json::to_string(&UserRole::LabTech).unwrap();
        assert_eq!(json, "\"lab_tech\"");
        let role: UserRole = serde_json::from_str("\"receptionist\"").unwrap();
        assert_eq!(role, UserRole::Receptionist);
    }
}
