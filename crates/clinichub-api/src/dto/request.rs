//! Request DTOs.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use clinichub_core::error::AppError;
use clinichub_entity::user::UserRole;

/// Runs `validator` checks and maps failures into the domain error.
pub fn validate(input: &impl Validate) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))
}

/// Login credentials.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account registration. Password strength is enforced by the session
/// manager's policy, not here; this layer checks shape only.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// The clinic to register under.
    pub clinic_id: Uuid,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// First name.
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    /// Requested role.
    pub role: UserRole,
    /// Phone number.
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    /// Professional license number.
    #[validate(length(max = 64))]
    pub license_number: Option<String>,
    /// Medical specialization.
    #[validate(length(max = 100))]
    pub specialization: Option<String>,
}

/// Profile self-service update. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New first name.
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    /// New last name.
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    /// New phone number.
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    /// New specialization.
    #[validate(length(max = 100))]
    pub specialization: Option<String>,
}

/// Password change. The current password is re-verified server-side.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New password, checked against the strength policy.
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Clinic registration (tenant onboarding).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateClinicRequest {
    /// Clinic display name.
    #[validate(length(min = 1, max = 200, message = "Clinic name is required"))]
    pub name: String,
    /// Contact email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Contact phone.
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    /// Postal address.
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

/// Query filters for the clinic user listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// Filter by role.
    pub role: Option<UserRole>,
    /// Filter by active flag.
    pub is_active: Option<bool>,
}

/// Query parameters for the session history listing.
#[derive(Debug, Default, Deserialize)]
pub struct SessionsQuery {
    /// Maximum entries to return (default 20, capped at 100).
    pub limit: Option<i64>,
}

/// Toggle payload for user activation.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    /// Desired active flag.
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LoginRequest {
            email: "doctor@clinic.test".into(),
            password: "pw".into(),
        };
        assert!(validate(&ok).is_ok());

        let bad_email = LoginRequest {
            email: "not-an-email".into(),
            password: "pw".into(),
        };
        assert!(validate(&bad_email).is_err());

        let empty_password = LoginRequest {
            email: "doctor@clinic.test".into(),
            password: String::new(),
        };
        assert!(validate(&empty_password).is_err());
    }

    #[test]
    fn test_signup_role_accepts_wire_form() {
        let req: SignupRequest = serde_json::from_value(serde_json::json!({
            "clinic_id": "7b7c3f44-2c9a-4e7e-9a6f-21a0f4f8b9a1",
            "email": "nurse@clinic.test",
            "password": "Str0ng-pass!",
            "first_name": "Kim",
            "last_name": "Okafor",
            "role": "lab_tech"
        }))
        .unwrap();
        assert_eq!(req.role, UserRole::LabTech);
    }
}
