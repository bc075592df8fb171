//! Password strength policy for signup and password changes.

use clinichub_core::error::AppError;

/// Minimum character-class requirements for new passwords.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum length.
    min_length: usize,
}

impl PasswordPolicy {
    /// Creates a policy with the given minimum length.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Checks a candidate password: minimum length plus at least one
    /// uppercase letter, one lowercase letter, one digit, and one special
    /// character. Returns a `Validation` error naming the failed rule.
    pub fn check(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.min_length
            )));
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AppError::validation(
                "Password must contain an uppercase letter",
            ));
        }
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(AppError::validation(
                "Password must contain a lowercase letter",
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation("Password must contain a digit"));
        }
        if !password.chars().any(|c| "@$!%*?&#^_-".contains(c)) {
            return Err(AppError::validation(
                "Password must contain a special character",
            ));
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(8)
    }
}
