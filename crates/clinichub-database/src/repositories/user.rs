//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use clinichub_core::error::{AppError, ErrorKind};
use clinichub_core::result::AppResult;
use clinichub_entity::user::model::{CreateUser, UpdateProfile};
use clinichub_entity::user::{User, UserRole, UserWithClinic};

/// Columns selected when joining a user with its clinic's liveness state.
const USER_WITH_CLINIC: &str = "SELECT u.*, c.is_active AS clinic_is_active, c.name AS clinic_name \
     FROM users u JOIN clinics c ON c.id = u.clinic_id";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key, joined with clinic liveness.
    ///
    /// Identity lookup used by session verification; the caller is expected
    /// to check both active flags via [`UserWithClinic::is_session_valid`].
    pub async fn find_with_clinic(&self, id: Uuid) -> AppResult<Option<UserWithClinic>> {
        sqlx::query_as::<_, UserWithClinic>(&format!("{USER_WITH_CLINIC} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive), joined with clinic liveness.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserWithClinic>> {
        sqlx::query_as::<_, UserWithClinic>(&format!(
            "{USER_WITH_CLINIC} WHERE LOWER(u.email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
        })
    }

    /// Find a user by primary key within one clinic.
    pub async fn find_in_clinic(&self, clinic_id: Uuid, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND clinic_id = $2")
            .bind(id)
            .bind(clinic_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user in clinic", e)
            })
    }

    /// List users in one clinic, optionally filtered by role and active flag.
    pub async fn list_by_clinic(
        &self,
        clinic_id: Uuid,
        role: Option<UserRole>,
        is_active: Option<bool>,
    ) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE clinic_id = $1 \
               AND ($2::user_role IS NULL OR role = $2) \
               AND ($3::boolean IS NULL OR is_active = $3) \
             ORDER BY role ASC, last_name ASC, first_name ASC",
        )
        .bind(clinic_id)
        .bind(role)
        .bind(is_active)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list clinic users", e))
    }

    /// Create a new user. Email is lowercased on insert.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (clinic_id, email, password_hash, first_name, last_name, role, \
                                phone, license_number, specialization) \
             VALUES ($1, LOWER($2), $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(data.clinic_id)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(data.role)
        .bind(&data.phone)
        .bind(&data.license_number)
        .bind(&data.specialization)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("Email already in use".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Update a user's own profile fields, scoped to their clinic.
    pub async fn update_profile(
        &self,
        clinic_id: Uuid,
        id: Uuid,
        data: &UpdateProfile,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET first_name = COALESCE($3, first_name), \
                              last_name = COALESCE($4, last_name), \
                              phone = COALESCE($5, phone), \
                              specialization = COALESCE($6, specialization), \
                              updated_at = NOW() \
             WHERE id = $1 AND clinic_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(clinic_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.phone)
        .bind(&data.specialization)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Set a user's active flag, scoped to their clinic.
    pub async fn set_active(&self, clinic_id: Uuid, id: Uuid, is_active: bool) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET is_active = $3, updated_at = NOW() \
             WHERE id = $1 AND clinic_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(clinic_id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set active flag", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Physically delete a user, scoped to their clinic. Admin-only path;
    /// normal removal is deactivation via [`Self::set_active`].
    pub async fn delete(&self, clinic_id: Uuid, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND clinic_id = $2")
            .bind(id)
            .bind(clinic_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }
        Ok(())
    }

    /// Replace a user's password hash.
    pub async fn change_password(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to change password", e))?;
        Ok(())
    }
}
