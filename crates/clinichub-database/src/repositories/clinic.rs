//! Clinic repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use clinichub_core::error::{AppError, ErrorKind};
use clinichub_core::result::AppResult;
use clinichub_entity::clinic::{Clinic, ClinicStats, CreateClinic, RoleCount};

/// Repository for clinic (tenant) operations.
#[derive(Debug, Clone)]
pub struct ClinicRepository {
    pool: PgPool,
}

impl ClinicRepository {
    /// Create a new clinic repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an *active* clinic by primary key. Inactive clinics are treated
    /// as absent everywhere except admin tooling.
    pub async fn find_active(&self, id: Uuid) -> AppResult<Option<Clinic>> {
        sqlx::query_as::<_, Clinic>("SELECT * FROM clinics WHERE id = $1 AND is_active = TRUE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find clinic", e))
    }

    /// Find an active clinic by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Clinic>> {
        sqlx::query_as::<_, Clinic>(
            "SELECT * FROM clinics WHERE LOWER(email) = LOWER($1) AND is_active = TRUE",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find clinic by email", e)
        })
    }

    /// Create a new clinic. Email is lowercased on insert.
    pub async fn create(&self, data: &CreateClinic) -> AppResult<Clinic> {
        sqlx::query_as::<_, Clinic>(
            "INSERT INTO clinics (name, email, phone, address) \
             VALUES ($1, LOWER($2), $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("clinics_email_key") =>
            {
                AppError::conflict("Clinic email already registered".to_string())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create clinic", e),
        })
    }

    /// Aggregate user statistics for one clinic's dashboard.
    pub async fn stats(&self, clinic_id: Uuid) -> AppResult<ClinicStats> {
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE clinic_id = $1")
            .bind(clinic_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let active_users: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE clinic_id = $1 AND is_active = TRUE",
        )
        .bind(clinic_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count active users", e)
        })?;

        let users_by_role = sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS count FROM users \
             WHERE clinic_id = $1 AND is_active = TRUE \
             GROUP BY role ORDER BY role",
        )
        .bind(clinic_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count users by role", e)
        })?;

        let recent_registrations: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users \
             WHERE clinic_id = $1 AND created_at >= NOW() - INTERVAL '30 days'",
        )
        .bind(clinic_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count recent registrations", e)
        })?;

        Ok(ClinicStats {
            total_users,
            active_users,
            users_by_role,
            recent_registrations,
        })
    }
}
