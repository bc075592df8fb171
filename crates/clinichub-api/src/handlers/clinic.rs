//! Clinic handlers — tenant onboarding and dashboard statistics.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use clinichub_auth::rbac::Permission;
use clinichub_core::error::AppError;
use clinichub_entity::clinic::{Clinic, ClinicStats, CreateClinic};

use crate::dto::request::{CreateClinicRequest, validate};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/clinics
///
/// Tenant onboarding. Unauthenticated: a clinic must exist before its
/// first admin can sign up into it.
pub async fn register_clinic(
    State(state): State<AppState>,
    Json(req): Json<CreateClinicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&req)?;

    let clinic = state
        .clinic_repo
        .create(&CreateClinic {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(clinic))))
}

/// GET /api/clinic/stats
pub async fn stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<ClinicStats>>, ApiError> {
    state
        .rbac
        .require_permission(&user.role, &Permission::ReportsView)?;

    let stats = state.clinic_repo.stats(user.clinic_id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/clinic
pub async fn current_clinic(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApiResponse<Clinic>>, ApiError> {
    let clinic = state
        .clinic_repo
        .find_active(user.clinic_id)
        .await?
        .ok_or_else(|| AppError::not_found("Clinic not found"))?;
    Ok(Json(ApiResponse::ok(clinic)))
}
