//! User handlers — profile self-service and staff management.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use clinichub_auth::rbac::Permission;
use clinichub_core::error::AppError;
use clinichub_entity::user::UserRole;
use clinichub_entity::user::model::UpdateProfile;

use crate::cookies;
use crate::dto::request::{
    ChangePasswordRequest, ListUsersQuery, SetActiveRequest, UpdateProfileRequest, validate,
};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    validate(&req)?;

    let updated = state
        .user_repo
        .update_profile(
            user.clinic_id,
            user.id,
            &UpdateProfile {
                first_name: req.first_name,
                last_name: req.last_name,
                phone: req.phone,
                specialization: req.specialization,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&updated))))
}

/// PUT /api/users/me/password
///
/// A successful change revokes every outstanding refresh token, so the
/// response also clears the session cookies; the client must log in again.
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    jar: CookieJar,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&req)?;

    let record = state
        .user_repo
        .find_in_clinic(user.clinic_id, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    state
        .session_manager
        .change_password(&record, &req.current_password, &req.new_password)
        .await?;

    let (access, refresh) = cookies::clearing_cookies(&state.config.auth);
    Ok((
        jar.add(access).add(refresh),
        Json(ApiResponse::ok(MessageResponse::new(
            "Password changed; please log in again",
        ))),
    ))
}

/// GET /api/users
///
/// Staff roster for the caller's clinic. Restricted to admins and doctors.
pub async fn list_users(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, ApiError> {
    if !(user.role.is_admin() || user.role == UserRole::Doctor) {
        return Err(AppError::forbidden(
            "Only admins and doctors may list clinic users",
        )
        .into());
    }

    let users = state
        .user_repo
        .list_by_clinic(user.clinic_id, query.role, query.is_active)
        .await?;

    Ok(Json(ApiResponse::ok(
        users.iter().map(UserResponse::from).collect(),
    )))
}

/// PUT /api/users/{id}/status
///
/// Deactivation also revokes the target's refresh tokens and closes their
/// ledger entries, ending their sessions within one access-token TTL.
pub async fn set_active(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    state
        .rbac
        .require_permission(&user.role, &Permission::UserUpdate)?;

    if id == user.id {
        return Err(AppError::validation(
            "Cannot change your own active status",
        )
        .into());
    }

    let target = state
        .user_repo
        .find_in_clinic(user.clinic_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    state.rbac.require_rank(&user.role, &target.role)?;

    let updated = state
        .user_repo
        .set_active(user.clinic_id, id, req.is_active)
        .await?;

    if !req.is_active {
        state.session_manager.revoke_all(id).await?;
    }

    Ok(Json(ApiResponse::ok(UserResponse::from(&updated))))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .rbac
        .require_permission(&user.role, &Permission::UserDelete)?;

    if id == user.id {
        return Err(AppError::validation("Cannot delete your own account").into());
    }

    let target = state
        .user_repo
        .find_in_clinic(user.clinic_id, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    state.rbac.require_rank(&user.role, &target.role)?;

    // Revoke first so no live session survives the row's deletion.
    state.session_manager.revoke_all(id).await?;
    state.user_repo.delete(user.clinic_id, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse::new("User deleted"))))
}
