//! Auth handlers — signup, login, refresh, logout, me, session history.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;

use clinichub_auth::session::SignupData;
use clinichub_core::error::AppError;

use crate::cookies::{self, REFRESH_COOKIE};
use crate::dto::request::{LoginRequest, SessionsQuery, SignupRequest, validate};
use crate::dto::response::{
    ApiResponse, IdentityResponse, MessageResponse, SessionEntryResponse, SessionResponse,
    UserResponse,
};
use crate::error::ApiError;
use crate::extractors::{ClientMeta, CurrentUser};
use crate::state::AppState;

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    meta: ClientMeta,
    jar: CookieJar,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&req)?;

    let (user, pair) = state
        .session_manager
        .signup(
            SignupData {
                clinic_id: req.clinic_id,
                email: req.email,
                password: req.password,
                first_name: req.first_name,
                last_name: req.last_name,
                role: req.role,
                phone: req.phone,
                license_number: req.license_number,
                specialization: req.specialization,
            },
            &meta,
        )
        .await?;

    let (access, refresh) = cookies::session_cookies(&pair, &state.config.auth);
    Ok((
        StatusCode::CREATED,
        jar.add(access).add(refresh),
        Json(ApiResponse::ok(UserResponse::from(&user))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    meta: ClientMeta,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate(&req)?;

    let (identity, pair) = state
        .session_manager
        .login(&req.email, &req.password, &meta)
        .await?;

    let (access, refresh) = cookies::session_cookies(&pair, &state.config.auth);
    let body = SessionResponse {
        user: IdentityResponse::new(&identity, state.rbac.permission_strings(&identity.role)),
        access_expires_at: pair.access_expires_at,
        refresh_expires_at: pair.refresh_expires_at,
    };
    Ok((jar.add(access).add(refresh), Json(ApiResponse::ok(body))))
}

/// POST /api/auth/refresh
///
/// Rotates the refresh token: the presented token is consumed whether or
/// not the rotation succeeds, so a replay after this call fails. No
/// ledger entry is written; rotation is not a login.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::invalid_token("Missing refresh token"))?;

    let (identity, pair) = state.session_manager.refresh(&token).await?;

    let (access, refresh) = cookies::session_cookies(&pair, &state.config.auth);
    let body = SessionResponse {
        user: IdentityResponse::new(&identity, state.rbac.permission_strings(&identity.role)),
        access_expires_at: pair.access_expires_at,
        refresh_expires_at: pair.refresh_expires_at,
    };
    Ok((jar.add(access).add(refresh), Json(ApiResponse::ok(body))))
}

/// POST /api/auth/logout
///
/// Always clears the cookies, even when the refresh token was already
/// invalid; logout is not allowed to fail from the client's view.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let token = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());
    state.session_manager.logout(token.as_deref()).await;

    let (access, refresh) = cookies::clearing_cookies(&state.config.auth);
    (
        jar.add(access).add(refresh),
        Json(ApiResponse::ok(MessageResponse::new(
            "Logged out successfully",
        ))),
    )
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Json<ApiResponse<IdentityResponse>> {
    Json(ApiResponse::ok(IdentityResponse::new(
        &user,
        state.rbac.permission_strings(&user.role),
    )))
}

/// GET /api/auth/sessions
pub async fn sessions(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<SessionsQuery>,
) -> Result<Json<ApiResponse<Vec<SessionEntryResponse>>>, ApiError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let entries = state.session_manager.recent_sessions(user.id, limit).await?;
    Ok(Json(ApiResponse::ok(
        entries.into_iter().map(SessionEntryResponse::from).collect(),
    )))
}
