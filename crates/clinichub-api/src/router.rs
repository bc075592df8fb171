//! Route definitions for the ClinicHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(clinic_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Auth endpoints: signup, login, refresh, logout, me, session history.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/sessions", get(handlers::auth::sessions))
}

/// User self-service and staff management endpoints.
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/me", put(handlers::user::update_profile))
        .route("/users/me/password", put(handlers::user::change_password))
        .route("/users/{id}/status", put(handlers::user::set_active))
        .route("/users/{id}", delete(handlers::user::delete_user))
}

/// Clinic onboarding and dashboard endpoints.
fn clinic_routes() -> Router<AppState> {
    Router::new()
        .route("/clinics", post(handlers::clinic::register_clinic))
        .route("/clinic", get(handlers::clinic::current_clinic))
        .route("/clinic/stats", get(handlers::clinic::stats))
}

/// Health check endpoint (no auth required).
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
