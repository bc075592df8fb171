//! Application state shared across all handlers.

use std::sync::Arc;

use clinichub_auth::rbac::RbacEnforcer;
use clinichub_auth::session::SessionManager;
use clinichub_core::config::AppConfig;
use clinichub_database::DatabasePool;
use clinichub_database::repositories::{ClinicRepository, UserRepository};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped or pool-backed, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool wrapper.
    pub db: DatabasePool,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Role-based access control enforcer.
    pub rbac: Arc<RbacEnforcer>,
    /// User repository, for operations outside the session lifecycle.
    pub user_repo: Arc<UserRepository>,
    /// Clinic repository.
    pub clinic_repo: Arc<ClinicRepository>,
}
