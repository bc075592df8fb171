//! Application wiring — repositories, session manager, state, and server.

use std::sync::Arc;

use clinichub_auth::rbac::RbacEnforcer;
use clinichub_auth::session::{CleanupTask, SessionManager};
use clinichub_core::config::AppConfig;
use clinichub_core::error::AppError;
use clinichub_database::DatabasePool;
use clinichub_database::repositories::{
    ClinicRepository, RefreshTokenRepository, SessionRepository, UserRepository,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared application state from configuration and a connected
/// database pool.
pub fn build_state(config: AppConfig, db: DatabasePool) -> AppState {
    let pool = db.pool().clone();

    let user_repo = UserRepository::new(pool.clone());
    let clinic_repo = ClinicRepository::new(pool.clone());
    let token_repo = RefreshTokenRepository::new(pool.clone());
    let ledger_repo = SessionRepository::new(pool);

    let session_manager = SessionManager::new(
        &config.auth,
        user_repo.clone(),
        clinic_repo.clone(),
        token_repo,
        ledger_repo,
    );

    AppState {
        config: Arc::new(config),
        db,
        session_manager: Arc::new(session_manager),
        rbac: Arc::new(RbacEnforcer::new()),
        user_repo: Arc::new(user_repo),
        clinic_repo: Arc::new(clinic_repo),
    }
}

/// Runs the ClinicHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let session_config = config.session.clone();
    let pool = db.pool().clone();

    let state = build_state(config, db);

    // Periodic token and ledger maintenance.
    let cleanup = CleanupTask::new(
        &session_config,
        RefreshTokenRepository::new(pool.clone()),
        SessionRepository::new(pool),
    );
    let cleanup_handle = cleanup.spawn();

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(%addr, "ClinicHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    cleanup_handle.abort();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
    }
}
