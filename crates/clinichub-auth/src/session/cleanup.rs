//! Background sweeps for expired tokens and aged ledger entries.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use clinichub_core::config::SessionConfig;
use clinichub_core::result::AppResult;
use clinichub_database::repositories::{RefreshTokenRepository, SessionRepository};

/// Periodic maintenance: purge expired refresh tokens and ledger entries
/// older than the retention window.
///
/// Everything the sweeps delete is already unusable (expired tokens fail
/// the claim predicate, old ledger rows are history), so a missed run only
/// delays reclamation.
#[derive(Debug, Clone)]
pub struct CleanupTask {
    tokens: RefreshTokenRepository,
    ledger: SessionRepository,
    retention_days: i64,
    interval: Duration,
}

impl CleanupTask {
    pub fn new(
        config: &SessionConfig,
        tokens: RefreshTokenRepository,
        ledger: SessionRepository,
    ) -> Self {
        Self {
            tokens,
            ledger,
            retention_days: config.ledger_retention_days as i64,
            interval: Duration::from_secs(config.cleanup_interval_minutes * 60),
        }
    }

    /// Runs one sweep. Returns (tokens purged, ledger entries purged).
    pub async fn run_sweep(&self) -> AppResult<(u64, u64)> {
        let tokens_purged = self.tokens.purge_expired().await?;

        let cutoff = Utc::now() - chrono::Duration::days(self.retention_days);
        let ledger_purged = self.ledger.purge_older_than(cutoff).await?;

        Ok((tokens_purged, ledger_purged))
    }

    /// Spawns the recurring sweep loop on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // The first tick fires immediately; skip it so startup is not
            // serialized behind a sweep.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                match self.run_sweep().await {
                    Ok((tokens, ledger)) => {
                        info!(tokens, ledger, "session cleanup sweep complete");
                    }
                    Err(e) => {
                        error!(error = %e, "session cleanup sweep failed");
                    }
                }
            }
        })
    }
}
