//! Session ledger and cleanup configuration.

use serde::{Deserialize, Serialize};

/// Session ledger retention and cleanup scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How long closed ledger entries are retained, in days.
    #[serde(default = "default_retention")]
    pub ledger_retention_days: u64,
    /// Interval between cleanup sweeps, in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ledger_retention_days: default_retention(),
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

fn default_retention() -> u64 {
    90
}

fn default_cleanup_interval() -> u64 {
    60
}
