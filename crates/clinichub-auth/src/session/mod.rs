//! Session lifecycle: login, signup, verification, refresh, logout, and
//! background maintenance.

pub mod cleanup;
pub mod identity;
pub mod manager;

pub use cleanup::CleanupTask;
pub use identity::SessionIdentity;
pub use manager::{SessionManager, SignupData};
