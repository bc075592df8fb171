//! # clinichub-entity
//!
//! Domain entity models for ClinicHub: users and roles, clinics (tenants),
//! refresh tokens, and the session audit ledger. Every struct mirrors one
//! relational table and derives `sqlx::FromRow`.

pub mod clinic;
pub mod session;
pub mod token;
pub mod user;

pub use clinic::Clinic;
pub use session::{ClientMetadata, UserSession};
pub use token::RefreshToken;
pub use user::{User, UserRole, UserWithClinic};
