//! # clinichub-auth
//!
//! Authentication and authorization core for ClinicHub.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing and strength policy
//! - `jwt` — access/refresh token signing and verification
//! - `rbac` — static role-to-permission table and enforcement
//! - `session` — session lifecycle: login, signup, verify, refresh, logout

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod session;

pub use jwt::{AccessClaims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::{PasswordHasher, PasswordPolicy};
pub use rbac::{Permission, RbacEnforcer};
pub use session::{CleanupTask, SessionIdentity, SessionManager, SignupData};
