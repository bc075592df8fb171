//! Database repository implementations.
//!
//! Every repository method touching user- or record-level data takes the
//! clinic id as an explicit parameter, so omitting tenant scoping is a
//! compile-time error rather than a runtime data leak. The exceptions are
//! identity lookups (by primary key or unique email) that exist precisely
//! to discover the tenant.

pub mod clinic;
pub mod refresh_token;
pub mod session;
pub mod user;

pub use clinic::ClinicRepository;
pub use refresh_token::RefreshTokenRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
