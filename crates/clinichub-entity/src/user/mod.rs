//! User entity: model and role enumeration.

pub mod model;
pub mod role;

pub use model::{CreateUser, UpdateProfile, User, UserWithClinic};
pub use role::UserRole;
