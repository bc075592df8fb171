//! Role-based access control: the static permission table and its enforcer.

pub mod enforcer;
pub mod permissions;

pub use enforcer::RbacEnforcer;
pub use permissions::{Permission, PermissionTable};
