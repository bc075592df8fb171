//! Request handlers, grouped by domain.

pub mod auth;
pub mod clinic;
pub mod health;
pub mod user;
