//! Refresh token entity.

pub mod model;

pub use model::RefreshToken;
