//! # clinichub-database
//!
//! PostgreSQL connection pool management, migration runner, and the
//! per-entity repositories. All SQL lives in this crate; callers hold
//! repository handles and never see query strings.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
