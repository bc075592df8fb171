//! # clinichub-api
//!
//! HTTP surface for ClinicHub, built on Axum.
//!
//! ## Modules
//!
//! - `app` — state construction and server startup
//! - `router` — route table and middleware layers
//! - `handlers` — request handlers grouped by domain
//! - `extractors` — authenticated-caller and client-metadata extractors
//! - `cookies` — session cookie construction
//! - `dto` — request/response payloads
//! - `error` — `AppError` to HTTP response mapping

pub mod app;
pub mod cookies;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use router::build_router;
pub use state::AppState;
