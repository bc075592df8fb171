//! Session audit ledger entity.

pub mod model;

pub use model::{ClientMetadata, UserSession};
