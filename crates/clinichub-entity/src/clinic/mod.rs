//! Clinic (tenant) entity.

pub mod model;

pub use model::{Clinic, ClinicStats, CreateClinic, RoleCount};
