//! Field-work assignment and verification core.
//!
//! Managers create location-bound tasks, employees check in/out and report
//! progress from the field, and every progress report is cross-checked
//! against the task's geofence. The surrounding product (auth, HTTP,
//! rendering) is expected to call into these services with a resolved
//! [`model::Actor`] and present whatever comes back.

pub mod config;
pub mod error;
pub mod geo;
pub mod model;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use store::Store;
