//! Shared foundation for the CloudSim dashboard.
//!
//! Holds the entity data model, the workspace-wide error type, numeric
//! formatting helpers, and the CLI settings struct used by the binary.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashError, Result};
