//! Runtime orchestration layer for the CloudSim dashboard.
//!
//! Coordinates the data-ingestion and UI layers: a TTL-cached snapshot
//! manager and a background refresh loop feeding the TUI through a channel.

pub mod data_manager;
pub mod orchestrator;

pub use dash_core as core;
pub use dash_data as data;
