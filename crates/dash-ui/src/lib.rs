//! Terminal UI layer for the CloudSim dashboard.
//!
//! Provides themes, the header and summary-card components, entity table
//! views, charts, and the main application event loop built on top of
//! [`ratatui`] for rendering simulation results in the terminal.

pub mod app;
pub mod charts;
pub mod components;
pub mod table_view;
pub mod themes;

pub use dash_core as core;
