//! Data ingestion layer for the CloudSim dashboard.
//!
//! Responsible for discovering and reading summary CSV files produced by the
//! simulation, pivoting long-format rows into per-entity records, computing
//! summary statistics and running the top-level snapshot pipeline.

pub mod aggregator;
pub mod analysis;
pub mod csv;
pub mod reader;
pub mod stats;

pub use dash_core as core;
