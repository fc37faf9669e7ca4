//! Reusable rendering components shared by the dashboard views.

pub mod header;
pub mod summary;
