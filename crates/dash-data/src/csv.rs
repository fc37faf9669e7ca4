//! Minimal CSV parsing for simulation summary files.
//!
//! The summary format is a deliberately small CSV subset: comma-separated
//! fields with no quoting or escaping, one fact per line. The producer is
//! machine-generated and never emits embedded commas, so this parser splits
//! on raw commas rather than implementing RFC 4180.

use std::collections::HashMap;

use dash_core::{DashError, Result};

/// A parsed summary file: the header fields plus one string map per data line.
///
/// Row order matches input line order.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    /// Header fields in file order, trimmed.
    pub headers: Vec<String>,
    /// One map per data line, keyed by header field.
    pub rows: Vec<HashMap<String, String>>,
}

impl CsvTable {
    /// `true` when the header names a column called `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }
}

/// Parse raw summary text into a [`CsvTable`].
///
/// * The whole input is trimmed before splitting on line boundaries.
/// * The first non-trivial line is the header; each field is trimmed.
/// * Data lines bind positionally to the header: a line with fewer fields
///   than headers pads the missing ones with `""`; extra fields are dropped.
/// * Lines that are empty after trimming are skipped entirely.
/// * Input with no header line at all fails with [`DashError::MissingHeader`];
///   everything below that degrades gracefully instead of erroring.
pub fn parse_csv(text: &str) -> Result<CsvTable> {
    let mut lines = text.trim().lines().filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(DashError::MissingHeader)?;
    let headers: Vec<String> = header_line
        .split(',')
        .map(|field| field.trim().to_string())
        .collect();

    let rows: Vec<HashMap<String, String>> = lines
        .map(|line| {
            let values: Vec<&str> = line.split(',').collect();
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values.get(i).map(|v| v.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect();

    Ok(CsvTable { headers, rows })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
