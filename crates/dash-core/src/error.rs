use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the CloudSim dashboard.
#[derive(Error, Debug)]
pub enum DashError {
    /// The summary text contained no header line at all.
    #[error("Summary CSV has no header line")]
    MissingHeader,

    /// A required column is absent from the header line.
    #[error("Summary CSV is missing required column: {0}")]
    MissingColumn(String),

    /// The configured summary file or directory does not exist.
    #[error("Summary source not found: {0}")]
    SourceNotFound(PathBuf),

    /// No CSV summary files were found under the given directory.
    #[error("No CSV files found in {0}")]
    NoSummaryFiles(PathBuf),

    /// A summary file could not be opened or read from disk.
    #[error("Failed to read summary {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_header() {
        let err = DashError::MissingHeader;
        assert_eq!(err.to_string(), "Summary CSV has no header line");
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = DashError::MissingColumn("Metric".to_string());
        assert_eq!(
            err.to_string(),
            "Summary CSV is missing required column: Metric"
        );
    }

    #[test]
    fn test_error_display_source_not_found() {
        let err = DashError::SourceNotFound(PathBuf::from("/missing/results"));
        assert_eq!(err.to_string(), "Summary source not found: /missing/results");
    }

    #[test]
    fn test_error_display_no_summary_files() {
        let err = DashError::NoSummaryFiles(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No CSV files found in /empty/dir");
    }

    #[test]
    fn test_error_display_source_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DashError::SourceRead {
            path: PathBuf::from("/some/summary.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read summary"));
        assert!(msg.contains("/some/summary.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_terminal() {
        let err = DashError::Terminal("crossterm failure".to_string());
        assert_eq!(err.to_string(), "Terminal error: crossterm failure");
    }

    #[test]
    fn test_error_display_config() {
        let err = DashError::Config("bad refresh rate".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad refresh rate");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: DashError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
