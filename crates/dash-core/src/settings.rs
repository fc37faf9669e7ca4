use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Terminal dashboard for CloudSim simulation summaries
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cloudsim-dash",
    about = "Terminal dashboard for CloudSim simulation summaries",
    version
)]
pub struct Settings {
    /// Summary CSV file, or a directory to search for one
    #[arg(long, default_value = "results")]
    pub source: PathBuf,

    /// Refresh rate in seconds (1-300)
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=300))]
    pub refresh_rate: u32,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Load the summary once, print it to stdout, and exit
    #[arg(long)]
    pub once: bool,

    /// With --once, emit the snapshot as JSON instead of plain text
    #[arg(long, requires = "once")]
    pub json: bool,
}

impl Settings {
    /// Parse settings from the process arguments.
    pub fn load() -> Self {
        Self::parse()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
