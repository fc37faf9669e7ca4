mod bootstrap;

use anyhow::Result;
use dash_core::settings::Settings;
use dash_data::analysis::{load_snapshot, DashboardSnapshot};
use dash_runtime::orchestrator::RefreshOrchestrator;
use dash_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("CloudSim dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Source: {}, refresh: {}s, theme: {}",
        settings.source.display(),
        settings.refresh_rate,
        settings.theme
    );

    if settings.once {
        return run_once(&settings);
    }

    let orchestrator = RefreshOrchestrator::new(
        u64::from(settings.refresh_rate),
        settings.source.clone(),
    );
    let (rx, handle) = orchestrator.start();

    let app = App::new(&settings.theme);

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run(rx, &handle) => {
            handle.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down refresh task");
            handle.abort();
        }
    }

    Ok(())
}

/// Load the summary once and print it to stdout, skipping the TUI entirely.
///
/// Useful for scripting: `--once --json` emits the full snapshot as JSON.
fn run_once(settings: &Settings) -> Result<()> {
    let snapshot = load_snapshot(&settings.source)?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print!("{}", summary_text(&snapshot));
    }

    Ok(())
}

/// Plain-text rendition of the headline statistics.
fn summary_text(snapshot: &DashboardSnapshot) -> String {
    let stats = &snapshot.stats;
    format!(
        "Cloudlets: {}\nHosts:     {} active\nVMs:       {}\nEnergy:    {}\n",
        stats.total_cloudlets,
        stats.hosts_display(),
        stats.total_vms,
        stats.energy_display(),
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
