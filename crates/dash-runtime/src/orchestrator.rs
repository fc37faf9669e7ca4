//! Async refresh orchestrator.
//!
//! Runs [`DataManager`] in a tokio task, sending periodic [`DashboardData`]
//! snapshots through an `mpsc` channel so the TUI event loop can consume
//! them without any shared mutable state.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use dash_data::analysis::DashboardSnapshot;

use crate::data_manager::DataManager;

// ── Public types ──────────────────────────────────────────────────────────────

/// A single refresh result forwarded to the TUI layer.
///
/// This is the primary data contract between the background runtime and the
/// presentation layer. `snapshot` is `None` only when no load has ever
/// succeeded; after the first success the most recent snapshot is always
/// carried, with `last_error` describing any failure since.
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// Most recent successfully built snapshot, if any.
    pub snapshot: Option<DashboardSnapshot>,
    /// Description of the last load failure, cleared on success.
    pub last_error: Option<String>,
    /// The summary source being watched.
    pub source: PathBuf,
}

// ── RefreshOrchestrator ───────────────────────────────────────────────────────

/// Background refresh coordinator.
///
/// Call [`RefreshOrchestrator::start`] to spin up the refresh loop in a
/// dedicated tokio task and receive a channel endpoint for [`DashboardData`]
/// updates.
pub struct RefreshOrchestrator {
    /// How often to reload the summary.
    refresh_interval: Duration,
    /// Summary file or results directory to watch.
    source: PathBuf,
}

impl RefreshOrchestrator {
    /// Create a new orchestrator.
    ///
    /// # Parameters
    /// - `refresh_interval_secs` – seconds between reloads.
    /// - `source`                – summary file or results directory.
    pub fn new(refresh_interval_secs: u64, source: PathBuf) -> Self {
        Self {
            refresh_interval: Duration::from_secs(refresh_interval_secs),
            source,
        }
    }

    /// Start the refresh loop.
    ///
    /// Spawns a tokio task that runs the loop. Returns:
    /// - An `mpsc::Receiver<DashboardData>` for the caller to poll.
    /// - A [`RefreshHandle`] for manual refreshes and shutdown.
    pub fn start(self) -> (mpsc::Receiver<DashboardData>, RefreshHandle) {
        // Buffer a modest number of snapshots so slow consumers don't stall the loop.
        let (tx, rx) = mpsc::channel(16);
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        let handle = tokio::spawn(async move {
            self.refresh_loop(tx, refresh_rx).await;
        });

        (
            rx,
            RefreshHandle {
                handle,
                refresh_tx,
            },
        )
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main refresh loop.
    ///
    /// Performs an immediate load on startup, then repeats on
    /// `refresh_interval` or whenever a manual refresh request arrives. The
    /// loop exits when the receiver side of the channel is closed.
    async fn refresh_loop(self, tx: mpsc::Sender<DashboardData>, mut refresh_rx: mpsc::Receiver<()>) {
        let mut data_manager =
            DataManager::new(self.refresh_interval.as_secs(), self.source.clone());

        // Initial load (force refresh to populate immediately).
        self.fetch_and_send(&mut data_manager, &tx, true).await;

        let mut interval = time::interval(self.refresh_interval);
        // Consume the first tick which fires immediately; we already loaded above.
        interval.tick().await;

        loop {
            let forced = tokio::select! {
                _ = interval.tick() => false,
                request = refresh_rx.recv() => {
                    if request.is_none() {
                        tracing::debug!("refresh handle dropped; exiting loop");
                        break;
                    }
                    true
                }
            };

            if tx.is_closed() {
                tracing::debug!("dashboard channel closed; exiting loop");
                break;
            }

            self.fetch_and_send(&mut data_manager, &tx, forced).await;
        }
    }

    /// Load a snapshot and send a [`DashboardData`] update to the channel.
    ///
    /// Sends even when no snapshot is available so the UI can render the
    /// load error instead of staying blank.
    async fn fetch_and_send(
        &self,
        data_manager: &mut DataManager,
        tx: &mpsc::Sender<DashboardData>,
        force: bool,
    ) {
        let snapshot = data_manager.get_data(force).cloned();
        let last_error = data_manager.last_error().map(|e| e.to_string());

        let update = DashboardData {
            snapshot,
            last_error,
            source: self.source.clone(),
        };

        if let Err(e) = tx.send(update).await {
            tracing::warn!(error = %e, "failed to send dashboard update; receiver dropped");
        }
    }
}

// ── RefreshHandle ─────────────────────────────────────────────────────────────

/// A handle to the background refresh task.
///
/// Drop or call [`RefreshHandle::abort`] to stop the loop.
pub struct RefreshHandle {
    handle: tokio::task::JoinHandle<()>,
    refresh_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Request an out-of-band refresh ahead of the next interval tick.
    ///
    /// Requests coalesce: if one is already pending it is not queued again.
    pub fn request_refresh(&self) {
        let _ = self.refresh_tx.try_send(());
    }

    /// Immediately abort the refresh loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = concat!(
        "Type,ID,Metric,Value\n",
        "Cloudlet,0,Status,Success\n",
        "Host,0,CPUUtilization,0.5\n",
        "Host,0,EnergyConsumed,10.0\n",
    );

    fn results_dir() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join("summary.csv")).unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        dir
    }

    // ── orchestrator creation ─────────────────────────────────────────────

    #[test]
    fn test_orchestrator_creation() {
        let orch = RefreshOrchestrator::new(5, PathBuf::from("/tmp/results"));
        assert_eq!(orch.refresh_interval, Duration::from_secs(5));
        assert_eq!(orch.source, PathBuf::from("/tmp/results"));
    }

    // ── async: start / abort ──────────────────────────────────────────────

    #[tokio::test]
    async fn test_orchestrator_start_and_abort() {
        let dir = results_dir();
        let orch = RefreshOrchestrator::new(60, dir.path().to_path_buf());
        let (_rx, handle) = orch.start();

        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
    }

    // ── async: receives initial snapshot ──────────────────────────────────

    #[tokio::test]
    async fn test_orchestrator_sends_initial_snapshot() {
        let dir = results_dir();
        let orch = RefreshOrchestrator::new(60, dir.path().to_path_buf());
        let (mut rx, handle) = orch.start();

        let update = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for update")
            .expect("channel closed before receiving update");

        let snapshot = update.snapshot.expect("initial snapshot present");
        assert_eq!(snapshot.stats.total_cloudlets, 1);
        assert_eq!(snapshot.stats.hosts_display(), "1/1");
        assert!(update.last_error.is_none());

        handle.abort();
    }

    // ── async: missing source still sends an update ───────────────────────

    #[tokio::test]
    async fn test_orchestrator_reports_load_error() {
        let orch = RefreshOrchestrator::new(60, PathBuf::from("/tmp/missing-dash-orchestrator"));
        let (mut rx, handle) = orch.start();

        let update = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for update")
            .expect("channel closed before receiving update");

        assert!(update.snapshot.is_none());
        assert!(update.last_error.is_some());

        handle.abort();
    }

    // ── async: manual refresh ─────────────────────────────────────────────

    #[tokio::test]
    async fn test_manual_refresh_triggers_update() {
        let dir = results_dir();
        let orch = RefreshOrchestrator::new(600, dir.path().to_path_buf());
        let (mut rx, handle) = orch.start();

        // Drain the initial update.
        let _ = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for initial update");

        // With a 600 s interval, only a manual request can produce the next one.
        handle.request_refresh();
        let update = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for manual refresh")
            .expect("channel closed before manual refresh");

        assert!(update.snapshot.is_some());

        handle.abort();
    }
}
