//! TTL-cached snapshot manager for the dashboard runtime.
//!
//! Wraps [`load_snapshot`] with a configurable time-to-live cache and
//! transparent retry logic. Callers use [`DataManager::get_data`] to obtain
//! a fresh-or-cached [`DashboardSnapshot`]; the manager handles staleness
//! checks, up to three load attempts with back-off, and graceful fallback to
//! the previous cache on transient failure.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use dash_data::analysis::{load_snapshot, DashboardSnapshot};

/// Maximum number of load attempts before giving up and returning stale data.
const MAX_RETRY_ATTEMPTS: u32 = 3;

// ── DataManager ───────────────────────────────────────────────────────────────

/// TTL-cached wrapper around the snapshot pipeline.
///
/// # Example
/// ```no_run
/// use dash_runtime::data_manager::DataManager;
///
/// let mut mgr = DataManager::new(5, "results".into());
/// if let Some(snapshot) = mgr.get_data(false) {
///     println!("cloudlets: {}", snapshot.stats.total_cloudlets);
/// }
/// ```
pub struct DataManager {
    /// Maximum age of cached data before it is considered stale.
    cache_ttl: Duration,
    /// Summary source (file or directory) passed to the loader.
    source: PathBuf,
    /// Most recently loaded snapshot.
    cache: Option<DashboardSnapshot>,
    /// When the cache was last populated.
    cache_timestamp: Option<Instant>,
    /// Human-readable description of the last error encountered.
    last_error: Option<String>,
}

impl DataManager {
    /// Create a new manager.
    ///
    /// # Parameters
    /// - `cache_ttl_secs` – seconds before cached data is considered stale.
    /// - `source`         – summary file or results directory to load from.
    pub fn new(cache_ttl_secs: u64, source: PathBuf) -> Self {
        Self {
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            source,
            cache: None,
            cache_timestamp: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return snapshot data, using the cache when it is still valid.
    ///
    /// When `force_refresh` is `true` the cache is bypassed and a fresh load
    /// is always attempted. On load failure the previous cache (if any) is
    /// returned as a best-effort fallback.
    ///
    /// The load is retried up to [`MAX_RETRY_ATTEMPTS`] times with back-off
    /// (0 ms → 100 ms → 200 ms); a summary mid-write by the simulation
    /// usually resolves within that window.
    pub fn get_data(&mut self, force_refresh: bool) -> Option<&DashboardSnapshot> {
        if !force_refresh && self.is_cache_valid() {
            tracing::debug!("returning cached snapshot");
            return self.cache.as_ref();
        }

        match self.fetch_with_retry() {
            Ok(snapshot) => {
                tracing::debug!(
                    rows = snapshot.metadata.rows_processed,
                    entities = snapshot.metadata.entities_created,
                    "snapshot cache updated"
                );
                self.cache = Some(snapshot);
                self.cache_timestamp = Some(Instant::now());
                self.last_error = None;
                self.cache.as_ref()
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed; falling back to cached snapshot");
                self.last_error = Some(e);
                self.cache.as_ref()
            }
        }
    }

    /// Discard the current cache, forcing the next [`DataManager::get_data`]
    /// call to load.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        self.cache_timestamp = None;
        tracing::debug!("cache invalidated");
    }

    /// Age of the current cache entry, or `None` if no data has been loaded.
    pub fn cache_age(&self) -> Option<Duration> {
        self.cache_timestamp.map(|ts| ts.elapsed())
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// `true` when the cache holds data that is still within its TTL.
    fn is_cache_valid(&self) -> bool {
        match (self.cache.as_ref(), self.cache_timestamp) {
            (Some(_), Some(ts)) => ts.elapsed() < self.cache_ttl,
            _ => false,
        }
    }

    /// Attempt up to [`MAX_RETRY_ATTEMPTS`] loads with back-off.
    fn fetch_with_retry(&mut self) -> Result<DashboardSnapshot, String> {
        let mut last_err = String::new();

        for attempt in 0..MAX_RETRY_ATTEMPTS {
            if attempt > 0 {
                let sleep_ms = (attempt as u64) * 100;
                tracing::debug!(attempt, sleep_ms, "retrying load after back-off");
                thread::sleep(Duration::from_millis(sleep_ms));
            }

            match load_snapshot(&self.source) {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "load attempt failed");
                    last_err = e.to_string();
                }
            }
        }

        Err(last_err)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
