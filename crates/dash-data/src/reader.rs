//! Summary file discovery and loading.
//!
//! The simulation writes its results as a single `summary.csv` inside a
//! results directory. The dashboard accepts either the file itself or a
//! directory to search, so the reader resolves both forms to a concrete
//! path before loading.

use std::path::{Path, PathBuf};

use dash_core::{DashError, Result};
use tracing::warn;

/// Find all `.csv` files recursively under `dir`, sorted by path.
pub fn find_summary_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Summary directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Resolve `source` to the summary file to load.
///
/// * A file path is used as-is.
/// * A directory prefers a `summary.csv` directly inside it, falling back to
///   the first discovered CSV anywhere below it.
///
/// The distinction between the error variants matters to the UI: a missing
/// source is "no input was ever provided" and renders as a load error,
/// whereas an existing but empty summary renders as "no data".
pub fn resolve_summary_path(source: &Path) -> Result<PathBuf> {
    if !source.exists() {
        return Err(DashError::SourceNotFound(source.to_path_buf()));
    }

    if source.is_file() {
        return Ok(source.to_path_buf());
    }

    let preferred = source.join("summary.csv");
    if preferred.is_file() {
        return Ok(preferred);
    }

    find_summary_files(source)
        .into_iter()
        .next()
        .ok_or_else(|| DashError::NoSummaryFiles(source.to_path_buf()))
}

/// Read the summary file into a string.
pub fn read_summary_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| DashError::SourceRead {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        path
    }

    // ── find_summary_files ────────────────────────────────────────────────

    #[test]
    fn test_find_summary_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "b.csv", "x");
        write_csv(dir.path(), "a.csv", "x");

        let files = find_summary_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_find_summary_files_recursive_and_filtered() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("run-01");
        std::fs::create_dir_all(&sub).unwrap();
        write_csv(dir.path(), "top.csv", "x");
        write_csv(&sub, "nested.csv", "x");
        write_csv(dir.path(), "notes.txt", "x");

        assert_eq!(find_summary_files(dir.path()).len(), 2);
    }

    #[test]
    fn test_find_summary_files_nonexistent_dir() {
        assert!(find_summary_files(Path::new("/tmp/does-not-exist-dash-test")).is_empty());
    }

    // ── resolve_summary_path ──────────────────────────────────────────────

    #[test]
    fn test_resolve_file_used_as_is() {
        let dir = TempDir::new().unwrap();
        let file = write_csv(dir.path(), "run.csv", "Type,ID,Metric,Value\n");
        assert_eq!(resolve_summary_path(&file).unwrap(), file);
    }

    #[test]
    fn test_resolve_directory_prefers_summary_csv() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "aaa.csv", "x");
        let summary = write_csv(dir.path(), "summary.csv", "x");
        assert_eq!(resolve_summary_path(dir.path()).unwrap(), summary);
    }

    #[test]
    fn test_resolve_directory_falls_back_to_first_csv() {
        let dir = TempDir::new().unwrap();
        let only = write_csv(dir.path(), "run-2024.csv", "x");
        assert_eq!(resolve_summary_path(dir.path()).unwrap(), only);
    }

    #[test]
    fn test_resolve_missing_source_errors() {
        let err = resolve_summary_path(Path::new("/tmp/missing-dash-source")).unwrap_err();
        assert!(matches!(err, DashError::SourceNotFound(_)));
    }

    #[test]
    fn test_resolve_empty_directory_errors() {
        let dir = TempDir::new().unwrap();
        let err = resolve_summary_path(dir.path()).unwrap_err();
        assert!(matches!(err, DashError::NoSummaryFiles(_)));
    }

    // ── read_summary_text ─────────────────────────────────────────────────

    #[test]
    fn test_read_summary_text() {
        let dir = TempDir::new().unwrap();
        let file = write_csv(dir.path(), "summary.csv", "Type,ID,Metric,Value\n");
        let text = read_summary_text(&file).unwrap();
        assert!(text.starts_with("Type,ID"));
    }

    #[test]
    fn test_read_summary_text_missing_file() {
        let err = read_summary_text(Path::new("/tmp/missing-dash-summary.csv")).unwrap_err();
        match err {
            DashError::SourceRead { path, .. } => {
                assert_eq!(path, Path::new("/tmp/missing-dash-summary.csv"));
            }
            other => panic!("expected SourceRead, got {other:?}"),
        }
    }
}
