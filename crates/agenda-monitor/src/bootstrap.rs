use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agenda_core::error::AgendaError;

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.agenda-monitor/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.agenda-monitor/`
/// - `~/.agenda-monitor/logs/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let monitor_dir = home.join(".agenda-monitor");
    std::fs::create_dir_all(&monitor_dir)?;
    std::fs::create_dir_all(monitor_dir.join("logs"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Workbook discovery ─────────────────────────────────────────────────────────

/// Locate the workbook to monitor when `--file` was not given.
///
/// Picks the most recently modified `.xlsx` under `dir` (recursive, Office
/// lock files excluded).
pub fn discover_source(dir: &Path) -> Result<PathBuf, AgendaError> {
    let candidates = agenda_data::loader::find_workbooks(dir);
    candidates
        .into_iter()
        .max_by_key(|path| {
            std::fs::metadata(path)
                .and_then(|m| m.modified())
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        })
        .ok_or_else(|| AgendaError::NoWorkbookFound(dir.to_path_buf()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let monitor_dir = tmp.path().join(".agenda-monitor");
        assert!(monitor_dir.is_dir(), ".agenda-monitor dir must exist");
        assert!(monitor_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    // ── test_discover_source ──────────────────────────────────────────────────

    #[test]
    fn test_discover_source_errors_when_empty() {
        let tmp = TempDir::new().expect("tempdir");
        let err = discover_source(tmp.path()).unwrap_err();
        assert!(matches!(err, AgendaError::NoWorkbookFound(_)));
    }

    #[test]
    fn test_discover_source_picks_newest() {
        let tmp = TempDir::new().expect("tempdir");
        let old = tmp.path().join("old.xlsx");
        let new = tmp.path().join("new.xlsx");
        std::fs::write(&old, b"a").unwrap();
        std::fs::write(&new, b"b").unwrap();

        // Push the older file's mtime into the past.
        let past = std::time::SystemTime::now() - std::time::Duration::from_secs(3600);
        let file = std::fs::File::options().write(true).open(&old).unwrap();
        file.set_modified(past).unwrap();
        drop(file);

        assert_eq!(discover_source(tmp.path()).unwrap(), new);
    }

    #[test]
    fn test_discover_source_skips_lock_files() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("~$Controles.xlsx"), b"a").unwrap();
        assert!(discover_source(tmp.path()).is_err());
    }
}
