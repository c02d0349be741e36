//! Fingerprint-cached workbook manager for the dashboard runtime.
//!
//! Wraps [`load_schedule`] behind a cache keyed on the workbook file's
//! fingerprint (mtime + size). Callers use [`DataManager::get`] each
//! frame; the workbook is only re-read when the file changed on disk or
//! a reload was forced.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

use agenda_core::error::{AgendaError, Result};
use agenda_data::clean::LoadedSchedule;
use agenda_data::loader::load_schedule;

// ── Invalidation ──────────────────────────────────────────────────────────────

/// Cheap identity of a file's contents, used to detect edits between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

/// Decides whether the cached workbook is still current.
///
/// Abstracted so tests can drive invalidation without touching the clock
/// or rewriting files.
pub trait InvalidationProbe {
    /// Fingerprint of `path`, or `None` when the file cannot be stat'ed.
    fn fingerprint(&self, path: &Path) -> Option<Fingerprint>;
}

/// Default probe: file modification time and length from the filesystem.
pub struct MtimeProbe;

impl InvalidationProbe for MtimeProbe {
    fn fingerprint(&self, path: &Path) -> Option<Fingerprint> {
        let meta = std::fs::metadata(path).ok()?;
        Some(Fingerprint {
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Fingerprint-cached wrapper around workbook loading.
pub struct DataManager {
    path: PathBuf,
    sheet: String,
    probe: Box<dyn InvalidationProbe>,
    cache: Option<LoadedSchedule>,
    cached_fingerprint: Option<Fingerprint>,
    loaded_at: Option<Instant>,
    last_error: Option<String>,
}

impl DataManager {
    pub fn new(path: PathBuf, sheet: String) -> Self {
        Self::with_probe(path, sheet, Box::new(MtimeProbe))
    }

    pub fn with_probe(path: PathBuf, sheet: String, probe: Box<dyn InvalidationProbe>) -> Self {
        Self {
            path,
            sheet,
            probe,
            cache: None,
            cached_fingerprint: None,
            loaded_at: None,
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return the schedule, re-reading the workbook only when the file
    /// changed on disk or `force` is set.
    ///
    /// A failed reload keeps the previous cache intact and records the
    /// error; it is only fatal when there is no cache to fall back on.
    pub fn get(&mut self, force: bool) -> Result<&LoadedSchedule> {
        if force || !self.is_cache_valid() {
            match self.reload() {
                Ok(()) => {}
                Err(e) if self.cache.is_some() => {
                    tracing::warn!(error = %e, "reload failed; keeping cached schedule");
                    self.last_error = Some(e.to_string());
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::debug!("returning cached schedule");
        }

        self.cache
            .as_ref()
            .ok_or_else(|| AgendaError::Config("no schedule loaded".to_string()))
    }

    /// Discard the cache, forcing the next [`get`] to re-read the file.
    pub fn invalidate(&mut self) {
        self.cache = None;
        self.cached_fingerprint = None;
        self.loaded_at = None;
        tracing::debug!("schedule cache invalidated");
    }

    /// Time since the cached schedule was read, or `None` before first load.
    pub fn cache_age(&self) -> Option<Duration> {
        self.loaded_at.map(|at| at.elapsed())
    }

    /// Description of the last failed reload, cleared on success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Workbook path this manager reads from.
    pub fn source(&self) -> &Path {
        &self.path
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn is_cache_valid(&self) -> bool {
        match (&self.cache, &self.cached_fingerprint) {
            (Some(_), Some(cached)) => match self.probe.fingerprint(&self.path) {
                Some(current) => current == *cached,
                None => false,
            },
            _ => false,
        }
    }

    fn reload(&mut self) -> Result<()> {
        let fingerprint = self.probe.fingerprint(&self.path);
        let schedule = load_schedule(&self.path, &self.sheet)?;
        tracing::debug!(
            rows = schedule.table.len(),
            staff = schedule.roster.len(),
            "schedule cache updated"
        );
        self.cache = Some(schedule);
        self.cached_fingerprint = fingerprint;
        self.loaded_at = Some(Instant::now());
        self.last_error = None;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
