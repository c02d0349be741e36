//! Workbook discovery and loading.
//!
//! Finds `.xlsx` workbooks on disk and reads the "Controle Equipe" sheet
//! into a [`LoadedSchedule`] via the cleaning core in [`crate::clean`].

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use tracing::{debug, warn};

use agenda_core::error::{AgendaError, Result};

use crate::clean::{self, LoadedSchedule};

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `.xlsx` workbooks recursively under `dir`, sorted by path.
///
/// Office lock files (`~$…`) are skipped.
pub fn find_workbooks(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Workbook directory does not exist: {}", dir.display());
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
                    .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
                    .unwrap_or(false)
                && !entry.file_name().to_string_lossy().starts_with("~$")
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load and clean the schedule sheet from `path`.
///
/// Any failure here (missing file, missing sheet, missing date column,
/// empty roster) is fatal for the render pass; the caller halts and shows
/// the message instead of a partial dashboard.
pub fn load_schedule(path: &Path, sheet: &str) -> Result<LoadedSchedule> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| match e {
        XlsxError::Io(source) => AgendaError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        other => AgendaError::Workbook(other),
    })?;

    let range = workbook.worksheet_range(sheet).map_err(|e| match e {
        XlsxError::WorksheetNotFound(name) => AgendaError::SheetNotFound(name),
        other => AgendaError::Workbook(other),
    })?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header_row| header_row.iter().map(cell_to_header).collect())
        .unwrap_or_default();
    let body: Vec<Vec<Data>> = rows.map(|row| row.to_vec()).collect();

    let schedule = clean::clean(&headers, &body)?;

    debug!(
        path = %path.display(),
        sheet,
        rows = schedule.table.len(),
        staff = schedule.roster.len(),
        "workbook loaded"
    );

    Ok(schedule)
}

/// Render a header cell as a string the way a spreadsheet user reads it.
fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
