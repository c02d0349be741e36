//! Pure cleaning core for the "Controle Equipe" sheet.
//!
//! Operates on raw header strings and [`calamine::Data`] cells so the
//! whole pipeline is unit-testable without touching a workbook file; the
//! xlsx front-end in [`crate::loader`] is a thin shell over [`clean`].

use std::collections::HashMap;

use calamine::{Data, DataType};
use chrono::NaiveDate;
use tracing::{debug, warn};

use agenda_core::error::{AgendaError, Result};
use agenda_core::models::{ScheduleRecord, ScheduleTable};
use agenda_core::roster::{self, StaffRoster};
use agenda_core::time_utils::{parse_date_lenient, parse_date_strict};

/// The cleaned output of one load: the table plus the staff roster fixed
/// for the session.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSchedule {
    pub table: ScheduleTable,
    pub roster: StaffRoster,
}

// ── Column classification ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum ColumnKind {
    /// Placeholder / empty header, dropped entirely.
    Skip,
    /// The textual date column.
    Date,
    /// `SEMANA` / `TOTAL`, dropped after cleaning.
    Helper,
    /// A staff member, identified by canonical name.
    Staff(String),
}

fn classify(header: &str) -> ColumnKind {
    if roster::is_placeholder(header) {
        return ColumnKind::Skip;
    }
    let canonical = roster::canonical_name(header);
    if canonical == roster::DATE_COLUMN {
        ColumnKind::Date
    } else if roster::is_helper(&canonical) {
        ColumnKind::Helper
    } else {
        ColumnKind::Staff(canonical)
    }
}

// ── Cleaning ──────────────────────────────────────────────────────────────────

/// Clean raw sheet content into a [`LoadedSchedule`].
///
/// `headers` is the first sheet row rendered as strings; `rows` are the
/// remaining data rows. Steps, in order: placeholder discard, header
/// trim + rename, all-or-nothing date parsing (strict day-first pass,
/// then a full lenient re-pass if any value failed), helper-column drop,
/// count coercion with duplicate-column merge.
pub fn clean(headers: &[String], rows: &[Vec<Data>]) -> Result<LoadedSchedule> {
    let kinds: Vec<ColumnKind> = headers.iter().map(|h| classify(h)).collect();

    let date_idx = kinds
        .iter()
        .position(|k| *k == ColumnKind::Date)
        .ok_or_else(|| AgendaError::MissingColumn(roster::DATE_COLUMN.to_string()))?;

    let staff_columns: Vec<(usize, String)> = kinds
        .iter()
        .enumerate()
        .filter_map(|(idx, kind)| match kind {
            ColumnKind::Staff(name) => Some((idx, name.clone())),
            _ => None,
        })
        .collect();

    let staff_roster =
        StaffRoster::new(staff_columns.iter().map(|(_, name)| name.clone()).collect());
    if staff_roster.is_empty() {
        return Err(AgendaError::EmptyRoster);
    }

    let dates = parse_date_column(rows, date_idx);

    let records: Vec<ScheduleRecord> = rows
        .iter()
        .zip(dates)
        .map(|(row, date)| {
            let mut counts: HashMap<String, u32> = HashMap::with_capacity(staff_roster.len());
            for (idx, name) in &staff_columns {
                let cell = row.get(*idx).unwrap_or(&Data::Empty);
                // Duplicate raw headers that normalize to the same canonical
                // name merge by summation.
                *counts.entry(name.clone()).or_insert(0) += coerce_count(cell);
            }
            ScheduleRecord { date, counts }
        })
        .collect();

    debug!(
        rows = records.len(),
        staff = staff_roster.len(),
        "cleaned schedule sheet"
    );

    Ok(LoadedSchedule {
        table: ScheduleTable::new(records),
        roster: staff_roster,
    })
}

/// Parse the date column with the strict day-first format; if any value
/// fails, re-parse the *entire* column with the lenient parser.
///
/// The all-or-nothing fallback matches the source tool this sheet was
/// built around; a single bad cell switches every row to the permissive
/// format list.
fn parse_date_column(rows: &[Vec<Data>], date_idx: usize) -> Vec<Option<NaiveDate>> {
    let strict: Vec<Option<NaiveDate>> = rows
        .iter()
        .map(|row| parse_date_cell(row.get(date_idx).unwrap_or(&Data::Empty), false))
        .collect();

    if rows.is_empty() || strict.iter().all(Option::is_some) {
        return strict;
    }

    let failed = strict.iter().filter(|d| d.is_none()).count();
    warn!(
        failed,
        total = rows.len(),
        "strict day-first date parse incomplete; re-parsing the entire column leniently"
    );

    rows.iter()
        .map(|row| parse_date_cell(row.get(date_idx).unwrap_or(&Data::Empty), true))
        .collect()
}

/// Parse one date cell. Text cells go through the chrono parsers; native
/// Excel date cells convert directly in both passes.
fn parse_date_cell(cell: &Data, lenient: bool) -> Option<NaiveDate> {
    match cell {
        Data::String(s) => {
            if lenient {
                parse_date_lenient(s)
            } else {
                parse_date_strict(s)
            }
        }
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_date(),
        _ => None,
    }
}

/// Coerce a count cell to a non-negative integer; anything malformed,
/// missing or negative becomes 0.
fn coerce_count(cell: &Data) -> u32 {
    match cell {
        Data::Int(i) => (*i).clamp(0, i64::from(u32::MAX)) as u32,
        Data::Float(f) => coerce_float(*f),
        Data::String(s) => s.trim().parse::<f64>().map(coerce_float).unwrap_or(0),
        Data::Bool(b) => u32::from(*b),
        _ => 0,
    }
}

fn coerce_float(f: f64) -> u32 {
    if !f.is_finite() || f <= 0.0 {
        0
    } else {
        f.trunc().min(f64::from(u32::MAX)) as u32
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
