//! Date-based views over a cleaned schedule.
//!
//! Each view is a subset of the records, keyed off a reference date:
//! the exact day, the ISO week, and the calendar month.

use chrono::NaiveDate;

use agenda_core::models::{ScheduleRecord, ScheduleTable};
use agenda_core::time_utils::{iso_week_key, month_key};

/// Records grouped by their relation to a reference date.
///
/// Records with no parseable date belong to none of the views.
#[derive(Debug, Clone)]
pub struct DateViews {
    pub reference: NaiveDate,
    /// ISO (week-year, week) of the reference date.
    pub week_key: (i32, u32),
    pub day: ScheduleTable,
    pub week: ScheduleTable,
    pub month: ScheduleTable,
}

/// Split `table` into day/week/month views around `reference`.
pub fn derive_views(table: &ScheduleTable, reference: NaiveDate) -> DateViews {
    let week_key = iso_week_key(reference);
    let month = month_key(reference);

    let mut day = Vec::new();
    let mut week = Vec::new();
    let mut month_records = Vec::new();

    for record in &table.records {
        let Some(date) = record.date else { continue };
        if date == reference {
            day.push(record.clone());
        }
        if iso_week_key(date) == week_key {
            week.push(record.clone());
        }
        if month_key(date) == month {
            month_records.push(record.clone());
        }
    }

    DateViews {
        reference,
        week_key,
        day: ScheduleTable { records: day },
        week: ScheduleTable { records: week },
        month: ScheduleTable {
            records: month_records,
        },
    }
}

/// Distinct dates present in a view, ascending. Used for per-day breakdowns.
pub fn distinct_dates(table: &ScheduleTable) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = table.records.iter().filter_map(|r| r.date).collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Records of `table` falling on exactly `date`.
pub fn records_on(table: &ScheduleTable, date: NaiveDate) -> Vec<&ScheduleRecord> {
    table
        .records
        .iter()
        .filter(|r| r.date == Some(date))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
