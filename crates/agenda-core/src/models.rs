use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single cleaned spreadsheet row: one scheduling day plus the per-staff
/// counts recorded on that row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    /// The scheduling day. `None` when the source cell failed both parse
    /// passes; such rows never match any date filter.
    pub date: Option<NaiveDate>,
    /// Canonical staff name → number of scheduled items on this row.
    pub counts: HashMap<String, u32>,
}

impl ScheduleRecord {
    /// Count for a staff member, treating an absent column as zero.
    pub fn count_for(&self, staff: &str) -> u32 {
        self.counts.get(staff).copied().unwrap_or(0)
    }
}

/// The cleaned schedule table.
///
/// Rows keep their source order. The same date may appear on several rows;
/// aggregation sums those rows rather than deduplicating them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTable {
    pub records: Vec<ScheduleRecord>,
}

impl ScheduleTable {
    pub fn new(records: Vec<ScheduleRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(earliest, latest)` over rows that carry a valid date, or `None`
    /// when no row does.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }
}

/// Date-picker contract derived from the table's date range.
///
/// The selectable range is `[min date in table, max(max date, today)]`.
/// The default selection is today when today falls on or before the
/// table's latest date, otherwise the latest date itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
    pub default: NaiveDate,
}

impl DateBounds {
    /// Derive bounds from `table` and the current local day, or `None`
    /// when the table has no valid dates at all.
    pub fn for_table(table: &ScheduleTable, today: NaiveDate) -> Option<Self> {
        let (data_min, data_max) = table.date_range()?;
        let max = data_max.max(today);
        let default = if today <= data_max { today } else { data_max };
        Some(Self {
            min: data_min,
            max,
            default: default.clamp(data_min, max),
        })
    }

    /// Clamp an arbitrary date into the selectable range.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min, self.max)
    }

    /// Whether `date` is selectable.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(date: Option<NaiveDate>, counts: &[(&str, u32)]) -> ScheduleRecord {
        ScheduleRecord {
            date,
            counts: counts.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    // ── ScheduleRecord ────────────────────────────────────────────────────

    #[test]
    fn test_count_for_present_and_absent() {
        let rec = record(Some(d(2024, 3, 5)), &[("ANA", 7)]);
        assert_eq!(rec.count_for("ANA"), 7);
        assert_eq!(rec.count_for("KELLYN"), 0);
    }

    // ── ScheduleTable ─────────────────────────────────────────────────────

    #[test]
    fn test_date_range_ignores_null_dates() {
        let table = ScheduleTable::new(vec![
            record(Some(d(2024, 3, 5)), &[]),
            record(None, &[]),
            record(Some(d(2024, 2, 29)), &[]),
            record(Some(d(2024, 3, 7)), &[]),
        ]);
        assert_eq!(table.date_range(), Some((d(2024, 2, 29), d(2024, 3, 7))));
    }

    #[test]
    fn test_date_range_empty_table() {
        assert_eq!(ScheduleTable::default().date_range(), None);
        let only_null = ScheduleTable::new(vec![record(None, &[])]);
        assert_eq!(only_null.date_range(), None);
    }

    // ── DateBounds ────────────────────────────────────────────────────────

    #[test]
    fn test_bounds_default_is_today_when_in_range() {
        let table = ScheduleTable::new(vec![
            record(Some(d(2024, 3, 1)), &[]),
            record(Some(d(2024, 3, 20)), &[]),
        ]);
        let bounds = DateBounds::for_table(&table, d(2024, 3, 10)).unwrap();
        assert_eq!(bounds.min, d(2024, 3, 1));
        assert_eq!(bounds.max, d(2024, 3, 20));
        assert_eq!(bounds.default, d(2024, 3, 10));
    }

    #[test]
    fn test_bounds_default_falls_back_to_latest_date() {
        let table = ScheduleTable::new(vec![
            record(Some(d(2024, 3, 1)), &[]),
            record(Some(d(2024, 3, 20)), &[]),
        ]);
        // Today is past the data: picker may go up to today, but the
        // default selection stays on the latest data day.
        let bounds = DateBounds::for_table(&table, d(2024, 4, 2)).unwrap();
        assert_eq!(bounds.max, d(2024, 4, 2));
        assert_eq!(bounds.default, d(2024, 3, 20));
    }

    #[test]
    fn test_bounds_none_without_dates() {
        assert!(DateBounds::for_table(&ScheduleTable::default(), d(2024, 1, 1)).is_none());
    }

    #[test]
    fn test_bounds_clamp_and_contains() {
        let table = ScheduleTable::new(vec![
            record(Some(d(2024, 3, 1)), &[]),
            record(Some(d(2024, 3, 20)), &[]),
        ]);
        let bounds = DateBounds::for_table(&table, d(2024, 3, 10)).unwrap();
        assert_eq!(bounds.clamp(d(2024, 2, 1)), d(2024, 3, 1));
        assert_eq!(bounds.clamp(d(2024, 5, 1)), d(2024, 3, 20));
        assert!(bounds.contains(d(2024, 3, 15)));
        assert!(!bounds.contains(d(2024, 3, 21)));
    }
}
