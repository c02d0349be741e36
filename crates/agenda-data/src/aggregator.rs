//! Per-staff totals and quota comparisons over a filtered view.

use agenda_core::models::ScheduleTable;
use agenda_core::quota::{meets_quota, percent_of_quota};
use agenda_core::roster::StaffRoster;

/// Total appointments for one staff member within a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffTotal {
    pub name: String,
    pub total: u32,
}

/// One row of the daily quota comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaRow {
    pub name: String,
    pub scheduled: u32,
    pub quota: u32,
    /// Truncated integer percent of the quota (7/10 -> 70).
    pub percent: u32,
}

impl QuotaRow {
    pub fn quota_met(&self) -> bool {
        meets_quota(self.scheduled, self.quota)
    }
}

/// Sums raw counts into per-staff report rows.
pub struct ScheduleAggregator;

impl ScheduleAggregator {
    /// Sum each staff member's counts over `table`, in roster order.
    ///
    /// Every roster member appears exactly once, zeros included.
    pub fn sum_by_staff(table: &ScheduleTable, roster: &StaffRoster) -> Vec<StaffTotal> {
        roster
            .iter()
            .map(|name| {
                let total = table
                    .records
                    .iter()
                    .map(|record| record.count_for(name))
                    .sum();
                StaffTotal {
                    name: name.clone(),
                    total,
                }
            })
            .collect()
    }

    /// Daily quota comparison: staff with zero appointments are dropped,
    /// rows are sorted by scheduled count descending (ties keep roster
    /// order).
    pub fn daily_comparison(
        table: &ScheduleTable,
        roster: &StaffRoster,
        quota: u32,
    ) -> Vec<QuotaRow> {
        let mut rows: Vec<QuotaRow> = Self::sum_by_staff(table, roster)
            .into_iter()
            .filter(|t| t.total > 0)
            .map(|t| QuotaRow {
                percent: percent_of_quota(t.total, quota),
                name: t.name,
                scheduled: t.total,
                quota,
            })
            .collect();
        rows.sort_by(|a, b| b.scheduled.cmp(&a.scheduled));
        rows
    }

    /// Weekly totals, ascending. Zeros stay: a blank bar is information.
    pub fn weekly_totals(table: &ScheduleTable, roster: &StaffRoster) -> Vec<StaffTotal> {
        let mut totals = Self::sum_by_staff(table, roster);
        totals.sort_by(|a, b| a.total.cmp(&b.total));
        totals
    }

    /// Monthly totals, descending. Zeros stay.
    pub fn monthly_totals(table: &ScheduleTable, roster: &StaffRoster) -> Vec<StaffTotal> {
        let mut totals = Self::sum_by_staff(table, roster);
        totals.sort_by(|a, b| b.total.cmp(&a.total));
        totals
    }

    /// Grand total across every record and staff member in the view.
    pub fn grand_total(table: &ScheduleTable) -> u64 {
        table
            .records
            .iter()
            .flat_map(|record| record.counts.values())
            .map(|&count| u64::from(count))
            .sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::models::ScheduleRecord;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn roster(names: &[&str]) -> StaffRoster {
        StaffRoster::new(names.iter().map(|s| s.to_string()).collect())
    }

    fn record(pairs: &[(&str, u32)]) -> ScheduleRecord {
        let mut counts = HashMap::new();
        for (name, count) in pairs {
            counts.insert(name.to_string(), *count);
        }
        ScheduleRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            counts,
        }
    }

    fn table(records: Vec<ScheduleRecord>) -> ScheduleTable {
        ScheduleTable { records }
    }

    #[test]
    fn test_sum_by_staff_roster_order_with_zeros() {
        let t = table(vec![
            record(&[("ANA", 3), ("BIA", 0)]),
            record(&[("ANA", 2), ("BIA", 4)]),
        ]);
        let totals = ScheduleAggregator::sum_by_staff(&t, &roster(&["ANA", "BIA", "CARLA"]));
        assert_eq!(
            totals,
            vec![
                StaffTotal { name: "ANA".into(), total: 5 },
                StaffTotal { name: "BIA".into(), total: 4 },
                StaffTotal { name: "CARLA".into(), total: 0 },
            ]
        );
    }

    #[test]
    fn test_daily_comparison_drops_zeros_sorts_desc() {
        let t = table(vec![record(&[("ANA", 7), ("BIA", 12), ("CARLA", 0)])]);
        let rows =
            ScheduleAggregator::daily_comparison(&t, &roster(&["ANA", "BIA", "CARLA"]), 10);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "BIA");
        assert_eq!(rows[0].percent, 120);
        assert!(rows[0].quota_met());
        assert_eq!(rows[1].name, "ANA");
        assert_eq!(rows[1].percent, 70);
        assert!(!rows[1].quota_met());
    }

    #[test]
    fn test_daily_comparison_quota_boundary() {
        let t = table(vec![record(&[("ANA", 10)])]);
        let rows = ScheduleAggregator::daily_comparison(&t, &roster(&["ANA"]), 10);
        assert_eq!(rows[0].percent, 100);
        assert!(rows[0].quota_met());
    }

    #[test]
    fn test_daily_comparison_percent_truncates() {
        let t = table(vec![record(&[("ANA", 2)])]);
        let rows = ScheduleAggregator::daily_comparison(&t, &roster(&["ANA"]), 3);
        assert_eq!(rows[0].percent, 66);
    }

    #[test]
    fn test_daily_comparison_ties_keep_roster_order() {
        let t = table(vec![record(&[("BIA", 5), ("ANA", 5)])]);
        let rows = ScheduleAggregator::daily_comparison(&t, &roster(&["ANA", "BIA"]), 10);
        assert_eq!(rows[0].name, "ANA");
        assert_eq!(rows[1].name, "BIA");
    }

    #[test]
    fn test_weekly_totals_ascending_keeps_zeros() {
        let t = table(vec![record(&[("ANA", 9), ("BIA", 2)])]);
        let totals = ScheduleAggregator::weekly_totals(&t, &roster(&["ANA", "BIA", "CARLA"]));
        let names: Vec<&str> = totals.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["CARLA", "BIA", "ANA"]);
    }

    #[test]
    fn test_monthly_totals_descending() {
        let t = table(vec![record(&[("ANA", 1), ("BIA", 8)])]);
        let totals = ScheduleAggregator::monthly_totals(&t, &roster(&["ANA", "BIA"]));
        assert_eq!(totals[0].name, "BIA");
        assert_eq!(totals[1].name, "ANA");
    }

    #[test]
    fn test_empty_view_daily_comparison_is_empty() {
        let rows =
            ScheduleAggregator::daily_comparison(&table(vec![]), &roster(&["ANA"]), 10);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_grand_total() {
        let t = table(vec![
            record(&[("ANA", 3), ("BIA", 4)]),
            record(&[("ANA", 1)]),
        ]);
        assert_eq!(ScheduleAggregator::grand_total(&t), 8);
    }
}
