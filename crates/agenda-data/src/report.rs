//! Assembles everything the dashboard renders for one reference date.

use chrono::{DateTime, NaiveDate, Utc};

use agenda_core::models::ScheduleTable;

use crate::aggregator::{QuotaRow, ScheduleAggregator, StaffTotal};
use crate::clean::LoadedSchedule;
use crate::filter::{derive_views, DateViews};

/// Number of sample records exposed for the debug overlay.
const SAMPLE_ROWS: usize = 3;

/// A sampled record rendered as `(date label, total)` for the debug view.
#[derive(Debug, Clone)]
pub struct SampleRow {
    pub date: Option<NaiveDate>,
    pub total: u64,
}

/// Everything one render pass needs, computed once per reload or date
/// change rather than per frame.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub reference: NaiveDate,
    pub week_key: (i32, u32),
    pub daily: Vec<QuotaRow>,
    pub weekly: Vec<StaffTotal>,
    pub monthly: Vec<StaffTotal>,
    pub daily_total: u64,
    pub weekly_total: u64,
    pub monthly_total: u64,
    /// Rows matching the reference week. Zero means an empty view, which
    /// the presenter shows as a notice rather than zero-length bars.
    pub week_records: usize,
    /// Rows matching the reference month.
    pub month_records: usize,
    pub record_count: usize,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub roster: Vec<String>,
    pub sample: Vec<SampleRow>,
    pub generated_at: DateTime<Utc>,
}

/// Build the full dashboard report for `reference` with the given quota.
pub fn build_dashboard(
    schedule: &LoadedSchedule,
    reference: NaiveDate,
    quota: u32,
) -> DashboardData {
    let views: DateViews = derive_views(&schedule.table, reference);

    DashboardData {
        reference,
        week_key: views.week_key,
        daily: ScheduleAggregator::daily_comparison(&views.day, &schedule.roster, quota),
        weekly: ScheduleAggregator::weekly_totals(&views.week, &schedule.roster),
        monthly: ScheduleAggregator::monthly_totals(&views.month, &schedule.roster),
        daily_total: ScheduleAggregator::grand_total(&views.day),
        weekly_total: ScheduleAggregator::grand_total(&views.week),
        monthly_total: ScheduleAggregator::grand_total(&views.month),
        week_records: views.week.len(),
        month_records: views.month.len(),
        record_count: schedule.table.len(),
        date_range: schedule.table.date_range(),
        roster: schedule.roster.names().to_vec(),
        sample: sample_rows(&schedule.table),
        generated_at: Utc::now(),
    }
}

fn sample_rows(table: &ScheduleTable) -> Vec<SampleRow> {
    table
        .records
        .iter()
        .take(SAMPLE_ROWS)
        .map(|record| SampleRow {
            date: record.date,
            total: record.counts.values().map(|&c| u64::from(c)).sum(),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
