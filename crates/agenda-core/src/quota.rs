//! Daily quota comparison math.
//!
//! The quota is a daily-only concept: weekly and monthly aggregations are
//! never compared against it.

/// Fixed daily target of scheduled items per staff member.
pub const DAILY_QUOTA: u32 = 10;

/// Integer percentage of `total` against `quota`, truncating (70 for 7/10,
/// 130 for 13/10; no cap at 100). A zero quota yields 0 rather than
/// dividing by zero.
pub fn percent_of_quota(total: u32, quota: u32) -> u32 {
    if quota == 0 {
        return 0;
    }
    ((u64::from(total) * 100) / u64::from(quota)) as u32
}

/// `true` when a daily total reaches the quota.
pub fn meets_quota(total: u32, quota: u32) -> bool {
    total >= quota
}
