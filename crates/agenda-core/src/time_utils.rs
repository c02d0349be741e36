use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Parse an IANA timezone name, falling back to UTC with a warning.
pub fn resolve_timezone(tz_name: &str) -> Tz {
    tz_name.parse::<Tz>().unwrap_or_else(|_| {
        warn!(
            "unrecognised timezone \"{}\", falling back to UTC",
            tz_name
        );
        Tz::UTC
    })
}

/// The current calendar day in the given timezone.
///
/// The team records schedule dates in their local day, so "today" for the
/// default reference date must follow the configured timezone rather than
/// the machine's UTC day.
pub fn today_in(tz_name: &str) -> NaiveDate {
    Utc::now().with_timezone(&resolve_timezone(tz_name)).date_naive()
}

// ── Date parsing ──────────────────────────────────────────────────────────────

/// Strict first-pass parse: day-first `dd/mm/yyyy` only.
pub fn parse_date_strict(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok()
}

/// Permissive second-pass parse, used for the whole column once any value
/// fails the strict pass.
///
/// Day-first formats are tried ahead of ISO so a valid `dd/mm/yyyy` cell
/// can never silently flip to month-first during the fallback.
pub fn parse_date_lenient(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y", "%Y-%m-%d", "%Y/%m/%d"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    // Datetime strings reduce to their date component.
    const DATETIME_FORMATS: &[&str] = &[
        "%d/%m/%Y %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    None
}

// ── Period keys ───────────────────────────────────────────────────────────────

/// `(ISO week-numbering year, ISO week)` for a date.
///
/// ISO 8601 rules: weeks start on Monday and week 1 is the week containing
/// the year's first Thursday, so the week-year can differ from the
/// calendar year near year boundaries.
pub fn iso_week_key(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

/// `(calendar year, month)` for a date.
pub fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // ── parse_date_strict ─────────────────────────────────────────────────

    #[test]
    fn test_strict_day_first() {
        assert_eq!(parse_date_strict("05/03/2024"), Some(d(2024, 3, 5)));
        assert_eq!(parse_date_strict(" 29/02/2024 "), Some(d(2024, 2, 29)));
    }

    #[test]
    fn test_strict_rejects_iso() {
        assert_eq!(parse_date_strict("2024-03-05"), None);
    }

    #[test]
    fn test_strict_rejects_garbage_and_empty() {
        assert_eq!(parse_date_strict("not a date"), None);
        assert_eq!(parse_date_strict(""), None);
        assert_eq!(parse_date_strict("32/01/2024"), None);
    }

    // ── parse_date_lenient ────────────────────────────────────────────────

    #[test]
    fn test_lenient_accepts_iso() {
        assert_eq!(parse_date_lenient("2024-03-05"), Some(d(2024, 3, 5)));
    }

    #[test]
    fn test_lenient_keeps_day_first_priority() {
        // Ambiguous between day-first and month-first: day-first wins.
        assert_eq!(parse_date_lenient("05/03/2024"), Some(d(2024, 3, 5)));
        assert_eq!(parse_date_lenient("05-03-2024"), Some(d(2024, 3, 5)));
    }

    #[test]
    fn test_lenient_two_digit_year() {
        assert_eq!(parse_date_lenient("05/03/24"), Some(d(2024, 3, 5)));
    }

    #[test]
    fn test_lenient_datetime_prefix() {
        assert_eq!(
            parse_date_lenient("2024-03-05T14:30:00"),
            Some(d(2024, 3, 5))
        );
        assert_eq!(
            parse_date_lenient("2024-03-05 14:30:00"),
            Some(d(2024, 3, 5))
        );
    }

    #[test]
    fn test_lenient_rejects_garbage() {
        assert_eq!(parse_date_lenient("x"), None);
        assert_eq!(parse_date_lenient(""), None);
    }

    // ── iso_week_key ──────────────────────────────────────────────────────

    #[test]
    fn test_iso_week_year_boundary() {
        // Monday 2024-01-01 belongs to ISO week 1 of 2024.
        assert_eq!(iso_week_key(d(2024, 1, 1)), (2024, 1));
        // Sunday 2023-12-31 belongs to ISO week 52 of 2023.
        assert_eq!(iso_week_key(d(2023, 12, 31)), (2023, 52));
    }

    #[test]
    fn test_iso_week_year_ahead_of_calendar_year() {
        // 2019-12-30 (Monday) is already ISO week 1 of 2020.
        assert_eq!(iso_week_key(d(2019, 12, 30)), (2020, 1));
    }

    // ── month_key ─────────────────────────────────────────────────────────

    #[test]
    fn test_month_key() {
        assert_eq!(month_key(d(2024, 3, 5)), (2024, 3));
        assert_eq!(month_key(d(2023, 12, 31)), (2023, 12));
    }

    // ── timezone helpers ──────────────────────────────────────────────────

    #[test]
    fn test_get_system_timezone_nonempty() {
        assert!(!get_system_timezone().is_empty());
    }

    #[test]
    fn test_resolve_timezone_fallback() {
        assert_eq!(resolve_timezone("Nowhere/Invalid"), Tz::UTC);
        assert_eq!(resolve_timezone("America/Sao_Paulo"), chrono_tz::America::Sao_Paulo);
    }
}
