use chrono::NaiveDate;

/// Format a non-negative count with thousands separators.
///
/// # Examples
///
/// ```
/// use agenda_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(987), "987");
/// assert_eq!(format_count(1234), "1,234");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u32) -> String {
    group_thousands(&value.to_string())
}

/// Format an integer percentage, e.g. `130` → `"130%"`.
pub fn format_percent(value: u32) -> String {
    format!("{}%", value)
}

/// Format a date the way the source workbook writes them: `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Title label for a weekly view, e.g. `"Semana 10/2024"`.
pub fn format_week_label(iso_year: i32, iso_week: u32) -> String {
    format!("Semana {}/{}", iso_week, iso_year)
}

/// Title label for a monthly view, e.g. `"Março/2024"`.
pub fn format_month_label(year: i32, month: u32) -> String {
    const MONTHS: [&str; 12] = [
        "Janeiro",
        "Fevereiro",
        "Março",
        "Abril",
        "Maio",
        "Junho",
        "Julho",
        "Agosto",
        "Setembro",
        "Outubro",
        "Novembro",
        "Dezembro",
    ];
    let name = month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("?");
    format!("{}/{}", name, year)
}

/// Insert `,` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
