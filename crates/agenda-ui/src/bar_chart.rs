//! Weekly and monthly totals charts.
//!
//! The weekly view is a horizontal bar list (one line per staff member,
//! ascending) built from plain text so names of any width line up. The
//! monthly view uses ratatui's vertical [`BarChart`] widget, descending.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use agenda_core::formatting;
use agenda_data::aggregator::StaffTotal;

use crate::themes::Theme;

/// Build the text lines of a horizontal bar list.
///
/// Names are padded to the widest one so the bars start in the same
/// column; bar lengths scale to `max_bar_width` cells.
pub fn horizontal_bar_lines(
    totals: &[StaffTotal],
    max_bar_width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let name_width = totals
        .iter()
        .map(|t| t.name.width())
        .max()
        .unwrap_or(0);
    let max_total = totals.iter().map(|t| t.total).max().unwrap_or(0);

    totals
        .iter()
        .map(|staff| {
            let pad = name_width.saturating_sub(staff.name.width());
            let label = format!("{}{} ", staff.name, " ".repeat(pad));

            let bar_len = if max_total == 0 {
                0
            } else {
                (staff.total as usize * max_bar_width) / max_total as usize
            };
            // A non-zero total always gets at least one cell of bar.
            let bar_len = if staff.total > 0 { bar_len.max(1) } else { 0 };

            Line::from(vec![
                Span::styled(label, theme.bar_label),
                Span::styled("█".repeat(bar_len), theme.bar_fill),
                Span::styled(
                    format!(" {}", formatting::format_count(staff.total)),
                    theme.value,
                ),
            ])
        })
        .collect()
}

/// Render the weekly totals as a horizontal bar list into `area`.
pub fn render_weekly(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    totals: &[StaffTotal],
    theme: &Theme,
) {
    // Leave room for borders, the name column, and the trailing count.
    let name_width = totals.iter().map(|t| t.name.width()).max().unwrap_or(0);
    let max_bar_width = (area.width as usize).saturating_sub(name_width + 12).max(4);

    let lines = horizontal_bar_lines(totals, max_bar_width, theme);
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

/// Render the monthly totals as a vertical bar chart into `area`.
pub fn render_monthly(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    totals: &[StaffTotal],
    theme: &Theme,
) {
    let bars: Vec<Bar> = totals
        .iter()
        .map(|staff| {
            Bar::default()
                .value(u64::from(staff.total))
                .label(Line::from(short_label(&staff.name)))
                .text_value(formatting::format_count(staff.total))
                .style(theme.bar_fill)
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .bar_width(7)
        .bar_gap(1)
        .label_style(theme.bar_label)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Render a placeholder when no row falls inside the panel's period.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Nenhum agendamento neste período",
            theme.warning,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

/// First name only, truncated to the bar width so labels never collide.
fn short_label(name: &str) -> String {
    let first = name.split([' ', '_']).next().unwrap_or(name);
    first.chars().take(7).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
