//! Daily quota comparison table.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per staff
//! member who booked at least one appointment on the reference day, coloured
//! by whether the daily target was reached.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use agenda_core::formatting;
use agenda_data::aggregator::QuotaRow;

use crate::themes::Theme;

/// Render the per-staff quota table for one day into `area`.
pub fn render_comparison(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[QuotaRow],
    theme: &Theme,
) {
    let header_cells = ["Colaborador", "Agendamentos", "Meta", "% Atingido"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let style = theme.quota_style(row.quota_met());
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(formatting::format_count(row.scheduled)),
                Cell::from(formatting::format_count(row.quota)),
                Cell::from(formatting::format_percent(row.percent)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(12),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a placeholder when nobody booked anything on the reference day.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Nenhum agendamento para esta data",
            theme.warning,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Use ←/→ para navegar entre datas, 't' para hoje.",
            theme.dim,
        )),
        Line::from(Span::styled("Pressione 'q' para sair", theme.dim)),
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

// ── Tests ─────────────────────────────────────────────────────────────────────
