//! Debug overlay: raw load metadata for troubleshooting a workbook.

use std::time::Duration;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use agenda_core::formatting;
use agenda_data::report::DashboardData;

use crate::themes::Theme;

/// Everything the overlay shows besides the report itself.
pub struct DebugInfo<'a> {
    pub source: &'a str,
    pub cache_age: Option<Duration>,
    pub last_error: Option<&'a str>,
}

/// Render the debug overlay into `area`.
pub fn render_debug(
    frame: &mut Frame,
    area: Rect,
    data: &DashboardData,
    info: &DebugInfo<'_>,
    theme: &Theme,
) {
    let mut lines = vec![
        line_kv("Arquivo", info.source.to_string(), theme),
        line_kv("Registros", data.record_count.to_string(), theme),
        line_kv(
            "Período",
            match data.date_range {
                Some((min, max)) => format!(
                    "{} – {}",
                    formatting::format_date(min),
                    formatting::format_date(max)
                ),
                None => "sem datas".to_string(),
            },
            theme,
        ),
        line_kv("Equipe", data.roster.join(", "), theme),
        line_kv(
            "Cache",
            match info.cache_age {
                Some(age) => format!("{}s", age.as_secs()),
                None => "vazio".to_string(),
            },
            theme,
        ),
    ];

    if let Some(err) = info.last_error {
        lines.push(Line::from(vec![
            Span::styled("Último erro: ", theme.label),
            Span::styled(err.to_string(), theme.error),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Amostra:", theme.label)));
    for sample in &data.sample {
        let date = match sample.date {
            Some(d) => formatting::format_date(d),
            None => "??/??/????".to_string(),
        };
        lines.push(Line::from(Span::styled(
            format!("  {} -> {} agendamentos", date, sample.total),
            theme.dim,
        )));
    }

    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Debug "),
        ),
        area,
    );
}

fn line_kv(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.label),
        Span::styled(value, theme.value),
    ])
}

// ── Tests ─────────────────────────────────────────────────────────────────────
