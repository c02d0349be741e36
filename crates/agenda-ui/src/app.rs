//! Main application state and TUI event loop for the scheduling dashboard.
//!
//! [`App`] owns the theme, the view mode, the reference date, and the last
//! built [`DashboardData`]. The loop is synchronous: draw, poll keyboard
//! events with a short timeout, rebuild the report only when the reference
//! date changes or the workbook is reloaded.

use std::io;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use agenda_core::formatting;
use agenda_core::models::DateBounds;
use agenda_data::report::{build_dashboard, DashboardData};
use agenda_runtime::DataManager;

use crate::bar_chart;
use crate::comparison_view;
use crate::debug_view::{self, DebugInfo};
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// All three panels stacked.
    Dashboard,
    /// Daily quota table only.
    Daily,
    /// Weekly bars only.
    Weekly,
    /// Monthly chart only.
    Monthly,
}

impl ViewMode {
    /// Parse a `--view` CLI value. Unknown names fall back to the dashboard.
    pub fn from_name(name: &str) -> Self {
        match name {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Dashboard,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Day the report is centred on.
    pub reference: NaiveDate,
    /// Selectable date range for `←`/`→` navigation.
    pub bounds: DateBounds,
    pub quota: u32,
    pub show_debug: bool,
    pub should_quit: bool,
    data: DashboardData,
}

impl App {
    /// Build the application from an initial loaded schedule.
    pub fn new(
        theme_name: &str,
        view_mode: ViewMode,
        reference: NaiveDate,
        bounds: DateBounds,
        quota: u32,
        manager: &mut DataManager,
    ) -> agenda_core::error::Result<Self> {
        let reference = bounds.clamp(reference);
        let schedule = manager.get(false)?;
        let data = build_dashboard(schedule, reference, quota);
        Ok(Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            reference,
            bounds,
            quota,
            show_debug: false,
            should_quit: false,
            data,
        })
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// Keys: `q`/`Q`/`Ctrl+C` quit, `←`/`→` step the reference date within
    /// bounds, `t` jumps to the default date, `r` forces a reload, `d`
    /// toggles the debug panel.
    pub fn run(mut self, manager: &mut DataManager) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame, manager))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        KeyCode::Left => self.step_reference(-1, manager),
                        KeyCode::Right => self.step_reference(1, manager),
                        KeyCode::Char('t') => {
                            self.reference = self.bounds.default;
                            self.rebuild(manager, false);
                        }
                        KeyCode::Char('r') => self.rebuild(manager, true),
                        KeyCode::Char('d') => self.show_debug = !self.show_debug,
                        _ => {}
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── State transitions ─────────────────────────────────────────────────

    /// Move the reference date by `days`, clamped to the picker bounds.
    fn step_reference(&mut self, days: i64, manager: &mut DataManager) {
        let stepped = self.reference + chrono::Duration::days(days);
        let clamped = self.bounds.clamp(stepped);
        if clamped != self.reference {
            self.reference = clamped;
            self.rebuild(manager, false);
        }
    }

    /// Recompute the dashboard report; `force` bypasses the workbook cache.
    ///
    /// A reload that fails keeps the previous report on screen; the error
    /// shows up in the debug panel via the manager.
    fn rebuild(&mut self, manager: &mut DataManager, force: bool) {
        match manager.get(force) {
            Ok(schedule) => {
                // The file may have grown since the bounds were derived.
                if let Some(bounds) =
                    DateBounds::for_table(&schedule.table, self.bounds.default)
                {
                    self.bounds = bounds;
                    self.reference = self.bounds.clamp(self.reference);
                }
                self.data = build_dashboard(schedule, self.reference, self.quota);
            }
            Err(e) => {
                tracing::warn!(error = %e, "rebuild failed; keeping previous report");
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame, manager: &DataManager) {
        let area = frame.area();
        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(area);

        self.render_header(frame, header_area);

        if self.show_debug {
            let source = manager.source().display().to_string();
            let info = DebugInfo {
                source: &source,
                cache_age: manager.cache_age(),
                last_error: manager.last_error(),
            };
            debug_view::render_debug(frame, body_area, &self.data, &info, &self.theme);
            return;
        }

        match self.view_mode {
            ViewMode::Dashboard => {
                let [daily, weekly, monthly] = Layout::vertical([
                    Constraint::Percentage(40),
                    Constraint::Percentage(30),
                    Constraint::Percentage(30),
                ])
                .areas(body_area);
                self.render_daily(frame, daily);
                self.render_weekly(frame, weekly);
                self.render_monthly(frame, monthly);
            }
            ViewMode::Daily => self.render_daily(frame, body_area),
            ViewMode::Weekly => self.render_weekly(frame, body_area),
            ViewMode::Monthly => self.render_monthly(frame, body_area),
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("Agenda Monitor  ", self.theme.header),
                Span::styled(formatting::format_date(self.reference), self.theme.value),
                Span::styled(
                    format!(
                        "  ({})",
                        formatting::format_week_label(self.data.week_key.0, self.data.week_key.1)
                    ),
                    self.theme.label,
                ),
            ]),
            Line::from(Span::styled(
                "←/→ data  t hoje  r recarregar  d debug  q sair",
                self.theme.dim,
            )),
        ];
        frame.render_widget(Paragraph::new(ratatui::text::Text::from(lines)), area);
    }

    fn render_daily(&self, frame: &mut Frame, area: Rect) {
        let title = format!("Agendamentos {}", formatting::format_date(self.reference));
        if self.data.daily.is_empty() {
            comparison_view::render_no_data(frame, area, &title, &self.theme);
        } else {
            comparison_view::render_comparison(frame, area, &title, &self.data.daily, &self.theme);
        }
    }

    fn render_weekly(&self, frame: &mut Frame, area: Rect) {
        let title = formatting::format_week_label(self.data.week_key.0, self.data.week_key.1);
        if self.data.week_records == 0 {
            bar_chart::render_no_data(frame, area, &title, &self.theme);
        } else {
            bar_chart::render_weekly(frame, area, &title, &self.data.weekly, &self.theme);
        }
    }

    fn render_monthly(&self, frame: &mut Frame, area: Rect) {
        let title = formatting::format_month_label(
            chrono::Datelike::year(&self.reference),
            chrono::Datelike::month(&self.reference),
        );
        if self.data.month_records == 0 {
            bar_chart::render_no_data(frame, area, &title, &self.theme);
        } else {
            bar_chart::render_monthly(frame, area, &title, &self.data.monthly, &self.theme);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
