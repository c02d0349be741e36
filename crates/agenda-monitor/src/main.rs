mod bootstrap;

use anyhow::Result;

use agenda_core::error::AgendaError;
use agenda_core::models::DateBounds;
use agenda_core::settings::Settings;
use agenda_core::time_utils;
use agenda_runtime::DataManager;
use agenda_ui::{App, ViewMode};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Agenda Monitor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Sheet: {}",
        settings.view,
        settings.theme,
        settings.sheet
    );

    let source = match settings.file.clone() {
        Some(path) => path,
        None => bootstrap::discover_source(&std::env::current_dir()?)?,
    };
    tracing::info!("Workbook: {}", source.display());

    let mut manager = DataManager::new(source, settings.sheet.clone());

    // The first load is fatal: without a cleaned schedule there is nothing
    // to render, so the error goes to stderr and the process exits non-zero.
    let today = time_utils::today_in(&settings.timezone);
    let bounds = {
        let schedule = manager.get(false)?;
        DateBounds::for_table(&schedule.table, today).unwrap_or(DateBounds {
            min: today,
            max: today,
            default: today,
        })
    };

    let reference = match settings.date.as_deref() {
        Some(raw) => {
            let parsed = time_utils::parse_date_strict(raw)
                .or_else(|| time_utils::parse_date_lenient(raw))
                .ok_or_else(|| AgendaError::DateParse(raw.to_string()))?;
            bounds.clamp(parsed)
        }
        None => bounds.default,
    };

    let app = App::new(
        &settings.theme,
        ViewMode::from_name(&settings.view),
        reference,
        bounds,
        settings.quota,
        &mut manager,
    )?;
    app.run(&mut manager)?;

    Ok(())
}
