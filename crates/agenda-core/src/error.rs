use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Agenda Monitor.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// The workbook file could not be opened or read from disk.
    #[error("Failed to read workbook {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook exists but could not be decoded as xlsx.
    #[error("Failed to parse workbook: {0}")]
    Workbook(#[from] calamine::XlsxError),

    /// The workbook does not contain the expected sheet.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A required column is missing from the sheet.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// No staff columns survived header cleaning.
    #[error("No staff columns found after cleaning the sheet")]
    EmptyRoster,

    /// A date string did not match any recognised format.
    #[error("Invalid date: {0}")]
    DateParse(String),

    /// No spreadsheet could be located for loading.
    #[error("No .xlsx workbook found in {0}")]
    NoWorkbookFound(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the agenda crates.
pub type Result<T> = std::result::Result<T, AgendaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = AgendaError::FileRead {
            path: PathBuf::from("/some/Controles.xlsx"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read workbook"));
        assert!(msg.contains("/some/Controles.xlsx"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_sheet_not_found() {
        let err = AgendaError::SheetNotFound("Controle Equipe".to_string());
        assert_eq!(err.to_string(), "Sheet not found: Controle Equipe");
    }

    #[test]
    fn test_error_display_missing_column() {
        let err = AgendaError::MissingColumn("DATA DE AGENDAMENTO".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required column: DATA DE AGENDAMENTO"
        );
    }

    #[test]
    fn test_error_display_empty_roster() {
        let err = AgendaError::EmptyRoster;
        assert_eq!(
            err.to_string(),
            "No staff columns found after cleaning the sheet"
        );
    }

    #[test]
    fn test_error_display_date_parse() {
        let err = AgendaError::DateParse("not-a-date".to_string());
        assert_eq!(err.to_string(), "Invalid date: not-a-date");
    }

    #[test]
    fn test_error_display_no_workbook_found() {
        let err = AgendaError::NoWorkbookFound(PathBuf::from("/empty/dir"));
        assert_eq!(err.to_string(), "No .xlsx workbook found in /empty/dir");
    }

    #[test]
    fn test_error_display_config() {
        let err = AgendaError::Config("bad quota".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad quota");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AgendaError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
