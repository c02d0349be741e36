//! Terminal UI for the scheduling dashboard.

pub mod app;
pub mod bar_chart;
pub mod comparison_view;
pub mod debug_view;
pub mod themes;

pub use app::{App, ViewMode};
pub use themes::Theme;
