//! Data ingestion layer for Agenda Monitor.
//!
//! Responsible for discovering and reading the scheduling workbook,
//! cleaning its "Controle Equipe" sheet into a typed table, deriving
//! day/week/month views and aggregating per-staff totals.

pub mod aggregator;
pub mod clean;
pub mod filter;
pub mod loader;
pub mod report;

pub use agenda_core as core;
