//! Domain layer for Agenda Monitor.
//!
//! Holds the schedule data model, roster normalization rules, quota
//! calculations, date helpers, display formatting, CLI settings and the
//! shared error type used across the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod quota;
pub mod roster;
pub mod settings;
pub mod time_utils;
