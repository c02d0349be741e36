//! Runtime layer: cached workbook loading for the dashboard loop.

pub mod data_manager;

pub use data_manager::{DataManager, Fingerprint, InvalidationProbe, MtimeProbe};
