// src/export/mod.rs

mod fs_utils;
mod json_csv;
pub mod logic;
mod model;

pub use logic::ExportLogic;
pub use model::EntryExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Shared completion message for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path, count: usize) {
    success(format!(
        "{label} export completed: {} ({count} rows)",
        path.display()
    ));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}
