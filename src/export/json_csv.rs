// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::{EntryExport, notify_export_success};
use crate::models::TimerRecord;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export timer records (with nested entries) as pretty JSON.
/// The output can be read back with `import`.
pub(crate) fn export_json(records: &[TimerRecord], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(records)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path, records.len());
    Ok(())
}

/// Export entry rows as CSV (header from serde).
pub(crate) fn export_csv(rows: &[EntryExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;

    for item in rows {
        wtr.serialize(item)?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path, rows.len());
    Ok(())
}

/// Read records written by [`export_json`].
pub(crate) fn read_json(path: &Path) -> AppResult<Vec<TimerRecord>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
