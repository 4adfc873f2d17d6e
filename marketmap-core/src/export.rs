//! Table artifact export (CSV/JSON).

use crate::domain::HeatmapTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write the table's rows as CSV (header row from the field names).
pub fn write_table_csv(path: &Path, table: &HeatmapTable) -> Result<()> {
    ensure_parent(path)?;

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV {}", path.display()))?;

    for row in table.rows() {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row {}", row.ticker))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV {}", path.display()))?;
    Ok(())
}

/// Write the full table (metadata + rows) as pretty-printed JSON.
pub fn write_table_json(path: &Path, table: &HeatmapTable) -> Result<()> {
    ensure_parent(path)?;

    let json = serde_json::to_string_pretty(table).context("Failed to serialize table")?;
    fs::write(path, json).with_context(|| format!("Failed to write JSON {}", path.display()))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}
