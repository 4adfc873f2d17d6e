//! Transform step: numeric coercion fan-out, percentage-change derivation,
//! and the market-cap filter.

use crate::data::DataError;
use crate::domain::{HeatmapRow, RawHeatmapRow};

/// Derived performance metric: (close − prev_close) / prev_close × 100.
pub fn percentage_change(close: f64, prev_close: f64) -> f64 {
    (close - prev_close) / prev_close * 100.0
}

/// Parse raw wire rows into typed rows and drop degenerate ones.
///
/// Coercion failures are errors (fail closed, naming the ticker and field);
/// degenerate data is filtered silently:
/// - rows with `marketcap <= 0` carry no area in the treemap
/// - rows with a non-finite percentage change (zero `prev_close`) have no
///   defined color
pub fn build_rows(raw: &[RawHeatmapRow]) -> Result<Vec<HeatmapRow>, DataError> {
    let mut rows = Vec::with_capacity(raw.len());
    for record in raw {
        let row = record.parse()?;
        if row.marketcap <= 0.0 || !row.percentage_change.is_finite() {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}
