//! The fetched heatmap table: rows plus provenance metadata.

use super::row::HeatmapRow;
use crate::data::DataSource;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Immutable-after-construction collection of heatmap rows.
///
/// Ephemeral: constructed from one provider response, consumed by one render
/// call, discarded. Provenance metadata travels with the rows so summaries
/// and exported artifacts can say where the data came from.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapTable {
    pub symbol: String,
    /// Date-range code actually sent to the provider (raw-code fetches may
    /// carry values outside the documented set).
    pub date_range: String,
    pub fetched_at: DateTime<Utc>,
    pub source: DataSource,
    rows: Vec<HeatmapRow>,
}

impl HeatmapTable {
    pub fn new(
        symbol: impl Into<String>,
        date_range: impl Into<String>,
        source: DataSource,
        rows: Vec<HeatmapRow>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date_range: date_range.into(),
            fetched_at: Utc::now(),
            source,
            rows,
        }
    }

    pub fn rows(&self) -> &[HeatmapRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of market capitalizations across all retained rows.
    pub fn total_marketcap(&self) -> f64 {
        self.rows.iter().map(|r| r.marketcap).sum()
    }

    /// Rows sorted by percentage change, best performer first.
    pub fn sorted_by_change(&self) -> Vec<&HeatmapRow> {
        let mut sorted: Vec<&HeatmapRow> = self.rows.iter().collect();
        sorted.sort_by(|a, b| {
            b.percentage_change
                .partial_cmp(&a.percentage_change)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }
}
