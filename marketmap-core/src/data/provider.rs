//! Data provider trait and structured error types.
//!
//! The HeatmapProvider trait abstracts over data sources (the Unusual Whales
//! HTTP endpoint, the synthetic generator) so the CLI can swap
//! implementations and tests can run offline.

use crate::domain::{DateRange, HeatmapTable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for fetch and parse operations.
///
/// Every variant is fatal to the run: there is no retry or fallback policy.
/// Degenerate rows (non-positive market cap) are not errors; the transform
/// step drops them silently.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("heatmap endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("row '{ticker}': field '{field}' is not numeric (got {value})")]
    FieldParse {
        ticker: String,
        field: &'static str,
        value: String,
    },

    #[error("endpoint returned an empty data array")]
    EmptyPayload,
}

/// Where a heatmap table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    UnusualWhales,
    Synthetic,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::UnusualWhales => "unusual_whales",
            DataSource::Synthetic => "synthetic",
        }
    }
}

/// Trait for heatmap data providers.
///
/// Implementations handle the specifics of producing a filtered, typed
/// heatmap table for one date-range selector.
pub trait HeatmapProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Produce the heatmap table for one date-range selector.
    fn fetch(&self, range: DateRange) -> Result<HeatmapTable, DataError>;

    /// Check if the provider can currently serve requests.
    fn is_available(&self) -> bool {
        true
    }
}
