//! Heatmap row types and the wire-to-typed coercion step.
//!
//! The endpoint transports numeric fields as JSON strings (occasionally as
//! plain numbers). `RawHeatmapRow` captures that loose shape; `parse` coerces
//! it into the typed `HeatmapRow`, failing closed with the ticker and field
//! that could not be read.

use crate::data::DataError;
use crate::transform::percentage_change;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One instrument's market/price snapshot for a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub ticker: String,
    pub sector: String,
    pub industry: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub prev_close: f64,
    pub marketcap: f64,
    pub call_premium: f64,
    pub put_premium: f64,
    /// Derived: (close − prev_close) / prev_close × 100.
    pub percentage_change: f64,
}

/// Heatmap record as it arrives on the wire, before numeric coercion.
///
/// Numeric fields are kept as raw JSON values because the endpoint encodes
/// them as strings. Missing numeric fields are a shape error; missing
/// sector/industry labels are tolerated and grouped under "Unknown".
#[derive(Debug, Clone, Deserialize)]
pub struct RawHeatmapRow {
    pub ticker: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    pub open: Value,
    pub high: Value,
    pub low: Value,
    pub close: Value,
    pub prev_close: Value,
    pub marketcap: Value,
    pub call_premium: Value,
    pub put_premium: Value,
}

impl RawHeatmapRow {
    /// Coerce every numeric field and derive the percentage change.
    pub fn parse(&self) -> Result<HeatmapRow, DataError> {
        let close = self.numeric("close", &self.close)?;
        let prev_close = self.numeric("prev_close", &self.prev_close)?;

        Ok(HeatmapRow {
            ticker: self.ticker.clone(),
            sector: label(&self.sector),
            industry: label(&self.industry),
            open: self.numeric("open", &self.open)?,
            high: self.numeric("high", &self.high)?,
            low: self.numeric("low", &self.low)?,
            close,
            prev_close,
            marketcap: self.numeric("marketcap", &self.marketcap)?,
            call_premium: self.numeric("call_premium", &self.call_premium)?,
            put_premium: self.numeric("put_premium", &self.put_premium)?,
            percentage_change: percentage_change(close, prev_close),
        })
    }

    fn numeric(&self, field: &'static str, value: &Value) -> Result<f64, DataError> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| DataError::FieldParse {
            ticker: self.ticker.clone(),
            field,
            value: value.to_string(),
        })
    }
}

fn label(value: &Option<String>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.clone(),
        _ => "Unknown".to_string(),
    }
}
