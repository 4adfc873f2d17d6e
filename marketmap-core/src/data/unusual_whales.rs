//! Unusual Whales heatmap provider.
//!
//! Issues one blocking GET against the ETF heatmap endpoint and parses the
//! JSON body into a typed, filtered table. No authentication, no caching,
//! no retries: transport and shape failures surface as errors and end the
//! run.
//!
//! The endpoint is undocumented and subject to unannounced format changes;
//! the synthetic provider is the offline fallback.

use super::provider::{DataError, DataSource, HeatmapProvider};
use crate::domain::{DateRange, HeatmapTable, RawHeatmapRow};
use crate::transform::build_rows;
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://phx.unusualwhales.com/api/etf";

// The endpoint rejects non-browser user agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/101.0.4951.54 Safari/537.36";

/// Heatmap endpoint response: a top-level `data` array of row records.
#[derive(Debug, Deserialize)]
struct HeatmapResponse {
    data: Vec<RawHeatmapRow>,
}

/// Unusual Whales heatmap provider.
pub struct UnusualWhalesProvider {
    client: reqwest::blocking::Client,
    symbol: String,
}

impl UnusualWhalesProvider {
    /// Provider for the SPY ETF heatmap.
    pub fn new() -> Self {
        Self::for_symbol("SPY")
    }

    /// Provider for another ETF's heatmap.
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            symbol: symbol.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Build the heatmap URL for a date-range code.
    fn heatmap_url(&self, code: &str) -> String {
        format!("{BASE_URL}/{}/heatmap?date_range={code}", self.symbol)
    }

    /// Fetch with a raw date-range code, bypassing the `DateRange` enum.
    ///
    /// Known gap carried over from the upstream client: any string is
    /// forwarded to the endpoint unvalidated, and rejection (if any) is
    /// remote-side. The typed `fetch` path is the validated front door.
    pub fn fetch_code(&self, code: &str) -> Result<HeatmapTable, DataError> {
        let url = self.heatmap_url(code);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body: HeatmapResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!(
                "failed to parse response for {}: {e}",
                self.symbol
            ))
        })?;

        if body.data.is_empty() {
            return Err(DataError::EmptyPayload);
        }

        let rows = build_rows(&body.data)?;
        Ok(HeatmapTable::new(
            self.symbol.clone(),
            code,
            DataSource::UnusualWhales,
            rows,
        ))
    }
}

impl Default for UnusualWhalesProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HeatmapProvider for UnusualWhalesProvider {
    fn name(&self) -> &str {
        "unusual_whales"
    }

    fn fetch(&self, range: DateRange) -> Result<HeatmapTable, DataError> {
        self.fetch_code(range.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_symbol_and_range_code() {
        let provider = UnusualWhalesProvider::new();
        assert_eq!(
            provider.heatmap_url(DateRange::OneWeek.as_str()),
            "https://phx.unusualwhales.com/api/etf/SPY/heatmap?date_range=one_week"
        );
    }

    #[test]
    fn url_builder_accepts_codes_outside_the_documented_set() {
        // The raw-code path attempts the request for any string; validation
        // is remote-side only.
        let provider = UnusualWhalesProvider::for_symbol("QQQ");
        assert_eq!(
            provider.heatmap_url("three_decades"),
            "https://phx.unusualwhales.com/api/etf/QQQ/heatmap?date_range=three_decades"
        );
    }

    #[test]
    fn response_body_parses_into_raw_rows() {
        let body = r#"{
            "data": [
                {
                    "ticker": "AAPL",
                    "sector": "Technology",
                    "industry": "Consumer Electronics",
                    "open": "100.0",
                    "high": "106.0",
                    "low": "99.5",
                    "close": "105.0",
                    "prev_close": "100.0",
                    "marketcap": "2500000000000",
                    "call_premium": "123456.7",
                    "put_premium": "98765.4"
                },
                {
                    "ticker": "GHOST",
                    "sector": "Technology",
                    "industry": "Software",
                    "open": "1.0",
                    "high": "1.0",
                    "low": "1.0",
                    "close": "1.0",
                    "prev_close": "2.0",
                    "marketcap": "0",
                    "call_premium": "0",
                    "put_premium": "0"
                }
            ]
        }"#;

        let resp: HeatmapResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.data.len(), 2);

        let rows = build_rows(&resp.data).unwrap();
        // GHOST has zero market cap and is filtered out.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticker, "AAPL");
        assert!((rows[0].percentage_change - 5.0).abs() < 1e-12);
    }

    #[test]
    fn missing_data_field_is_a_shape_error() {
        let body = r#"{"rows": []}"#;
        assert!(serde_json::from_str::<HeatmapResponse>(body).is_err());
    }
}
