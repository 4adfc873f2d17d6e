//! Synthetic heatmap provider for offline runs.
//!
//! Produces a realistic-looking table from a fixed sector/industry/ticker
//! universe with seeded randomized prices and market caps. Deterministic for
//! a given seed and date range, so pipeline tests and demos do not need
//! network access.

use super::provider::{DataError, DataSource, HeatmapProvider};
use crate::domain::{DateRange, HeatmapRow, HeatmapTable};
use crate::transform::percentage_change;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed universe: sector → industries → tickers.
const UNIVERSE: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Technology",
        &[
            ("Consumer Electronics", &["AAPL", "SONO"]),
            ("Software", &["MSFT", "CRM", "ADBE"]),
            ("Semiconductors", &["NVDA", "AVGO", "AMD"]),
        ],
    ),
    (
        "Financials",
        &[
            ("Banks", &["JPM", "BAC", "WFC"]),
            ("Capital Markets", &["GS", "MS"]),
        ],
    ),
    (
        "Health Care",
        &[
            ("Pharmaceuticals", &["LLY", "PFE", "MRK"]),
            ("Health Care Providers", &["UNH"]),
        ],
    ),
    (
        "Energy",
        &[("Oil, Gas & Consumable Fuels", &["XOM", "CVX", "COP"])],
    ),
    (
        "Consumer Discretionary",
        &[
            ("Internet Retail", &["AMZN"]),
            ("Automobiles", &["TSLA", "GM"]),
        ],
    ),
];

/// Seeded offline data source implementing `HeatmapProvider`.
pub struct SyntheticProvider {
    symbol: String,
    seed: u64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            symbol: "SPY".into(),
            seed,
        }
    }

    pub fn for_symbol(symbol: impl Into<String>, seed: u64) -> Self {
        Self {
            symbol: symbol.into(),
            seed,
        }
    }

    /// Generate the table for one date-range selector.
    ///
    /// The range index is folded into the seed so different selectors
    /// produce different (but individually stable) tables.
    pub fn generate(&self, range: DateRange) -> HeatmapTable {
        let range_salt = DateRange::ALL
            .iter()
            .position(|r| *r == range)
            .unwrap_or(0) as u64;
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(range_salt));

        let mut rows = Vec::new();
        for (sector, industries) in UNIVERSE {
            for (industry, tickers) in *industries {
                for ticker in *tickers {
                    rows.push(sample_row(&mut rng, ticker, sector, industry));
                }
            }
        }

        HeatmapTable::new(
            self.symbol.clone(),
            range.as_str(),
            DataSource::Synthetic,
            rows,
        )
    }
}

fn sample_row(rng: &mut StdRng, ticker: &str, sector: &str, industry: &str) -> HeatmapRow {
    let prev_close = rng.gen_range(20.0..500.0_f64);
    // ±6% so the color scale's clip region is exercised.
    let pct = rng.gen_range(-6.0..6.0_f64);
    let close = prev_close * (1.0 + pct / 100.0);
    let (lo, hi) = if close < prev_close {
        (close, prev_close)
    } else {
        (prev_close, close)
    };
    let open = rng.gen_range(lo..=hi);
    let high = hi * (1.0 + rng.gen_range(0.0..0.01));
    let low = lo * (1.0 - rng.gen_range(0.0..0.01));

    HeatmapRow {
        ticker: ticker.into(),
        sector: sector.into(),
        industry: industry.into(),
        open,
        high,
        low,
        close,
        prev_close,
        marketcap: rng.gen_range(5.0e9..3.0e12),
        call_premium: rng.gen_range(0.0..5.0e6),
        put_premium: rng.gen_range(0.0..5.0e6),
        percentage_change: percentage_change(close, prev_close),
    }
}

impl HeatmapProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, range: DateRange) -> Result<HeatmapTable, DataError> {
        Ok(self.generate(range))
    }
}
