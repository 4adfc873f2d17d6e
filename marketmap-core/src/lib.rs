//! MarketMap Core — domain types, heatmap data providers, transform, export.
//!
//! This crate contains the data half of the pipeline:
//! - Domain types (heatmap rows, the fetched table, date-range selectors)
//! - The provider abstraction and the Unusual Whales HTTP provider
//! - A seeded synthetic provider for offline runs
//! - The transform step (percentage-change derivation, market-cap filter)
//! - CSV/JSON artifact export of the fetched table

pub mod data;
pub mod domain;
pub mod export;
pub mod transform;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types that cross crate boundaries are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::HeatmapRow>();
        require_sync::<domain::HeatmapRow>();
        require_send::<domain::HeatmapTable>();
        require_sync::<domain::HeatmapTable>();
        require_send::<domain::DateRange>();
        require_sync::<domain::DateRange>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::UnusualWhalesProvider>();
        require_sync::<data::UnusualWhalesProvider>();
        require_send::<data::SyntheticProvider>();
        require_sync::<data::SyntheticProvider>();
    }
}
