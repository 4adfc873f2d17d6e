//! MarketMap Render — treemap visualization of a heatmap table.
//!
//! - Three-stop diverging color scale with endpoint clipping
//! - Squarified treemap layout (aspect-ratio minimizing packing)
//! - Sectors → sector → industry → ticker hierarchy construction
//! - Raster output (PNG) with bordered, labeled cells
//! - Explicit render configuration, TOML-loadable

pub mod color;
pub mod config;
pub mod layout;
pub mod tree;
pub mod treemap;

pub use color::{DivergingScale, Rgb};
pub use config::{ConfigError, Margins, RenderConfig};
pub use layout::{squarify, Rect};
pub use tree::{build_tree, NodeKind, TreeNode, ROOT_LABEL};
pub use treemap::{render_treemap, RenderError, RenderOutcome};
