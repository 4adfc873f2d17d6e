//! Explicit render configuration, TOML-loadable.
//!
//! Everything the original client left implicit is a named field here with a
//! documented default. Save and show are independently toggleable.

use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Outer chart margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 30,
            left: 10,
            right: 10,
            bottom: 10,
        }
    }
}

/// Render settings for the treemap chart.
///
/// Defaults reproduce the original one-shot behavior: a 1920×1080 PNG saved
/// to `img/spy_heatmap.png`, no viewer launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output raster width in pixels.
    pub width: u32,
    /// Output raster height in pixels.
    pub height: u32,
    /// Write the PNG to `output_path`.
    pub save_image: bool,
    /// Open the rendered image in the platform viewer.
    pub show: bool,
    /// Where the PNG goes when `save_image` is on.
    pub output_path: PathBuf,
    /// Label font size in pixels.
    pub font_size: u32,
    /// Cell border width in pixels.
    pub border_width: u32,
    /// Cell border color.
    pub border_color: Rgb,
    /// Solid canvas color. The raster backend carries no alpha channel, so
    /// this stands in for the original's transparent background.
    pub background: Rgb,
    /// Label text color.
    pub label_color: Rgb,
    /// Draw ticker/percentage labels in leaf cells and group headers.
    pub draw_labels: bool,
    pub margins: Margins,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            save_image: true,
            show: false,
            output_path: PathBuf::from("img/spy_heatmap.png"),
            font_size: 20,
            border_width: 1,
            border_color: Rgb::new(0, 0, 0),
            background: Rgb::new(0x14, 0x14, 0x14),
            label_color: Rgb::new(0xff, 0xff, 0xff),
            draw_labels: true,
            margins: Margins::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl RenderConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "raster dimensions must be non-zero (got {}x{})",
                self.width, self.height
            )));
        }
        let horizontal = self.margins.left + self.margins.right;
        let vertical = self.margins.top + self.margins.bottom;
        if horizontal >= self.width || vertical >= self.height {
            return Err(ConfigError::Invalid(
                "margins leave no plot area".to_string(),
            ));
        }
        Ok(())
    }
}
