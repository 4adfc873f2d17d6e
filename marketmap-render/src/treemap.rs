//! Raster treemap output.
//!
//! The geometry pass (`layout_cells`) turns the node tree into flat draw
//! cells: group frames with a header band, and leaf cells carrying the color
//! metric. The draw pass paints them onto a plotters bitmap backend and
//! optionally hands the file to the platform image viewer.

use crate::color::{DivergingScale, Rgb};
use crate::config::RenderConfig;
use crate::layout::{squarify, Rect};
use crate::tree::{build_tree, NodeKind, TreeNode};
use marketmap_core::domain::HeatmapTable;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to launch image viewer: {0}")]
    Viewer(String),
}

/// What one render call produced.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Path of the persisted PNG, when `save_image` was on.
    pub saved_to: Option<PathBuf>,
    /// Total draw cells (group frames + leaves).
    pub cells_drawn: usize,
}

/// One flat draw command produced by the geometry pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Border frame and header band of a non-leaf node.
    Group {
        rect: Rect,
        label: String,
        depth: u8,
    },
    /// Colored ticker cell.
    Leaf {
        rect: Rect,
        ticker: String,
        percentage_change: f64,
    },
}

/// Flatten the hierarchy into draw cells inside `bounds`.
///
/// Each group with enough height reserves a `header` band at its top for the
/// group label; its children pack into the remainder. Zero-area children are
/// skipped (they carry no weight).
pub fn layout_cells(tree: &TreeNode, bounds: Rect, header: f64) -> Vec<Cell> {
    let mut cells = Vec::new();
    walk(tree, bounds, 0, header, &mut cells);
    cells
}

fn walk(node: &TreeNode, bounds: Rect, depth: u8, header: f64, out: &mut Vec<Cell>) {
    if let NodeKind::Leaf { percentage_change } = node.kind {
        out.push(Cell::Leaf {
            rect: bounds,
            ticker: node.label.clone(),
            percentage_change,
        });
        return;
    }

    out.push(Cell::Group {
        rect: bounds,
        label: node.label.clone(),
        depth,
    });

    if node.children.is_empty() {
        return;
    }

    let inner = if bounds.h > header * 2.0 {
        Rect::new(bounds.x, bounds.y + header, bounds.w, bounds.h - header)
    } else {
        bounds
    };

    let weights: Vec<f64> = node.children.iter().map(|c| c.weight).collect();
    let rects = squarify(&weights, inner);
    for (child, rect) in node.children.iter().zip(rects) {
        if rect.area() <= 0.0 {
            continue;
        }
        walk(child, rect, depth + 1, header, out);
    }
}

/// Render the table as a treemap per the config.
///
/// With `save_image` on the PNG goes to `config.output_path` (parent
/// directories are created); with `show` on the written file is opened in
/// the platform viewer. With both off this is a no-op.
pub fn render_treemap(
    table: &HeatmapTable,
    config: &RenderConfig,
) -> Result<RenderOutcome, RenderError> {
    if !config.save_image && !config.show {
        return Ok(RenderOutcome {
            saved_to: None,
            cells_drawn: 0,
        });
    }

    let tree = build_tree(table);
    let plot = Rect::new(
        config.margins.left as f64,
        config.margins.top as f64,
        config
            .width
            .saturating_sub(config.margins.left + config.margins.right) as f64,
        config
            .height
            .saturating_sub(config.margins.top + config.margins.bottom) as f64,
    );
    let header = config.font_size as f64 + 6.0;
    let cells = layout_cells(&tree, plot, header);

    let path = if config.save_image {
        config.output_path.clone()
    } else {
        std::env::temp_dir().join(format!(
            "{}_heatmap_preview.png",
            table.symbol.to_lowercase()
        ))
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    draw_cells(&path, config, &cells, header)?;

    if config.show {
        open_viewer(&path)?;
    }

    Ok(RenderOutcome {
        saved_to: config.save_image.then(|| path.clone()),
        cells_drawn: cells.len(),
    })
}

fn draw_cells(
    path: &Path,
    config: &RenderConfig,
    cells: &[Cell],
    header: f64,
) -> Result<(), RenderError> {
    let scale = DivergingScale::heatmap();
    let border = style_color(config.border_color);
    let label_color = style_color(config.label_color);

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&style_color(config.background))
        .map_err(backend_err)?;

    let text_style = TextStyle::from(("sans-serif", config.font_size as f64).into_font())
        .color(&label_color)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let font_size = config.font_size as f64;

    for cell in cells {
        match cell {
            Cell::Group { rect, label, .. } => {
                root.draw(&Rectangle::new(
                    corners(rect),
                    border.stroke_width(config.border_width),
                ))
                .map_err(backend_err)?;

                if config.draw_labels
                    && rect.h > header * 2.0
                    && text_fits(label, rect.w, font_size)
                {
                    let center = (
                        (rect.x + rect.w / 2.0).round() as i32,
                        (rect.y + header / 2.0).round() as i32,
                    );
                    root.draw(&Text::new(label.clone(), center, text_style.clone()))
                        .map_err(backend_err)?;
                }
            }
            Cell::Leaf {
                rect,
                ticker,
                percentage_change,
            } => {
                let fill = style_color(scale.color_for(*percentage_change));
                root.draw(&Rectangle::new(corners(rect), fill.filled()))
                    .map_err(backend_err)?;
                root.draw(&Rectangle::new(
                    corners(rect),
                    border.stroke_width(config.border_width),
                ))
                .map_err(backend_err)?;

                if config.draw_labels {
                    let pct_line = format!("{percentage_change:.2}%");
                    let fits = rect.h > font_size * 2.4
                        && text_fits(ticker, rect.w, font_size)
                        && text_fits(&pct_line, rect.w, font_size);
                    if fits {
                        let cx = (rect.x + rect.w / 2.0).round() as i32;
                        let cy = rect.y + rect.h / 2.0;
                        let ticker_at = (cx, (cy - font_size * 0.55).round() as i32);
                        let pct_at = (cx, (cy + font_size * 0.55).round() as i32);
                        root.draw(&Text::new(ticker.clone(), ticker_at, text_style.clone()))
                            .map_err(backend_err)?;
                        root.draw(&Text::new(pct_line, pct_at, text_style.clone()))
                            .map_err(backend_err)?;
                    }
                }
            }
        }
    }

    root.present().map_err(backend_err)?;
    Ok(())
}

/// Rough width check so labels never spill outside their cell.
fn text_fits(text: &str, cell_width: f64, font_size: f64) -> bool {
    let estimated = text.chars().count() as f64 * font_size * 0.6;
    estimated + 4.0 < cell_width
}

fn corners(rect: &Rect) -> [(i32, i32); 2] {
    [
        (rect.x.round() as i32, rect.y.round() as i32),
        (
            (rect.x + rect.w).round() as i32,
            (rect.y + rect.h).round() as i32,
        ),
    ]
}

fn style_color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn backend_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

fn open_viewer(path: &Path) -> Result<(), RenderError> {
    let spawned = if cfg!(target_os = "macos") {
        Command::new("open").arg(path).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn()
    } else {
        Command::new("xdg-open").arg(path).spawn()
    };
    spawned.map(|_| ()).map_err(|e| RenderError::Viewer(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ROOT_LABEL;
    use marketmap_core::data::DataSource;
    use marketmap_core::domain::{HeatmapRow, HeatmapTable};

    fn row(ticker: &str, sector: &str, industry: &str, marketcap: f64, pct: f64) -> HeatmapRow {
        HeatmapRow {
            ticker: ticker.into(),
            sector: sector.into(),
            industry: industry.into(),
            open: 100.0,
            high: 101.0,
            low: 99.0,
            close: 100.0 + pct,
            prev_close: 100.0,
            marketcap,
            call_premium: 0.0,
            put_premium: 0.0,
            percentage_change: pct,
        }
    }

    fn sample_table() -> HeatmapTable {
        HeatmapTable::new(
            "SPY",
            "one_day",
            DataSource::Synthetic,
            vec![
                row("AAPL", "Technology", "Hardware", 3.0e12, 1.2),
                row("MSFT", "Technology", "Software", 2.8e12, -0.7),
                row("JPM", "Financials", "Banks", 0.6e12, 0.4),
            ],
        )
    }

    #[test]
    fn layout_produces_one_leaf_cell_per_row() {
        let tree = build_tree(&sample_table());
        let cells = layout_cells(&tree, Rect::new(0.0, 0.0, 1900.0, 1040.0), 26.0);
        let leaves = cells
            .iter()
            .filter(|c| matches!(c, Cell::Leaf { .. }))
            .count();
        assert_eq!(leaves, 3);
        // Root + 2 sectors + 3 industries.
        let groups = cells
            .iter()
            .filter(|c| matches!(c, Cell::Group { .. }))
            .count();
        assert_eq!(groups, 6);
    }

    #[test]
    fn all_cells_stay_inside_the_plot_area() {
        let bounds = Rect::new(10.0, 30.0, 1900.0, 1040.0);
        let tree = build_tree(&sample_table());
        for cell in layout_cells(&tree, bounds, 26.0) {
            let rect = match &cell {
                Cell::Group { rect, .. } | Cell::Leaf { rect, .. } => rect,
            };
            assert!(bounds.contains(rect), "{cell:?} escapes the plot area");
        }
    }

    #[test]
    fn empty_table_lays_out_a_root_only_cell() {
        let table = HeatmapTable::new("SPY", "one_day", DataSource::Synthetic, vec![]);
        let tree = build_tree(&table);
        let cells = layout_cells(&tree, Rect::new(0.0, 0.0, 100.0, 100.0), 26.0);
        assert_eq!(cells.len(), 1);
        assert!(
            matches!(&cells[0], Cell::Group { label, depth: 0, .. } if label == ROOT_LABEL)
        );
    }

    #[test]
    fn narrow_cells_suppress_their_labels() {
        assert!(text_fits("AAPL", 120.0, 20.0));
        assert!(!text_fits("AAPL", 40.0, 20.0));
        assert!(!text_fits("BRK.B", 60.0, 20.0));
    }

    #[test]
    fn disabled_outputs_are_a_no_op() {
        let config = RenderConfig {
            save_image: false,
            show: false,
            ..RenderConfig::default()
        };
        let outcome = render_treemap(&sample_table(), &config).unwrap();
        assert!(outcome.saved_to.is_none());
        assert_eq!(outcome.cells_drawn, 0);
    }
}
