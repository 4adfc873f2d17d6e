//! Hierarchy construction: Sectors → sector → industry → ticker.

use marketmap_core::domain::{HeatmapRow, HeatmapTable};
use std::collections::BTreeMap;

/// Constant label of the hierarchy root.
pub const ROOT_LABEL: &str = "Sectors";

/// What a node represents, with the leaf carrying its color metric.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root,
    Sector,
    Industry,
    Leaf { percentage_change: f64 },
}

/// A node in the treemap hierarchy. Weight is the market-cap sum of the
/// node's leaves; children are sorted by weight, heaviest first, which is
/// the order the squarified layout wants.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub label: String,
    pub weight: f64,
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn group(label: &str, kind: NodeKind, mut children: Vec<TreeNode>) -> Self {
        children.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let weight = children.iter().map(|c| c.weight).sum();
        Self {
            label: label.to_string(),
            weight,
            kind,
            children,
        }
    }

    fn leaf(row: &HeatmapRow) -> Self {
        Self {
            label: row.ticker.clone(),
            weight: row.marketcap,
            kind: NodeKind::Leaf {
                percentage_change: row.percentage_change,
            },
            children: Vec::new(),
        }
    }

    /// Number of leaves under this node.
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            usize::from(matches!(self.kind, NodeKind::Leaf { .. }))
        } else {
            self.children.iter().map(TreeNode::leaf_count).sum()
        }
    }
}

/// Group the table's rows into the fixed three-level hierarchy.
///
/// A zero-row table produces a root node with no children (the renderer
/// draws it as a root-only treemap).
pub fn build_tree(table: &HeatmapTable) -> TreeNode {
    // BTreeMap keeps the grouping deterministic before the weight sort.
    let mut sectors: BTreeMap<&str, BTreeMap<&str, Vec<&HeatmapRow>>> = BTreeMap::new();
    for row in table.rows() {
        sectors
            .entry(row.sector.as_str())
            .or_default()
            .entry(row.industry.as_str())
            .or_default()
            .push(row);
    }

    let sector_nodes: Vec<TreeNode> = sectors
        .into_iter()
        .map(|(sector, industries)| {
            let industry_nodes: Vec<TreeNode> = industries
                .into_iter()
                .map(|(industry, rows)| {
                    let leaves: Vec<TreeNode> = rows.into_iter().map(TreeNode::leaf).collect();
                    TreeNode::group(industry, NodeKind::Industry, leaves)
                })
                .collect();
            TreeNode::group(sector, NodeKind::Sector, industry_nodes)
        })
        .collect();

    TreeNode::group(ROOT_LABEL, NodeKind::Root, sector_nodes)
}
