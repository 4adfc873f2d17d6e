//! Property tests for the squarified layout and the color scale.

use marketmap_render::{squarify, DivergingScale, Rect};
use proptest::prelude::*;

fn arb_weights() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.1..1000.0_f64, 1..40)
}

proptest! {
    /// Every cell stays inside the bounding rectangle.
    #[test]
    fn cells_are_contained(weights in arb_weights()) {
        let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        for rect in squarify(&weights, bounds) {
            prop_assert!(bounds.contains(&rect));
        }
    }

    /// Total cell area equals the bounds area (weights fill the canvas).
    #[test]
    fn total_area_is_preserved(weights in arb_weights()) {
        let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let total: f64 = squarify(&weights, bounds).iter().map(Rect::area).sum();
        prop_assert!((total - bounds.area()).abs() < 1.0);
    }

    /// Cell areas are proportional to their weights.
    #[test]
    fn areas_track_weights(weights in arb_weights()) {
        let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let rects = squarify(&weights, bounds);
        let weight_total: f64 = weights.iter().sum();
        let scale = bounds.area() / weight_total;
        for (weight, rect) in weights.iter().zip(&rects) {
            prop_assert!((rect.area() - weight * scale).abs() < 1e-3);
        }
    }

    /// The scale never steps outside the [negative, positive] stop gamut and
    /// clips exactly at the endpoints.
    #[test]
    fn color_scale_clips(value in -100.0..100.0_f64) {
        let scale = DivergingScale::heatmap();
        let color = scale.color_for(value);
        if value <= -scale.range {
            prop_assert_eq!(color, scale.negative);
        } else if value >= scale.range {
            prop_assert_eq!(color, scale.positive);
        }
    }
}
