//! Squarified treemap layout.
//!
//! Packs weighted children into a bounding rectangle so that each child's
//! area is proportional to its weight and aspect ratios stay close to 1
//! (Bruls-style row packing). Callers pass weights sorted descending for the
//! best packing quality; the algorithm is correct for any order.

/// Axis-aligned rectangle in chart pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn shorter_side(&self) -> f64 {
        self.w.min(self.h)
    }

    /// Containment with a small tolerance for floating-point drift.
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-6;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.x + other.w <= self.x + self.w + EPS
            && other.y + other.h <= self.y + self.h + EPS
    }
}

/// Lay out `weights` inside `bounds`, one rectangle per weight, in order.
///
/// Areas are proportional to the weights and sum to the bounds area.
/// Non-positive weights yield zero-area rectangles. An empty or degenerate
/// input produces an empty layout.
pub fn squarify(weights: &[f64], bounds: Rect) -> Vec<Rect> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if weights.is_empty() || total <= 0.0 || bounds.area() <= 0.0 {
        return weights.iter().map(|_| Rect::new(bounds.x, bounds.y, 0.0, 0.0)).collect();
    }

    let scale = bounds.area() / total;
    let areas: Vec<f64> = weights.iter().map(|w| w.max(0.0) * scale).collect();

    let mut rects = vec![Rect::new(bounds.x, bounds.y, 0.0, 0.0); areas.len()];
    let mut remaining = bounds;
    let mut row: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < areas.len() {
        if areas[i] <= 0.0 {
            i += 1;
            continue;
        }
        let side = remaining.shorter_side();
        if row.is_empty() || worst_with(&areas, &row, areas[i], side) <= worst(&areas, &row, side)
        {
            row.push(i);
            i += 1;
        } else {
            remaining = layout_row(&areas, &row, remaining, &mut rects);
            row.clear();
        }
    }
    if !row.is_empty() {
        layout_row(&areas, &row, remaining, &mut rects);
    }

    rects
}

/// Worst aspect ratio in the current row when laid along a side of length `side`.
fn worst(areas: &[f64], row: &[usize], side: f64) -> f64 {
    let sum: f64 = row.iter().map(|&i| areas[i]).sum();
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let max = row.iter().map(|&i| areas[i]).fold(f64::MIN, f64::max);
    let min = row.iter().map(|&i| areas[i]).fold(f64::MAX, f64::min);
    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}

fn worst_with(areas: &[f64], row: &[usize], next: f64, side: f64) -> f64 {
    let sum: f64 = row.iter().map(|&i| areas[i]).sum::<f64>() + next;
    if sum <= 0.0 || side <= 0.0 {
        return f64::INFINITY;
    }
    let max = row.iter().map(|&i| areas[i]).fold(next, f64::max);
    let min = row.iter().map(|&i| areas[i]).fold(next, f64::min);
    let side_sq = side * side;
    let sum_sq = sum * sum;
    (side_sq * max / sum_sq).max(sum_sq / (side_sq * min))
}

/// Lay the accumulated row as a strip along the shorter side of `remaining`,
/// writing cell rects in place. Returns the leftover rectangle.
fn layout_row(areas: &[f64], row: &[usize], remaining: Rect, rects: &mut [Rect]) -> Rect {
    let sum: f64 = row.iter().map(|&i| areas[i]).sum();
    if sum <= 0.0 {
        return remaining;
    }

    if remaining.w >= remaining.h {
        // Vertical strip on the left.
        let strip_w = if remaining.h > 0.0 { sum / remaining.h } else { 0.0 };
        let mut y = remaining.y;
        for &i in row {
            let h = if strip_w > 0.0 { areas[i] / strip_w } else { 0.0 };
            rects[i] = Rect::new(remaining.x, y, strip_w, h);
            y += h;
        }
        Rect::new(
            remaining.x + strip_w,
            remaining.y,
            remaining.w - strip_w,
            remaining.h,
        )
    } else {
        // Horizontal strip on top.
        let strip_h = if remaining.w > 0.0 { sum / remaining.w } else { 0.0 };
        let mut x = remaining.x;
        for &i in row {
            let w = if strip_h > 0.0 { areas[i] / strip_h } else { 0.0 };
            rects[i] = Rect::new(x, remaining.y, w, strip_h);
            x += w;
        }
        Rect::new(
            remaining.x,
            remaining.y + strip_h,
            remaining.w,
            remaining.h - strip_h,
        )
    }
}
