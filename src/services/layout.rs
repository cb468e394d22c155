//! Position generation for every arrangement kind.
//!
//! All functions here are pure: the same `(count, arrangement, params)` always
//! yields the same positions, so a view can recompute them on every frame
//! without jitter. Position order is id order, which is also the order the
//! learner is asked to count in.

use crate::models::{Arrangement, Item, LayoutParams, Point};

/// Angle in degrees of item `index` on a circle of `count` items.
///
/// Item 0 sits at the top (-90 degrees) and angles increase clockwise in
/// screen coordinates.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn circle_angle(index: usize, count: usize) -> f64 {
    if count == 0 {
        return -90.0;
    }
    (index as f64) * 360.0 / (count as f64) - 90.0
}

/// Generates `count` positions for the given arrangement.
///
/// The arrangement is expected to have passed [`Arrangement::validate`] for
/// `count`; degenerate values (zero columns, oversized upper row) are clamped
/// rather than panicking.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_positions(
    count: usize,
    arrangement: &Arrangement,
    params: &LayoutParams,
) -> Vec<Point> {
    match *arrangement {
        Arrangement::Line => (0..count)
            .map(|i| Point::new(params.line_x0 + i as f64 * params.line_spacing, params.line_y))
            .collect(),
        Arrangement::Grid { cols, .. } => {
            let cols = cols.max(1);
            (0..count)
                .map(|i| {
                    Point::new(
                        params.grid_x0 + (i % cols) as f64 * params.grid_col_spacing,
                        params.grid_y0 + (i / cols) as f64 * params.grid_row_spacing,
                    )
                })
                .collect()
        }
        Arrangement::Circle { radius } => (0..count)
            .map(|i| {
                let radians = circle_angle(i, count).to_radians();
                Point::new(
                    params.circle_cx + radius * radians.cos(),
                    params.circle_cy + radius * radians.sin(),
                )
            })
            .collect(),
        Arrangement::GroupedFive { top } => {
            let top = top.min(count);
            let mut positions = centered_row(top, params.group_top_y, params);
            positions.extend(centered_row(count - top, params.group_bottom_y, params));
            positions
        }
    }
}

/// Generates items (id + position) for the given arrangement.
#[must_use]
pub fn layout_items(count: usize, arrangement: &Arrangement, params: &LayoutParams) -> Vec<Item> {
    generate_positions(count, arrangement, params)
        .into_iter()
        .enumerate()
        .map(|(id, position)| Item { id, position })
        .collect()
}

/// One row of `n` items centered on `params.group_center_x`.
#[allow(clippy::cast_precision_loss)]
fn centered_row(n: usize, y: f64, params: &LayoutParams) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    let span = (n - 1) as f64 * params.group_spacing;
    let x0 = params.group_center_x - span / 2.0;
    (0..n)
        .map(|i| Point::new(x0 + i as f64 * params.group_spacing, y))
        .collect()
}
