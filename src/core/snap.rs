use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::DrawableGrid;

/// Finds the grid index a pointer at `drag_x` snaps to.
///
/// Scans forward from the first editable index and stops as soon as the
/// distance to `drag_x` grows, committing to the previous index. This
/// unimodal search is valid because grid x-values are strictly increasing.
/// When the distance never grows the last index wins.
#[must_use]
pub fn nearest_index(grid: &DrawableGrid, drag_x: f64) -> Option<usize> {
    if !drag_x.is_finite() {
        return None;
    }
    let points = grid.points();
    let start = grid.first_editable_index();
    if start >= points.len() {
        return None;
    }
    debug_assert!(
        points.windows(2).all(|pair| pair[0].x < pair[1].x),
        "grid x-values must be strictly increasing"
    );

    let mut last_distance = OrderedFloat(f64::INFINITY);
    for (index, point) in points.iter().enumerate().skip(start) {
        let distance = OrderedFloat((point.x - drag_x).abs());
        if distance > last_distance {
            return Some(index - 1);
        }
        last_distance = distance;
    }
    Some(points.len() - 1)
}

/// Commits `drag_y` at the grid index nearest to `drag_x`.
///
/// Overwrites any previous value at that index and touches no other index.
/// Returns `None`, leaving the grid unchanged, when no index is eligible or
/// the pointer position is not finite.
pub fn snap_and_fill(grid: &mut DrawableGrid, drag_x: f64, drag_y: f64) -> Option<usize> {
    if !drag_y.is_finite() {
        trace!(drag_x, drag_y, "ignoring non-finite drag position");
        return None;
    }
    let Some(index) = nearest_index(grid, drag_x) else {
        trace!(drag_x, "no editable grid point for drag position");
        return None;
    };
    grid.set_y(index, drag_y);
    trace!(index, drag_x, drag_y, "snapped drag to grid point");
    Some(index)
}
