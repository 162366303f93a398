use crate::core::DataPoint;

/// Returns points whose x falls inside an inclusive window.
#[must_use]
pub fn points_in_x_window(points: &[DataPoint], start: f64, end: f64) -> Vec<DataPoint> {
    let (min_x, max_x) = if start <= end {
        (start, end)
    } else {
        (end, start)
    };

    points
        .iter()
        .copied()
        .filter(|point| point.x >= min_x && point.x <= max_x)
        .collect()
}

/// Returns points with `x <= end`.
#[must_use]
pub fn points_up_to(points: &[DataPoint], end: f64) -> Vec<DataPoint> {
    points_in_x_window(points, f64::NEG_INFINITY, end)
}

/// Returns points with `x >= start`.
#[must_use]
pub fn points_from(points: &[DataPoint], start: f64) -> Vec<DataPoint> {
    points_in_x_window(points, start, f64::INFINITY)
}
