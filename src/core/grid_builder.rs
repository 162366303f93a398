use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DrawableGrid, GridPoint, Series};
use crate::error::{DrawError, DrawResult};

/// Density thresholds, each a fraction of the series' total x range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTuning {
    /// A bin closes once the next point is farther than this from the bin start.
    pub bin_threshold_fraction: f64,
    /// Gaps wider than this are filled with evenly spaced unset points.
    pub gap_threshold_fraction: f64,
    /// Points closer than this to the previous kept point are dropped.
    pub dedup_threshold_fraction: f64,
}

impl Default for GridTuning {
    fn default() -> Self {
        Self {
            bin_threshold_fraction: 0.05,
            gap_threshold_fraction: 0.10,
            dedup_threshold_fraction: 0.000_5,
        }
    }
}

/// Smallest accepted gap fraction; bounds gap filling to about 10^4 points.
pub const MIN_GAP_THRESHOLD_FRACTION: f64 = 1e-4;

impl GridTuning {
    pub fn validate(self) -> DrawResult<Self> {
        for (name, value) in [
            ("bin_threshold_fraction", self.bin_threshold_fraction),
            ("gap_threshold_fraction", self.gap_threshold_fraction),
            ("dedup_threshold_fraction", self.dedup_threshold_fraction),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DrawError::Domain(format!(
                    "grid tuning `{name}` must be finite and > 0"
                )));
            }
        }
        if self.gap_threshold_fraction < MIN_GAP_THRESHOLD_FRACTION {
            return Err(DrawError::Domain(format!(
                "grid tuning `gap_threshold_fraction` must be >= {MIN_GAP_THRESHOLD_FRACTION} (got {})",
                self.gap_threshold_fraction
            )));
        }
        Ok(self)
    }
}

/// Drawing-mode inputs for one grid build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridRequest {
    pub free_draw: bool,
    /// Continuation mode only: first drawable x.
    pub draw_start: f64,
    pub pin_start: bool,
    /// Free-draw only: visual x domain the grid must span.
    pub x_range: Option<(f64, f64)>,
}

impl GridRequest {
    #[must_use]
    pub fn free_draw(x_range: Option<(f64, f64)>) -> Self {
        Self {
            free_draw: true,
            draw_start: f64::NEG_INFINITY,
            pin_start: false,
            x_range,
        }
    }

    #[must_use]
    pub fn continuation(draw_start: f64, pin_start: bool) -> Self {
        Self {
            free_draw: false,
            draw_start,
            pin_start,
            x_range: None,
        }
    }
}

/// Derives the drawable grid from a raw series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridBuilder {
    tuning: GridTuning,
}

impl GridBuilder {
    pub fn new(tuning: GridTuning) -> DrawResult<Self> {
        Ok(Self {
            tuning: tuning.validate()?,
        })
    }

    #[must_use]
    pub fn tuning(self) -> GridTuning {
        self.tuning
    }

    pub fn build(self, series: &Series, request: &GridRequest) -> DrawResult<DrawableGrid> {
        let mut points: Vec<GridPoint> = series
            .points()
            .iter()
            .map(|point| GridPoint::filled(point.x, point.y))
            .collect();

        if request.free_draw {
            if let Some(range) = request.x_range {
                extend_to_range(&mut points, range)?;
            }
        }

        let total_x_range = points[points.len() - 1].x - points[0].x;

        if !request.free_draw {
            if !request.draw_start.is_finite() {
                return Err(DrawError::domain(
                    "continuation mode requires a finite draw start",
                ));
            }
            points.retain(|point| point.x >= request.draw_start);
            if points.is_empty() {
                return Err(DrawError::Domain(format!(
                    "draw start {} lies beyond the last series x",
                    request.draw_start
                )));
            }
        }

        let source_count = points.len();
        let points = if total_x_range > 0.0 {
            let simplified = simplify_bins(
                points,
                total_x_range * self.tuning.bin_threshold_fraction,
            );
            let simplified_count = simplified.len();
            let interpolated = interpolate_gaps(
                simplified,
                total_x_range * self.tuning.gap_threshold_fraction,
            );
            let interpolated_count = interpolated.len();
            let deduped = dedup_close(
                interpolated,
                total_x_range * self.tuning.dedup_threshold_fraction,
            );
            debug!(
                source_count,
                simplified_count,
                interpolated_count,
                deduped_count = deduped.len(),
                total_x_range,
                "built drawable grid"
            );
            deduped
        } else {
            points
        };

        let (points, prefilled) = initial_fill(points, request.free_draw);
        DrawableGrid::from_points(points, request.free_draw, request.pin_start, prefilled)
    }
}

fn extend_to_range(points: &mut Vec<GridPoint>, range: (f64, f64)) -> DrawResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() || range.0 >= range.1 {
        return Err(DrawError::Domain(format!(
            "x range must be finite and increasing: [{}, {}]",
            range.0, range.1
        )));
    }
    if range.0 < points[0].x {
        points.insert(0, GridPoint::unset(range.0));
    }
    if range.1 > points[points.len() - 1].x {
        points.push(GridPoint::unset(range.1));
    }
    Ok(())
}

/// Keeps first/middle/last of every bin holding three or more points.
pub(crate) fn simplify_bins(points: Vec<GridPoint>, bin_size: f64) -> Vec<GridPoint> {
    let mut simplified = Vec::with_capacity(points.len());
    let mut bin_start = 0;

    for index in 0..points.len() {
        let closes_bin = index + 1 == points.len()
            || points[index + 1].x - points[bin_start].x > bin_size;
        if !closes_bin {
            continue;
        }

        let bin = &points[bin_start..=index];
        if bin.len() >= 3 {
            simplified.push(bin[0]);
            simplified.push(bin[bin.len() / 2]);
            simplified.push(bin[bin.len() - 1]);
        } else {
            simplified.extend_from_slice(bin);
        }
        bin_start = index + 1;
    }

    simplified
}

/// Inserts unset points every `step` across gaps wider than `step`.
pub(crate) fn interpolate_gaps(points: Vec<GridPoint>, step: f64) -> Vec<GridPoint> {
    let mut filled = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        filled.push(*point);
        let Some(next) = points.get(index + 1) else {
            continue;
        };
        if (next.x - point.x).abs() <= step {
            continue;
        }

        let mut k = 1_u32;
        loop {
            let x = point.x + f64::from(k) * step;
            if x >= next.x {
                break;
            }
            filled.push(GridPoint::unset(x));
            k += 1;
        }
    }

    filled
}

/// Drops points within `threshold` of the previous kept point.
///
/// The final point always survives: a close predecessor is replaced instead,
/// so the grid keeps reaching the domain end.
pub(crate) fn dedup_close(points: Vec<GridPoint>, threshold: f64) -> Vec<GridPoint> {
    let last_index = points.len().saturating_sub(1);
    let mut deduped: Vec<GridPoint> = Vec::with_capacity(points.len());
    for (index, point) in points.into_iter().enumerate() {
        let close = deduped
            .last()
            .is_some_and(|last| point.x - last.x <= threshold);
        if !close {
            deduped.push(point);
        } else if index == last_index && deduped.len() > 1 {
            if let Some(last) = deduped.last_mut() {
                *last = point;
            }
        }
    }
    deduped
}

/// Clears every y, keeping the source y of the first point in continuation mode.
fn initial_fill(points: Vec<GridPoint>, free_draw: bool) -> (Vec<GridPoint>, usize) {
    let mut prefilled = 0;
    let points: Vec<GridPoint> = points
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            if index == 0 && !free_draw && point.is_filled() {
                prefilled = 1;
                point
            } else {
                GridPoint::unset(point.x)
            }
        })
        .collect();
    (points, prefilled)
}

#[cfg(test)]
mod tests {
    use super::{dedup_close, interpolate_gaps, simplify_bins};
    use crate::core::GridPoint;

    fn xs(points: &[GridPoint]) -> Vec<f64> {
        points.iter().map(|point| point.x).collect()
    }

    #[test]
    fn small_bins_are_kept_whole() {
        let points = vec![GridPoint::unset(0.0), GridPoint::unset(0.5), GridPoint::unset(5.0)];
        assert_eq!(xs(&simplify_bins(points, 1.0)), vec![0.0, 0.5, 5.0]);
    }

    #[test]
    fn interpolation_stops_before_next_point() {
        let points = vec![GridPoint::unset(0.0), GridPoint::unset(3.0)];
        assert_eq!(
            xs(&interpolate_gaps(points, 1.0)),
            vec![0.0, 1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn dedup_keeps_first_of_near_duplicates() {
        let points = vec![
            GridPoint::unset(0.0),
            GridPoint::unset(0.001),
            GridPoint::unset(1.0),
        ];
        assert_eq!(xs(&dedup_close(points, 0.01)), vec![0.0, 1.0]);
    }

    #[test]
    fn dedup_keeps_the_final_point_over_a_close_predecessor() {
        let points = vec![
            GridPoint::unset(0.0),
            GridPoint::unset(0.5),
            GridPoint::unset(0.995),
            GridPoint::filled(1.0, 2.0),
        ];
        let deduped = dedup_close(points, 0.01);
        assert_eq!(xs(&deduped), vec![0.0, 0.5, 1.0]);
        assert_eq!(deduped[2].y, Some(2.0));
    }
}
