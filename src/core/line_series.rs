use serde::{Deserialize, Serialize};

use crate::core::{CoordinateMapper, DataPoint, GridPoint};
use crate::error::DrawResult;

/// Projected line segment in render coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects a series into adjacent render-space segments.
pub fn project_line_segments(
    points: &[DataPoint],
    mapper: CoordinateMapper,
) -> DrawResult<Vec<LineSegment>> {
    project_defined_segments(points.iter().copied().map(Some), mapper)
}

/// Projects grid points, breaking the path wherever `y` is unset.
pub fn project_grid_segments(
    points: &[GridPoint],
    mapper: CoordinateMapper,
) -> DrawResult<Vec<LineSegment>> {
    project_defined_segments(points.iter().map(|point| point.to_data_point()), mapper)
}

/// Connects consecutive defined samples; a `None` ends the current run.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// same geometry.
pub fn project_defined_segments(
    points: impl IntoIterator<Item = Option<DataPoint>>,
    mapper: CoordinateMapper,
) -> DrawResult<Vec<LineSegment>> {
    let mut segments = Vec::new();
    let mut previous: Option<(f64, f64)> = None;

    for point in points {
        let Some(point) = point else {
            previous = None;
            continue;
        };
        let mapped = mapper.to_render(point)?;
        if let Some((x1, y1)) = previous {
            segments.push(LineSegment {
                x1,
                y1,
                x2: mapped.x,
                y2: mapped.y,
            });
        }
        previous = Some((mapped.x, mapped.y));
    }

    Ok(segments)
}
