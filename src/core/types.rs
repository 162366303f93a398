use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DrawError, DrawResult};

/// Render-space extent supplied by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub(crate) fn ensure_valid(self) -> DrawResult<Self> {
        if !self.is_valid() {
            return Err(DrawError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 500)
    }
}

/// One sample in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One position in render space (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderPoint {
    pub x: f64,
    pub y: f64,
}

impl RenderPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered series with finite values and strictly increasing x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DataPoint>", into = "Vec<DataPoint>")]
pub struct Series {
    points: Vec<DataPoint>,
}

impl Series {
    /// Validates that `points` is non-empty, finite and strictly increasing in x.
    pub fn new(points: Vec<DataPoint>) -> DrawResult<Self> {
        if points.is_empty() {
            return Err(DrawError::domain("series must not be empty"));
        }
        if let Some(index) = points.iter().position(|point| !point.is_finite()) {
            return Err(DrawError::Domain(format!(
                "series point {index} must have finite coordinates"
            )));
        }
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].x.total_cmp(&pair[0].x) != Ordering::Greater)
        {
            return Err(DrawError::Domain(format!(
                "series x must be strictly increasing (violated at index {})",
                index + 1
            )));
        }
        Ok(Self { points })
    }

    /// Sorts by x, drops non-finite samples and keeps the last sample of
    /// each duplicate x before validating.
    pub fn canonical(mut points: Vec<DataPoint>) -> DrawResult<Self> {
        let original_len = points.len();
        points.retain(|point| point.is_finite());
        points.sort_by(|a, b| a.x.total_cmp(&b.x));

        let mut deduped: Vec<DataPoint> = Vec::with_capacity(points.len());
        let mut duplicate_count = 0_usize;
        for point in points {
            if let Some(last) = deduped.last_mut() {
                if point.x.total_cmp(&last.x) == Ordering::Equal {
                    *last = point;
                    duplicate_count += 1;
                    continue;
                }
            }
            deduped.push(point);
        }

        let filtered_count = original_len.saturating_sub(deduped.len() + duplicate_count);
        if filtered_count > 0 || duplicate_count > 0 {
            warn!(
                filtered_count,
                duplicate_count,
                canonical_count = deduped.len(),
                "canonicalized series points"
            );
        }
        Self::new(deduped)
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> DataPoint {
        self.points[0]
    }

    #[must_use]
    pub fn last(&self) -> DataPoint {
        self.points[self.points.len() - 1]
    }

    /// Returns `(min_x, max_x)`.
    #[must_use]
    pub fn x_extent(&self) -> (f64, f64) {
        (self.first().x, self.last().x)
    }

    /// Returns `(min_y, max_y)`.
    #[must_use]
    pub fn y_extent(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in &self.points {
            min = min.min(point.y);
            max = max.max(point.y);
        }
        (min, max)
    }

    /// Looks up the y-value stored at exactly `x`.
    #[must_use]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        self.points
            .binary_search_by(|point| point.x.total_cmp(&x))
            .ok()
            .map(|index| self.points[index].y)
    }
}

impl TryFrom<Vec<DataPoint>> for Series {
    type Error = DrawError;

    fn try_from(points: Vec<DataPoint>) -> DrawResult<Self> {
        Self::new(points)
    }
}

impl From<Series> for Vec<DataPoint> {
    fn from(series: Series) -> Self {
        series.points
    }
}

/// Source data for one chart: the true line plus optional overlays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSet {
    pub line: Series,
    #[serde(default)]
    pub points: Option<Series>,
    #[serde(default)]
    pub lower_bound: Option<Series>,
    #[serde(default)]
    pub upper_bound: Option<Series>,
}

impl SeriesSet {
    #[must_use]
    pub fn new(line: Series) -> Self {
        Self {
            line,
            points: None,
            lower_bound: None,
            upper_bound: None,
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: Series) -> Self {
        self.points = Some(points);
        self
    }

    /// Attaches confidence bounds; both must align index-for-index with the line.
    pub fn with_bounds(mut self, lower: Series, upper: Series) -> DrawResult<Self> {
        for (name, bound) in [("lower", &lower), ("upper", &upper)] {
            ensure_aligned(&self.line, bound, name)?;
        }
        self.lower_bound = Some(lower);
        self.upper_bound = Some(upper);
        Ok(self)
    }

    /// Re-checks bound alignment, for sets that arrived through deserialization.
    pub fn validate(&self) -> DrawResult<()> {
        match (&self.lower_bound, &self.upper_bound) {
            (Some(lower), Some(upper)) => {
                ensure_aligned(&self.line, lower, "lower")?;
                ensure_aligned(&self.line, upper, "upper")
            }
            (None, None) => Ok(()),
            _ => Err(DrawError::domain(
                "confidence bounds require both lower and upper series",
            )),
        }
    }

    #[must_use]
    pub fn has_bounds(&self) -> bool {
        self.lower_bound.is_some() && self.upper_bound.is_some()
    }
}

fn ensure_aligned(line: &Series, bound: &Series, name: &str) -> DrawResult<()> {
    if bound.len() != line.len() {
        return Err(DrawError::Domain(format!(
            "{name} bound has {} points, line has {}",
            bound.len(),
            line.len()
        )));
    }
    let misaligned = line
        .points()
        .iter()
        .zip(bound.points())
        .any(|(a, b)| a.x.total_cmp(&b.x) != Ordering::Equal);
    if misaligned {
        return Err(DrawError::Domain(format!(
            "{name} bound x-values must match the line x-values"
        )));
    }
    Ok(())
}
