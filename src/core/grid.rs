use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{DrawError, DrawResult};

/// One x-position at which the user may supply a y-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f64,
    /// `None` until the resolver commits a value.
    pub y: Option<f64>,
}

impl GridPoint {
    #[must_use]
    pub fn unset(x: f64) -> Self {
        Self { x, y: None }
    }

    #[must_use]
    pub fn filled(x: f64, y: f64) -> Self {
        Self { x, y: Some(y) }
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        self.y.is_some()
    }

    #[must_use]
    pub fn to_data_point(self) -> Option<DataPoint> {
        self.y.map(|y| DataPoint::new(self.x, y))
    }
}

/// Ordered drawable points for the active line plus build-time mode flags.
///
/// x-values are strictly increasing; only `y` ever changes after build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawableGrid {
    points: Vec<GridPoint>,
    free_draw: bool,
    pin_start: bool,
    prefilled: usize,
}

impl DrawableGrid {
    /// Wraps already-built points, checking the x ordering invariant.
    ///
    /// `prefilled` is the number of leading points filled at build time; it
    /// must match the filled prefix of `points`.
    pub fn from_points(
        points: Vec<GridPoint>,
        free_draw: bool,
        pin_start: bool,
        prefilled: usize,
    ) -> DrawResult<Self> {
        if points.is_empty() {
            return Err(DrawError::domain("drawable grid must not be empty"));
        }
        if points.iter().any(|point| !point.x.is_finite()) {
            return Err(DrawError::domain("drawable grid x-values must be finite"));
        }
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].x.total_cmp(&pair[0].x) != Ordering::Greater)
        {
            return Err(DrawError::Domain(format!(
                "drawable grid x must be strictly increasing (violated at index {})",
                index + 1
            )));
        }
        if prefilled > points.len() || points[..prefilled].iter().any(|point| !point.is_filled()) {
            return Err(DrawError::Domain(format!(
                "drawable grid declares {prefilled} pre-filled points that are not filled"
            )));
        }
        Ok(Self {
            points,
            free_draw,
            pin_start,
            prefilled,
        })
    }

    #[must_use]
    pub fn points(&self) -> &[GridPoint] {
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
    pub fn free_draw(&self) -> bool {
        self.free_draw
    }

    #[must_use]
    pub fn pin_start(&self) -> bool {
        self.pin_start
    }

    /// Number of points filled at build time.
    #[must_use]
    pub fn prefilled(&self) -> usize {
        self.prefilled
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.points.iter().filter(|point| point.is_filled()).count()
    }

    /// First index the resolver may write.
    #[must_use]
    pub fn first_editable_index(&self) -> usize {
        if !self.free_draw && self.pin_start {
            1
        } else {
            0
        }
    }

    #[must_use]
    pub fn x_values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.x).collect()
    }

    pub(crate) fn set_y(&mut self, index: usize, y: f64) {
        self.points[index].y = Some(y);
    }
}
