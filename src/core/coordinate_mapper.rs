use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{DataPoint, LinearScale, RenderPoint, Series, ValueScale, ValueScaleMode, Viewport};
use crate::error::{DrawError, DrawResult};

/// Bidirectional data-space / render-space mapping for one chart.
///
/// x maps onto `[0, width]`, y onto `[height, 0]`. The mapper is `Copy` and
/// rebuilt on every resize instead of being cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    x: LinearScale,
    y: ValueScale,
    viewport: Viewport,
}

impl CoordinateMapper {
    /// Creates a mapper from explicit domains.
    pub fn new(
        x_domain: (f64, f64),
        y_domain: (f64, f64),
        mode: ValueScaleMode,
        viewport: Viewport,
    ) -> DrawResult<Self> {
        let viewport = viewport.ensure_valid()?;
        ensure_ordered(x_domain, "x")?;
        let x = LinearScale::with_range(
            x_domain.0,
            x_domain.1,
            0.0,
            f64::from(viewport.width),
        )?;
        let y = ValueScale::new(y_domain.0, y_domain.1, mode, f64::from(viewport.height))?;
        Ok(Self { x, y, viewport })
    }

    /// Creates a mapper whose domains default to the extent of `series`.
    ///
    /// In log mode every y of `series` must be > 0, whether or not an explicit
    /// `y_range` is supplied.
    pub fn from_series(
        series: &Series,
        x_range: Option<(f64, f64)>,
        y_range: Option<(f64, f64)>,
        mode: ValueScaleMode,
        viewport: Viewport,
    ) -> DrawResult<Self> {
        let viewport = viewport.ensure_valid()?;
        if let ValueScaleMode::Log { .. } = mode {
            if let Some(point) = series.points().iter().find(|point| point.y <= 0.0) {
                return Err(DrawError::Domain(format!(
                    "log value scale requires y > 0, found y={} at x={}",
                    point.y, point.x
                )));
            }
        }

        let x_domain = match x_range {
            Some(range) => range,
            None => widen_flat_x(series.x_extent()),
        };
        ensure_ordered(x_domain, "x")?;
        let x = LinearScale::with_range(
            x_domain.0,
            x_domain.1,
            0.0,
            f64::from(viewport.width),
        )?;

        let height = f64::from(viewport.height);
        let y = match y_range {
            Some(range) => ValueScale::new(range.0, range.1, mode, height)?,
            None => {
                let (min, max) = series.y_extent();
                ValueScale::from_extent(min, max, mode, height)?
            }
        };
        Ok(Self { x, y, viewport })
    }

    /// Rebuilds the mapper for a new render extent; domains are untouched.
    pub fn with_viewport(self, viewport: Viewport) -> DrawResult<Self> {
        let viewport = viewport.ensure_valid()?;
        Ok(Self {
            x: self.x.with_output_range(0.0, f64::from(viewport.width))?,
            y: self.y.with_height(f64::from(viewport.height))?,
            viewport,
        })
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn x_domain(self) -> (f64, f64) {
        self.x.domain()
    }

    #[must_use]
    pub fn y_domain(self) -> (f64, f64) {
        self.y.domain()
    }

    #[must_use]
    pub fn mode(self) -> ValueScaleMode {
        self.y.mode()
    }

    pub fn to_render(self, point: DataPoint) -> DrawResult<RenderPoint> {
        Ok(RenderPoint::new(
            self.x.map(point.x)?,
            self.y.value_to_pixel(point.y)?,
        ))
    }

    pub fn to_data(self, point: RenderPoint) -> DrawResult<DataPoint> {
        Ok(DataPoint::new(
            self.x.invert(point.x)?,
            self.y.pixel_to_value(point.y)?,
        ))
    }

    pub fn x_to_render(self, x: f64) -> DrawResult<f64> {
        self.x.map(x)
    }

    /// Returns whether a data-space position lies inside the plotted area.
    #[must_use]
    pub fn contains(self, point: DataPoint) -> bool {
        let (x0, x1) = self.x.domain();
        let (y0, y1) = self.y.domain();
        point.is_finite()
            && point.x >= x0.min(x1)
            && point.x <= x0.max(x1)
            && point.y >= y0
            && point.y <= y1
    }

    #[must_use]
    pub fn x_ticks(self, tick_count: usize) -> Vec<f64> {
        let (start, end) = self.x.domain();
        LinearScale::new(start, end)
            .map(|scale| scale.ticks(tick_count))
            .unwrap_or_default()
    }

    pub fn y_ticks(self, tick_count: usize) -> DrawResult<Vec<f64>> {
        self.y.ticks(tick_count)
    }
}

/// A single-x series still gets a unit-wide axis centered on that x.
fn widen_flat_x((min, max): (f64, f64)) -> (f64, f64) {
    if min != max {
        return (min, max);
    }
    warn!(value = min, start = min - 0.5, end = max + 0.5, "widened flat x extent");
    (min - 0.5, max + 0.5)
}

fn ensure_ordered(range: (f64, f64), axis: &str) -> DrawResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() {
        return Err(DrawError::Domain(format!("{axis} domain must be finite")));
    }
    if range.0 >= range.1 {
        return Err(DrawError::Domain(format!(
            "{axis} domain must be increasing and non-degenerate: [{}, {}]",
            range.0, range.1
        )));
    }
    Ok(())
}
