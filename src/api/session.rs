use chrono::Utc;
use tracing::debug;

use crate::core::{
    CoordinateMapper, DrawableGrid, GridBuilder, ProgressStatus, SeriesSet, Viewport, classify,
    draw_region, fill_fraction,
};
use crate::error::DrawResult;
use crate::extensions::{SessionEvent, SessionPlugin};
use crate::interaction::{ActiveLine, LineEvent, LineSession, LineSessionManager};
use crate::render::Color;

use super::SessionConfig;

/// One chart instance's drawing interaction.
///
/// Owns the active grid, the coordinate mapper and the multi-line state.
/// Only the drag controller writes grid y-values; everything else reads.
pub struct DrawSession {
    pub(super) config: SessionConfig,
    pub(super) series: SeriesSet,
    pub(super) builder: GridBuilder,
    pub(super) mapper: CoordinateMapper,
    pub(super) grid: DrawableGrid,
    pub(super) lines: LineSessionManager,
    pub(super) line_color: Color,
    pub(super) plugins: Vec<Box<dyn SessionPlugin>>,
}

impl DrawSession {
    /// Validates the configuration and builds the mapper and initial grid.
    pub fn new(series: SeriesSet, config: SessionConfig) -> DrawResult<Self> {
        let config = config.validate()?;
        series.validate()?;

        let mapper = CoordinateMapper::from_series(
            &series.line,
            config.x_range,
            config.y_range,
            config.value_scale_mode()?,
            config.viewport,
        )?;
        // Overlays share the line's axes; a log axis rejects their non-positive y too.
        for overlay in [&series.points, &series.lower_bound, &series.upper_bound]
            .into_iter()
            .flatten()
        {
            for point in overlay.points() {
                mapper.to_render(*point)?;
            }
        }
        let builder = GridBuilder::new(config.grid_tuning)?;
        let grid = builder.build(&series.line, &config.grid_request())?;
        debug!(
            free_draw = config.free_draw,
            grid_len = grid.len(),
            series_len = series.line.len(),
            "started draw session"
        );

        Ok(Self {
            config,
            series,
            builder,
            mapper,
            grid,
            lines: LineSessionManager::default(),
            line_color: config.drawn_line_color,
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        self.mapper
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.mapper.viewport()
    }

    #[must_use]
    pub fn grid(&self) -> &DrawableGrid {
        &self.grid
    }

    /// Progress of the single-line grid, re-derived on every call.
    #[must_use]
    pub fn status(&self) -> ProgressStatus {
        classify(&self.grid)
    }

    #[must_use]
    pub fn fill_fraction(&self) -> f64 {
        fill_fraction(&self.grid)
    }

    /// Data-space x band still open for drawing.
    #[must_use]
    pub fn draw_region(&self) -> Option<(f64, f64)> {
        draw_region(&self.grid, self.mapper.x_domain().1, self.config.x_step_hint)
    }

    #[must_use]
    pub fn completed_lines(&self) -> &[LineSession] {
        self.lines.completed()
    }

    #[must_use]
    pub fn active_line(&self) -> Option<&ActiveLine> {
        self.lines.state().active_line()
    }

    #[must_use]
    pub fn is_drawing_line(&self) -> bool {
        self.lines.state().is_drawing()
    }

    /// Color applied to the next started line.
    #[must_use]
    pub fn line_color(&self) -> Color {
        self.line_color
    }

    /// Rebuilds the mapper for a new render extent. Grid values are untouched.
    pub fn resize(&mut self, viewport: Viewport) -> DrawResult<()> {
        self.mapper = self.mapper.with_viewport(viewport)?;
        self.config.viewport = viewport;
        debug!(width = viewport.width, height = viewport.height, "resized draw session");
        self.emit_event(SessionEvent::Resized {
            width: viewport.width,
            height: viewport.height,
        });
        Ok(())
    }

    /// Full reset: freezes and then discards every user line, returns the
    /// line state machine to idle and rebuilds the grid from the series.
    pub fn reset(&mut self) -> DrawResult<()> {
        self.grid = self
            .builder
            .build(&self.series.line, &self.config.grid_request())?;
        self.lines.handle(LineEvent::Reset { at: Utc::now() });
        debug!(grid_len = self.grid.len(), "reset draw session");
        self.emit_event(SessionEvent::SessionReset);
        Ok(())
    }
}
