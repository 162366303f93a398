use serde::{Deserialize, Serialize};

use crate::core::{GridRequest, GridTuning, ValueScaleMode, Viewport};
use crate::error::{DrawError, DrawResult};
use crate::render::Color;

/// Which scatter points are displayed next to the line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum PointsDisplay {
    #[default]
    None,
    /// Only points with `x <= end`.
    Partial { end: f64 },
    Full,
}

/// Session bootstrap configuration.
///
/// Serializable so hosts can persist/load a drawing setup. Validated once by
/// `DrawSession::new`; the session never re-reads loose options afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub free_draw: bool,
    /// First drawable x; required in continuation mode, ignored in free-draw mode.
    #[serde(default)]
    pub draw_start: Option<f64>,
    #[serde(default = "default_pin_start")]
    pub pin_start: bool,
    #[serde(default)]
    pub x_range: Option<(f64, f64)>,
    #[serde(default)]
    pub y_range: Option<(f64, f64)>,
    #[serde(default = "default_linear")]
    pub linear: bool,
    #[serde(default)]
    pub log_base: Option<f64>,
    #[serde(default)]
    pub x_step_hint: f64,
    #[serde(default = "default_show_finished")]
    pub show_finished: bool,
    #[serde(default)]
    pub points: PointsDisplay,
    #[serde(default)]
    pub grid_tuning: GridTuning,
    #[serde(default = "default_line_color")]
    pub data_line_color: Color,
    #[serde(default = "default_line_color")]
    pub drawn_line_color: Color,
    #[serde(default)]
    pub viewport: Viewport,
}

impl SessionConfig {
    /// Continuation mode: the user extends the series from `draw_start`.
    #[must_use]
    pub fn continuation(draw_start: f64) -> Self {
        Self {
            free_draw: false,
            draw_start: Some(draw_start),
            pin_start: default_pin_start(),
            x_range: None,
            y_range: None,
            linear: default_linear(),
            log_base: None,
            x_step_hint: 0.0,
            show_finished: default_show_finished(),
            points: PointsDisplay::None,
            grid_tuning: GridTuning::default(),
            data_line_color: default_line_color(),
            drawn_line_color: default_line_color(),
            viewport: Viewport::default(),
        }
    }

    /// Free-draw mode: the user supplies the whole curve.
    #[must_use]
    pub fn free_draw() -> Self {
        Self {
            free_draw: true,
            draw_start: None,
            pin_start: false,
            ..Self::continuation(0.0)
        }
    }

    /// Loads a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json_str(input: &str) -> DrawResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DrawError::InvalidData(format!("failed to parse session config: {e}")))
    }

    #[must_use]
    pub fn with_pin_start(mut self, pin_start: bool) -> Self {
        self.pin_start = pin_start;
        self
    }

    #[must_use]
    pub fn with_x_range(mut self, start: f64, end: f64) -> Self {
        self.x_range = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_y_range(mut self, start: f64, end: f64) -> Self {
        self.y_range = Some((start, end));
        self
    }

    /// Switches the y axis to a log transform; `None` selects the natural log.
    #[must_use]
    pub fn with_log_scale(mut self, log_base: Option<f64>) -> Self {
        self.linear = false;
        self.log_base = log_base;
        self
    }

    #[must_use]
    pub fn with_x_step_hint(mut self, x_step_hint: f64) -> Self {
        self.x_step_hint = x_step_hint;
        self
    }

    #[must_use]
    pub fn with_show_finished(mut self, show_finished: bool) -> Self {
        self.show_finished = show_finished;
        self
    }

    #[must_use]
    pub fn with_points(mut self, points: PointsDisplay) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn with_grid_tuning(mut self, tuning: GridTuning) -> Self {
        self.grid_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_drawn_line_color(mut self, color: Color) -> Self {
        self.drawn_line_color = color;
        self
    }

    #[must_use]
    pub fn with_data_line_color(mut self, color: Color) -> Self {
        self.data_line_color = color;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Resolved y transform.
    pub fn value_scale_mode(&self) -> DrawResult<ValueScaleMode> {
        ValueScaleMode::from_config(self.linear, self.log_base)
    }

    #[must_use]
    pub fn grid_request(&self) -> GridRequest {
        if self.free_draw {
            GridRequest::free_draw(self.x_range)
        } else {
            GridRequest::continuation(self.draw_start.unwrap_or(f64::NAN), self.pin_start)
        }
    }

    pub fn validate(self) -> DrawResult<Self> {
        self.viewport.ensure_valid()?;
        if !self.free_draw && !self.draw_start.is_some_and(f64::is_finite) {
            return Err(DrawError::domain(
                "continuation mode requires a finite draw_start",
            ));
        }
        for (name, range) in [("x_range", self.x_range), ("y_range", self.y_range)] {
            if let Some((start, end)) = range {
                if !start.is_finite() || !end.is_finite() || start >= end {
                    return Err(DrawError::Domain(format!(
                        "{name} must be finite and increasing: [{start}, {end}]"
                    )));
                }
            }
        }
        if !self.x_step_hint.is_finite() || self.x_step_hint < 0.0 {
            return Err(DrawError::domain("x_step_hint must be finite and >= 0"));
        }
        if let PointsDisplay::Partial { end } = self.points {
            if !end.is_finite() {
                return Err(DrawError::domain("partial points end must be finite"));
            }
        }
        self.grid_tuning.validate()?;
        self.data_line_color.validate()?;
        self.drawn_line_color.validate()?;
        self.value_scale_mode()?;
        Ok(self)
    }
}

fn default_pin_start() -> bool {
    true
}

fn default_linear() -> bool {
    true
}

fn default_show_finished() -> bool {
    true
}

fn default_line_color() -> Color {
    Color::STEELBLUE
}
