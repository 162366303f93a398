use chrono::Utc;
use tracing::{debug, trace};

use crate::core::{DataPoint, RenderPoint};
use crate::error::{DrawError, DrawResult};
use crate::extensions::SessionEvent;
use crate::interaction::{
    LINE_PALETTE, LineEffect, LineEffects, LineEvent, LineStyle, ToggleContext, WatchRegion,
};
use crate::render::Color;

use super::DrawSession;

impl DrawSession {
    /// "New line" toggle. Starts a line when idle, freezes it when drawing.
    ///
    /// Returned effects tell the host which pointer handlers to attach or
    /// detach.
    pub fn toggle_line_drawing(&mut self) -> LineEffects {
        let context = ToggleContext {
            style: LineStyle::default().with_color(self.line_color),
            region: WatchRegion::new(self.mapper.x_domain(), self.mapper.y_domain()),
            at: Utc::now(),
        };
        let was_drawing = self.lines.state().is_drawing();
        let effects = self.lines.handle(LineEvent::Toggle(context));
        if !was_drawing {
            self.emit_event(SessionEvent::LineStarted {
                color: self.line_color,
            });
        }
        self.emit_line_effects(&effects);
        effects
    }

    pub fn line_pointer_down(&mut self, point: DataPoint) -> LineEffects {
        self.run_line_event(LineEvent::PointerDown(point))
    }

    pub fn line_pointer_move(&mut self, point: DataPoint) -> LineEffects {
        self.run_line_event(LineEvent::PointerMove(point))
    }

    pub fn line_pointer_up(&mut self) -> LineEffects {
        self.run_line_event(LineEvent::PointerUp)
    }

    pub fn line_pointer_leave(&mut self) -> LineEffects {
        self.run_line_event(LineEvent::PointerLeave)
    }

    /// Maps a pixel position to data space for the line capture handlers.
    #[must_use]
    pub fn pointer_to_data(&self, pixel_x: f64, pixel_y: f64) -> Option<DataPoint> {
        self.mapper
            .to_data(RenderPoint::new(pixel_x, pixel_y))
            .inspect_err(|err| trace!(pixel_x, pixel_y, error = %err, "unmappable pointer"))
            .ok()
    }

    /// Selects the color of the next line and recolors the active one.
    /// Frozen lines keep their color.
    pub fn set_line_color(&mut self, color: Color) -> DrawResult<LineEffects> {
        color.validate()?;
        self.line_color = color;
        let effects = self.lines.handle(LineEvent::SetColor(color));
        debug!(color = %color.to_hex(), "selected line color");
        self.emit_event(SessionEvent::LineColorChanged { color });
        self.emit_line_effects(&effects);
        Ok(effects)
    }

    /// Palette shortcut for [`DrawSession::set_line_color`].
    pub fn select_palette_color(&mut self, index: usize) -> DrawResult<LineEffects> {
        let color = LINE_PALETTE.get(index).copied().ok_or_else(|| {
            DrawError::InvalidData(format!(
                "palette index {index} out of range (len {})",
                LINE_PALETTE.len()
            ))
        })?;
        self.set_line_color(color)
    }

    fn run_line_event(&mut self, event: LineEvent) -> LineEffects {
        let effects = self.lines.handle(event);
        self.emit_line_effects(&effects);
        effects
    }

    fn emit_line_effects(&mut self, effects: &LineEffects) {
        let completed = self.lines.completed().len();
        for effect in effects {
            match effect {
                LineEffect::RedrawActiveLine => {
                    let points_len = self
                        .active_line()
                        .map_or(0, |line| line.points().len());
                    self.emit_event(SessionEvent::LineUpdated { points_len });
                }
                LineEffect::FreezeLine(line) => {
                    self.emit_event(SessionEvent::LineFrozen {
                        line_index: completed.saturating_sub(1),
                        points_len: line.points.len(),
                    });
                }
                _ => {}
            }
        }
    }
}
