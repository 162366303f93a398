use tracing::trace;

use crate::core::{DataPoint, ProgressStatus, RenderPoint, snap_and_fill};
use crate::extensions::SessionEvent;

use super::DrawSession;

impl DrawSession {
    /// Single-line drag sample in data coordinates.
    ///
    /// Snaps to the nearest editable grid point and overwrites its y. Ignored
    /// while a multi-line drawing is active, because the default drag handler
    /// is detached then. Samples the mapper cannot project (e.g. y <= 0 on a
    /// log axis) are dropped without touching the grid.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<usize> {
        if !self.lines.default_drag_enabled() {
            trace!(x, y, "default drag detached; ignoring sample");
            return None;
        }
        if let Err(err) = self.mapper.to_render(DataPoint::new(x, y)) {
            trace!(x, y, error = %err, "ignoring unprojectable drag sample");
            return None;
        }
        let index = snap_and_fill(&mut self.grid, x, y)?;
        let status = self.status();
        self.emit_event(SessionEvent::GridChanged { index, status });
        Some(index)
    }

    /// Same as [`DrawSession::drag_to`] with a pointer position in pixels.
    pub fn drag_to_render(&mut self, pixel_x: f64, pixel_y: f64) -> Option<usize> {
        let point = match self.mapper.to_data(RenderPoint::new(pixel_x, pixel_y)) {
            Ok(point) => point,
            Err(err) => {
                trace!(pixel_x, pixel_y, error = %err, "ignoring unmappable drag position");
                return None;
            }
        };
        self.drag_to(point.x, point.y)
    }

    /// End of a drag stroke; returns the progress at that moment.
    pub fn end_drag(&mut self) -> ProgressStatus {
        let status = self.status();
        if self.lines.default_drag_enabled() {
            self.emit_event(SessionEvent::StrokeEnded { status });
        }
        status
    }
}
