use serde::{Deserialize, Serialize};

use crate::core::{ProgressStatus, Viewport};
use crate::render::Color;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub viewport: Viewport,
    pub status: ProgressStatus,
    pub filled: usize,
    pub total: usize,
    pub completed_lines: usize,
    pub drawing_line: bool,
}

/// Event stream exposed to plugins.
///
/// `GridChanged` is the level-triggered redraw notification: it carries the
/// freshly classified status, and hosts react to `Done` there instead of
/// waiting for a dedicated completion event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    GridChanged { index: usize, status: ProgressStatus },
    StrokeEnded { status: ProgressStatus },
    LineStarted { color: Color },
    LineUpdated { points_len: usize },
    LineFrozen { line_index: usize, points_len: usize },
    LineColorChanged { color: Color },
    SessionReset,
    Resized { width: u32, height: u32 },
}

/// Extension hook interface for host-side observers.
///
/// Plugins observe events and read session context without mutating the
/// drawing state directly.
pub trait SessionPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: SessionEvent, context: SessionContext);
}
