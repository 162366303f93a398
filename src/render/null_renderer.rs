use crate::error::DrawResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer for tests and headless sessions.
///
/// Still validates frame content so invalid geometry surfaces without a
/// real surface attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_dot_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DrawResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines.len();
        self.last_rect_count = frame.rects.len();
        self.last_dot_count = frame.dots.len();
        Ok(())
    }
}
