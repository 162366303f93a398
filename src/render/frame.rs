use crate::core::Viewport;
use crate::error::{DrawError, DrawResult};
use crate::render::{DotPrimitive, LinePrimitive, RectPrimitive};

/// Backend-agnostic scene for one session draw pass.
///
/// Primitives are listed back to front: rects, then lines, then dots.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub rects: Vec<RectPrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub dots: Vec<DotPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            rects: Vec::new(),
            lines: Vec::new(),
            dots: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.rects.push(rect);
        self
    }

    #[must_use]
    pub fn with_dot(mut self, dot: DotPrimitive) -> Self {
        self.dots.push(dot);
        self
    }

    pub fn validate(&self) -> DrawResult<()> {
        if !self.viewport.is_valid() {
            return Err(DrawError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for rect in &self.rects {
            rect.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for dot in &self.dots {
            dot.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.dots.is_empty()
    }
}
