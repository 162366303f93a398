mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, DotPrimitive, LinePrimitive, LineStrokeStyle, RectPrimitive};

use crate::error::DrawResult;

/// Contract implemented by any drawing surface.
///
/// Backends receive a fully materialized `RenderFrame`, so surface code
/// stays isolated from grid state and pointer handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> DrawResult<()>;
}
