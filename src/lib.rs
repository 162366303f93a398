//! draw-rs: interactive "you-draw-it" curve elicitation engine.
//!
//! A host surface plots a series, the user sketches its continuation (or a
//! whole curve) by dragging, and the engine snaps every pointer sample onto a
//! fixed grid of drawable x-positions. Rendering is delegated to a
//! [`render::Renderer`] that consumes backend-agnostic frames.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{DrawSession, SessionConfig};
pub use error::{DrawError, DrawResult};
