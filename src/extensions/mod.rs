//! Host-facing extension points.
//!
//! Extensions observe the session; they never sit on the core drawing path.

pub mod plugins;

pub use plugins::{SessionContext, SessionEvent, SessionPlugin};
