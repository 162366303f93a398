//! Multi-line drawing state machine.
//!
//! Transitions are pure functions from `(state, event)` to
//! `(state, effects)`. The session executes the effects: handler
//! attach/detach is reported to the host, freeze/discard effects update the
//! completed-lines collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::{debug, trace};

use crate::core::DataPoint;
use crate::render::{Color, LineStrokeStyle};

/// Fixed palette offered to users picking a line color.
pub const LINE_PALETTE: [Color; 6] = [
    Color::STEELBLUE,
    Color::FIREBRICK,
    Color::DARKORANGE,
    Color::SEAGREEN,
    Color::REBECCAPURPLE,
    Color::BLACK,
];

/// Display style of one user line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    pub stroke: LineStrokeStyle,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::STEELBLUE,
            stroke: LineStrokeStyle::Dashed,
        }
    }
}

impl LineStyle {
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Style using the palette entry at `index`, wrapping around.
    #[must_use]
    pub fn from_palette(index: usize) -> Self {
        Self::default().with_color(LINE_PALETTE[index % LINE_PALETTE.len()])
    }
}

/// Data-space rectangle in which pointer samples are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchRegion {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl WatchRegion {
    #[must_use]
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn contains(self, point: DataPoint) -> bool {
        point.is_finite()
            && point.x >= self.x.0.min(self.x.1)
            && point.x <= self.x.0.max(self.x.1)
            && point.y >= self.y.0.min(self.y.1)
            && point.y <= self.y.0.max(self.y.1)
    }
}

/// One frozen user line. Never mutated after freezing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSession {
    pub points: Vec<DataPoint>,
    pub style: LineStyle,
    pub committed_at: Option<DateTime<Utc>>,
}

/// Line currently being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveLine {
    buffer: Vec<DataPoint>,
    style: LineStyle,
    region: WatchRegion,
    pointer_down: bool,
}

impl ActiveLine {
    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.buffer
    }

    #[must_use]
    pub fn style(&self) -> LineStyle {
        self.style
    }

    #[must_use]
    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LineDrawState {
    #[default]
    Idle,
    Drawing(ActiveLine),
}

/// Inputs of the toggle action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleContext {
    /// Style for a line started by this toggle.
    pub style: LineStyle,
    pub region: WatchRegion,
    /// Commit timestamp for a line frozen by this toggle.
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineEvent {
    Toggle(ToggleContext),
    PointerDown(DataPoint),
    PointerMove(DataPoint),
    PointerUp,
    PointerLeave,
    SetColor(Color),
    Reset { at: DateTime<Utc> },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum LineEffect {
    DetachDefaultDrag,
    AttachLineCapture,
    DetachLineCapture,
    AttachDefaultDrag,
    RedrawActiveLine,
    FreezeLine(LineSession),
    DiscardFrozenLines,
}

pub type LineEffects = SmallVec<[LineEffect; 4]>;

impl LineDrawState {
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing(_))
    }

    #[must_use]
    pub fn active_line(&self) -> Option<&ActiveLine> {
        match self {
            Self::Idle => None,
            Self::Drawing(line) => Some(line),
        }
    }

    /// Applies one event. Events that make no sense in the current state are
    /// no-ops, so "freeze before start" and "double start" cannot happen.
    #[must_use]
    pub fn apply(self, event: LineEvent) -> (Self, LineEffects) {
        match (self, event) {
            (Self::Idle, LineEvent::Toggle(context)) => (
                Self::Drawing(ActiveLine {
                    buffer: Vec::new(),
                    style: context.style,
                    region: context.region,
                    pointer_down: false,
                }),
                smallvec![LineEffect::DetachDefaultDrag, LineEffect::AttachLineCapture],
            ),
            (Self::Idle, LineEvent::Reset { .. }) => {
                (Self::Idle, smallvec![LineEffect::DiscardFrozenLines])
            }
            (Self::Idle, _) => (Self::Idle, SmallVec::new()),
            (Self::Drawing(line), LineEvent::Toggle(context)) => {
                (Self::Idle, freeze(line, context.at))
            }
            (Self::Drawing(line), LineEvent::Reset { at }) => {
                let mut effects = freeze(line, at);
                effects.push(LineEffect::DiscardFrozenLines);
                (Self::Idle, effects)
            }
            (Self::Drawing(mut line), LineEvent::PointerDown(point)) => {
                line.pointer_down = true;
                let effects = record(&mut line, point);
                (Self::Drawing(line), effects)
            }
            (Self::Drawing(mut line), LineEvent::PointerMove(point)) => {
                let effects = if line.pointer_down {
                    record(&mut line, point)
                } else {
                    SmallVec::new()
                };
                (Self::Drawing(line), effects)
            }
            (Self::Drawing(mut line), LineEvent::PointerUp | LineEvent::PointerLeave) => {
                line.pointer_down = false;
                (Self::Drawing(line), SmallVec::new())
            }
            (Self::Drawing(mut line), LineEvent::SetColor(color)) => {
                line.style.color = color;
                (Self::Drawing(line), smallvec![LineEffect::RedrawActiveLine])
            }
        }
    }
}

fn record(line: &mut ActiveLine, point: DataPoint) -> LineEffects {
    if !line.region.contains(point) {
        trace!(x = point.x, y = point.y, "ignoring pointer outside watch region");
        return SmallVec::new();
    }
    line.buffer.push(point);
    smallvec![LineEffect::RedrawActiveLine]
}

fn freeze(line: ActiveLine, at: DateTime<Utc>) -> LineEffects {
    let mut effects: LineEffects =
        smallvec![LineEffect::DetachLineCapture, LineEffect::AttachDefaultDrag];
    if !line.buffer.is_empty() {
        effects.push(LineEffect::FreezeLine(LineSession {
            points: line.buffer,
            style: line.style,
            committed_at: Some(at),
        }));
    }
    effects
}

/// Session-level owner of the line state machine and the frozen lines.
#[derive(Debug, Clone, Default)]
pub struct LineSessionManager {
    state: LineDrawState,
    completed: Vec<LineSession>,
}

impl LineSessionManager {
    #[must_use]
    pub fn state(&self) -> &LineDrawState {
        &self.state
    }

    #[must_use]
    pub fn completed(&self) -> &[LineSession] {
        &self.completed
    }

    /// Whether the default single-line drag handler is attached.
    #[must_use]
    pub fn default_drag_enabled(&self) -> bool {
        !self.state.is_drawing()
    }

    /// Runs one transition, applies the collection effects and returns every
    /// effect for the host adapter.
    pub fn handle(&mut self, event: LineEvent) -> LineEffects {
        let (next, effects) = std::mem::take(&mut self.state).apply(event);
        self.state = next;
        for effect in &effects {
            match effect {
                LineEffect::FreezeLine(line) => {
                    debug!(
                        line_index = self.completed.len(),
                        points_len = line.points.len(),
                        "froze user line"
                    );
                    self.completed.push(line.clone());
                }
                LineEffect::DiscardFrozenLines => {
                    debug!(discarded = self.completed.len(), "discarded frozen lines");
                    self.completed.clear();
                }
                _ => {}
            }
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{LineDrawState, LineEffect, LineEvent, LineStyle, ToggleContext, WatchRegion};
    use crate::core::DataPoint;

    fn toggle() -> LineEvent {
        LineEvent::Toggle(ToggleContext {
            style: LineStyle::default(),
            region: WatchRegion::new((0.0, 10.0), (0.0, 10.0)),
            at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    #[test]
    fn idle_pointer_events_are_no_ops() {
        let (state, effects) =
            LineDrawState::Idle.apply(LineEvent::PointerDown(DataPoint::new(1.0, 1.0)));
        assert_eq!(state, LineDrawState::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn toggling_an_empty_line_freezes_nothing() {
        let (state, _) = LineDrawState::Idle.apply(toggle());
        let (state, effects) = state.apply(toggle());
        assert_eq!(state, LineDrawState::Idle);
        assert_eq!(
            effects.as_slice(),
            &[LineEffect::DetachLineCapture, LineEffect::AttachDefaultDrag]
        );
    }

    #[test]
    fn moves_without_pointer_down_are_not_recorded() {
        let (state, _) = LineDrawState::Idle.apply(toggle());
        let (state, effects) = state.apply(LineEvent::PointerMove(DataPoint::new(1.0, 1.0)));
        assert!(effects.is_empty());
        assert!(state.active_line().expect("drawing").points().is_empty());
    }
}
