use std::cell::RefCell;
use std::rc::Rc;

use draw_rs::DrawError;
use draw_rs::api::{DrawSession, SessionConfig};
use draw_rs::core::{DataPoint, GridTuning, ProgressStatus, Series, SeriesSet, Viewport};
use draw_rs::extensions::{SessionContext, SessionEvent, SessionPlugin};

#[derive(Clone)]
struct RecordingPlugin {
    id: String,
    events: Rc<RefCell<Vec<(SessionEvent, SessionContext)>>>,
}

impl RecordingPlugin {
    fn new(
        id: impl Into<String>,
        events: Rc<RefCell<Vec<(SessionEvent, SessionContext)>>>,
    ) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl SessionPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: SessionEvent, context: SessionContext) {
        self.events.borrow_mut().push((event, context));
    }
}

fn event_kind(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::GridChanged { .. } => "grid",
        SessionEvent::StrokeEnded { .. } => "stroke_end",
        SessionEvent::LineStarted { .. } => "line_start",
        SessionEvent::LineUpdated { .. } => "line_update",
        SessionEvent::LineFrozen { .. } => "line_frozen",
        SessionEvent::LineColorChanged { .. } => "line_color",
        SessionEvent::SessionReset => "reset",
        SessionEvent::Resized { .. } => "resized",
    }
}

fn three_point_session() -> DrawSession {
    let series = Series::new(vec![
        DataPoint::new(0.0, 1.0),
        DataPoint::new(1.0, 2.0),
        DataPoint::new(2.0, 3.0),
    ])
    .expect("valid series");
    // Gap threshold of one unit keeps the grid at exactly the three source x-values.
    let config = SessionConfig::continuation(0.0).with_grid_tuning(GridTuning {
        gap_threshold_fraction: 0.5,
        ..GridTuning::default()
    });
    DrawSession::new(SeriesSet::new(series), config).expect("session")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut session = three_point_session();
    let events = Rc::new(RefCell::new(Vec::new()));
    session
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    session.drag_to(1.0, 5.0);
    session.end_drag();
    session.toggle_line_drawing();
    session.line_pointer_down(DataPoint::new(0.5, 1.5));
    session.toggle_line_drawing();
    session.resize(Viewport::new(640, 480)).expect("resize");
    session.reset().expect("reset");

    let kinds: Vec<&str> = events.borrow().iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "grid",
            "stroke_end",
            "line_start",
            "line_update",
            "line_frozen",
            "resized",
            "reset",
        ]
    );
}

#[test]
fn grid_changed_carries_the_fresh_status() {
    let mut session = three_point_session();
    let events = Rc::new(RefCell::new(Vec::new()));
    session
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    session.drag_to(1.0, 5.0);
    session.drag_to(2.0, 6.0);

    let recorded = events.borrow();
    assert_eq!(
        recorded[0].0,
        SessionEvent::GridChanged {
            index: 1,
            status: ProgressStatus::InProgress
        }
    );
    assert_eq!(
        recorded[1].0,
        SessionEvent::GridChanged {
            index: 2,
            status: ProgressStatus::Done
        }
    );
    assert_eq!(recorded[1].1.filled, 3);
    assert_eq!(recorded[1].1.total, 3);
}

#[test]
fn stroke_end_is_not_reported_while_a_line_is_drawn() {
    let mut session = three_point_session();
    let events = Rc::new(RefCell::new(Vec::new()));
    session.toggle_line_drawing();
    session
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    session.end_drag();
    assert!(events.borrow().is_empty());
}

#[test]
fn duplicate_or_empty_plugin_ids_are_rejected() {
    let mut session = three_point_session();
    let events = Rc::new(RefCell::new(Vec::new()));
    session
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    let duplicate =
        session.register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())));
    assert!(matches!(duplicate, Err(DrawError::InvalidData(_))));
    let empty = session.register_plugin(Box::new(RecordingPlugin::new("", events)));
    assert!(matches!(empty, Err(DrawError::InvalidData(_))));

    assert!(session.has_plugin("recorder"));
    assert!(session.unregister_plugin("recorder"));
    assert!(!session.unregister_plugin("recorder"));
    assert_eq!(session.plugin_count(), 0);
}
