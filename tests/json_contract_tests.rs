use draw_rs::api::{
    DrawSession, SESSION_EXPORT_JSON_SCHEMA_V1, SessionConfig, SessionExport,
};
use draw_rs::core::{DataPoint, ProgressStatus, Series, SeriesSet};

fn quarter_step_set() -> SeriesSet {
    SeriesSet::new(
        Series::new(
            (0..=80)
                .map(|i| {
                    let x = f64::from(i) * 0.25;
                    DataPoint::new(x, x * x / 10.0)
                })
                .collect(),
        )
        .expect("valid series"),
    )
}

fn finished_free_draw_session() -> DrawSession {
    let mut session =
        DrawSession::new(quarter_step_set(), SessionConfig::free_draw()).expect("session");
    for x in session.grid().x_values() {
        session.drag_to(x, 20.0 - x / 2.0);
    }
    assert_eq!(session.status(), ProgressStatus::Done);
    session
}

#[test]
fn export_contract_round_trips_through_json() {
    let mut session = finished_free_draw_session();
    session.toggle_line_drawing();
    session.line_pointer_down(DataPoint::new(3.0, 4.0));
    session.line_pointer_move(DataPoint::new(4.0, 5.0));
    session.toggle_line_drawing();

    let export = session.export();
    let json = export.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {SESSION_EXPORT_JSON_SCHEMA_V1}")));

    let parsed = SessionExport::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, export);

    let bare = serde_json::to_string(&export).expect("bare json");
    assert_eq!(
        SessionExport::from_json_compat_str(&bare).expect("parse bare"),
        export
    );
}

#[test]
fn unknown_schema_version_is_rejected() {
    let export = finished_free_draw_session().export();
    let json = export
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replace("\"schema_version\": 1", "\"schema_version\": 99");
    assert!(SessionExport::from_json_compat_str(&json).is_err());
}

#[test]
fn drawn_line_seeds_an_identical_free_draw_grid() {
    let first = finished_free_draw_session();
    let drawn = first.export().drawn_series().expect("drawn series");
    assert_eq!(drawn.len(), first.grid().len());

    let second = DrawSession::new(SeriesSet::new(drawn), SessionConfig::free_draw())
        .expect("rebuilt session");
    assert_eq!(second.grid().x_values(), first.grid().x_values());
}

#[test]
fn unfinished_grid_exports_unset_points_as_null() {
    let session =
        DrawSession::new(quarter_step_set(), SessionConfig::continuation(10.0)).expect("session");
    let export = session.export();
    assert_eq!(export.status, ProgressStatus::Unstarted);
    assert_eq!(export.drawn_line[0].y, Some(10.0));
    assert_eq!(export.drawn_line[1].y, None);

    let json = export.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"y\": null"));
}

#[test]
fn text_export_lists_every_block() {
    let mut session = finished_free_draw_session();
    session.toggle_line_drawing();
    session.line_pointer_down(DataPoint::new(3.0, 4.0));
    session.toggle_line_drawing();

    let text = session.export().to_text();
    assert!(text.starts_with("# drawn_line status=Done\n0,20\n"));
    assert!(text.contains("# line 0 color=#4682b4 committed_at="));
    assert!(text.ends_with("3,4\n"));
}
