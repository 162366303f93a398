use approx::assert_relative_eq;
use draw_rs::DrawError;
use draw_rs::core::{
    CoordinateMapper, DataPoint, RenderPoint, Series, ValueScaleMode, Viewport,
};

fn linear_mapper(viewport: Viewport) -> CoordinateMapper {
    CoordinateMapper::new((0.0, 10.0), (0.0, 100.0), ValueScaleMode::Linear, viewport)
        .expect("valid mapper")
}

#[test]
fn linear_mapping_inverts_the_y_axis() {
    let mapper = linear_mapper(Viewport::new(800, 500));

    let origin = mapper.to_render(DataPoint::new(0.0, 0.0)).expect("map");
    assert_relative_eq!(origin.x, 0.0);
    assert_relative_eq!(origin.y, 500.0);

    let mid = mapper.to_render(DataPoint::new(5.0, 50.0)).expect("map");
    assert_relative_eq!(mid.x, 400.0);
    assert_relative_eq!(mid.y, 250.0);

    let back = mapper.to_data(RenderPoint::new(400.0, 250.0)).expect("invert");
    assert_relative_eq!(back.x, 5.0);
    assert_relative_eq!(back.y, 50.0);
}

#[test]
fn log_mapping_spaces_decades_evenly() {
    let mapper = CoordinateMapper::new(
        (0.0, 1.0),
        (1.0, 100.0),
        ValueScaleMode::Log { base: 10.0 },
        Viewport::new(100, 400),
    )
    .expect("valid mapper");

    let ten = mapper.to_render(DataPoint::new(0.0, 10.0)).expect("map");
    assert_relative_eq!(ten.y, 200.0, epsilon = 1e-9);

    let back = mapper.to_data(RenderPoint::new(0.0, 100.0)).expect("invert");
    assert_relative_eq!(back.y, 10.0_f64.powf(1.5), max_relative = 1e-9);
}

#[test]
fn log_mapping_of_non_positive_value_fails() {
    let mapper = CoordinateMapper::new(
        (0.0, 1.0),
        (1.0, 100.0),
        ValueScaleMode::natural_log(),
        Viewport::new(100, 100),
    )
    .expect("valid mapper");
    assert!(matches!(
        mapper.to_render(DataPoint::new(0.5, 0.0)),
        Err(DrawError::Domain(_))
    ));
}

#[test]
fn log_mode_rejects_series_with_non_positive_y() {
    let series = Series::new(vec![DataPoint::new(0.0, 0.0), DataPoint::new(1.0, 5.0)])
        .expect("valid series");
    let err = CoordinateMapper::from_series(
        &series,
        None,
        Some((1.0, 10.0)),
        ValueScaleMode::Log { base: 10.0 },
        Viewport::default(),
    )
    .expect_err("y = 0 is not loggable");
    assert!(matches!(err, DrawError::Domain(_)));
}

#[test]
fn resize_keeps_domains_and_rescales_output() {
    let mapper = linear_mapper(Viewport::new(800, 500));
    let resized = mapper
        .with_viewport(Viewport::new(400, 200))
        .expect("resize");

    assert_eq!(resized.x_domain(), mapper.x_domain());
    assert_eq!(resized.y_domain(), mapper.y_domain());
    let mid = resized.to_render(DataPoint::new(5.0, 50.0)).expect("map");
    assert_relative_eq!(mid.x, 200.0);
    assert_relative_eq!(mid.y, 100.0);
}

#[test]
fn zero_sized_viewport_is_rejected() {
    let mapper = linear_mapper(Viewport::new(800, 500));
    assert!(matches!(
        mapper.with_viewport(Viewport::new(0, 200)),
        Err(DrawError::InvalidViewport { width: 0, height: 200 })
    ));
}

#[test]
fn domains_default_to_series_extent_and_widen_flat_y() {
    let series = Series::new(vec![DataPoint::new(2.0, 3.0), DataPoint::new(6.0, 3.0)])
        .expect("valid series");
    let mapper = CoordinateMapper::from_series(
        &series,
        None,
        None,
        ValueScaleMode::Linear,
        Viewport::default(),
    )
    .expect("valid mapper");

    assert_eq!(mapper.x_domain(), (2.0, 6.0));
    assert_eq!(mapper.y_domain(), (2.5, 3.5));
    assert!(mapper.contains(DataPoint::new(4.0, 3.0)));
    assert!(!mapper.contains(DataPoint::new(7.0, 3.0)));
}

#[test]
fn inverted_range_is_rejected() {
    let result =
        CoordinateMapper::new((5.0, 1.0), (0.0, 1.0), ValueScaleMode::Linear, Viewport::default());
    assert!(matches!(result, Err(DrawError::Domain(_))));
}

#[test]
fn axis_ticks_cover_both_domain_ends() {
    let mapper = CoordinateMapper::new(
        (0.0, 20.0),
        (1.0, 1_000.0),
        ValueScaleMode::Log { base: 10.0 },
        Viewport::default(),
    )
    .expect("valid mapper");

    assert_eq!(mapper.x_ticks(5), vec![0.0, 5.0, 10.0, 20.0 * 0.75, 20.0]);
    let y_ticks = mapper.y_ticks(20).expect("log ticks");
    assert_eq!(y_ticks.first(), Some(&1.0));
    assert_eq!(y_ticks.last(), Some(&1_000.0));
    assert!(y_ticks.contains(&100.0));
}
