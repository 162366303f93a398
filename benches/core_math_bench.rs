use criterion::{Criterion, criterion_group, criterion_main};
use draw_rs::api::{DrawSession, SessionConfig};
use draw_rs::core::{
    CoordinateMapper, DataPoint, GridBuilder, GridRequest, RenderPoint, Series, SeriesSet,
    ValueScaleMode, Viewport, snap_and_fill,
};
use draw_rs::render::NullRenderer;
use std::hint::black_box;

fn sample_series(len: usize) -> Series {
    Series::new(
        (0..len)
            .map(|i| {
                let x = i as f64 * 0.01;
                DataPoint::new(x, 50.0 + x.sin() * 10.0)
            })
            .collect(),
    )
    .expect("valid generated series")
}

fn bench_mapper_round_trip(c: &mut Criterion) {
    let mapper = CoordinateMapper::new(
        (0.0, 10_000.0),
        (1.0, 1_000.0),
        ValueScaleMode::Log { base: 10.0 },
        Viewport::new(1920, 1080),
    )
    .expect("valid mapper");

    c.bench_function("mapper_round_trip_log", |b| {
        b.iter(|| {
            let px = mapper
                .to_render(black_box(DataPoint::new(4_321.123, 42.0)))
                .expect("to render");
            let _ = mapper
                .to_data(RenderPoint::new(px.x, px.y))
                .expect("to data");
        })
    });
}

fn bench_grid_build_10k(c: &mut Criterion) {
    let series = sample_series(10_000);
    let builder = GridBuilder::default();
    let request = GridRequest::continuation(50.0, true);

    c.bench_function("grid_build_10k", |b| {
        b.iter(|| {
            let _ = builder
                .build(black_box(&series), black_box(&request))
                .expect("grid build");
        })
    });
}

fn bench_snap_sweep(c: &mut Criterion) {
    let series = sample_series(10_000);
    let mut grid = GridBuilder::default()
        .build(&series, &GridRequest::free_draw(None))
        .expect("grid build");

    c.bench_function("snap_sweep_1k_samples", |b| {
        b.iter(|| {
            for i in 0..1_000 {
                let x = i as f64 * 0.1;
                let _ = snap_and_fill(black_box(&mut grid), black_box(x), black_box(1.0));
            }
        })
    });
}

fn bench_session_frame(c: &mut Criterion) {
    let config = SessionConfig::continuation(50.0).with_viewport(Viewport::new(1600, 900));
    let mut session =
        DrawSession::new(SeriesSet::new(sample_series(10_000)), config).expect("session");
    for i in 0..200 {
        let _ = session.drag_to(50.0 + i as f64 * 0.25, 55.0);
    }
    let mut renderer = NullRenderer::default();

    c.bench_function("session_render_frame", |b| {
        b.iter(|| {
            session
                .render(black_box(&mut renderer))
                .expect("render frame");
        })
    });
}

criterion_group!(
    benches,
    bench_mapper_round_trip,
    bench_grid_build_10k,
    bench_snap_sweep,
    bench_session_frame
);
criterion_main!(benches);
