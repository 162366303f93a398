use draw_rs::core::{
    CoordinateMapper, DataPoint, GridBuilder, GridRequest, GridTuning, RenderPoint, Series,
    ValueScaleMode, Viewport, classify, nearest_index, snap_and_fill,
};
use proptest::prelude::*;

fn series_from(mut xs: Vec<f64>) -> Option<Series> {
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    if xs.len() < 2 {
        return None;
    }
    Series::new(xs.into_iter().map(|x| DataPoint::new(x, x * 0.5)).collect()).ok()
}

proptest! {
    #[test]
    fn built_grids_are_strictly_increasing_and_dense(
        xs in proptest::collection::vec(-1_000.0f64..1_000.0, 2..200),
        free_draw in any::<bool>(),
        start_fraction in 0.0f64..0.9,
    ) {
        let series = series_from(xs);
        prop_assume!(series.is_some());
        let series = series.expect("checked above");
        let (first, last) = series.x_extent();
        let total = last - first;
        let request = if free_draw {
            GridRequest::free_draw(None)
        } else {
            GridRequest::continuation(first + total * start_fraction, true)
        };

        let grid = GridBuilder::default().build(&series, &request).expect("grid build");
        let tuning = GridTuning::default();
        // Dedup may widen one gap by a threshold, and keeping the last point by another.
        let max_gap =
            total * (tuning.gap_threshold_fraction + 2.0 * tuning.dedup_threshold_fraction);

        for pair in grid.points().windows(2) {
            prop_assert!(pair[1].x > pair[0].x);
            prop_assert!(pair[1].x - pair[0].x <= max_gap + 1e-9);
        }
        prop_assert!(grid.len() <= series.len() + ((1.0 / tuning.gap_threshold_fraction) as usize + 1) * 2);
        prop_assert_eq!(grid.points()[grid.len() - 1].x, last);
    }

    #[test]
    fn snap_picks_a_nearest_editable_index(
        xs in proptest::collection::vec(0.0f64..100.0, 2..64),
        drag_x in -20.0f64..120.0,
    ) {
        let series = series_from(xs);
        prop_assume!(series.is_some());
        let series = series.expect("checked above");
        let grid = GridBuilder::default()
            .build(&series, &GridRequest::free_draw(None))
            .expect("grid build");

        let index = nearest_index(&grid, drag_x).expect("free-draw grid is editable");
        let chosen = (grid.points()[index].x - drag_x).abs();
        let best = grid
            .points()
            .iter()
            .map(|point| (point.x - drag_x).abs())
            .fold(f64::INFINITY, f64::min);
        prop_assert!(chosen <= best + 1e-12);
    }

    #[test]
    fn classification_depends_only_on_fill_state(
        xs in proptest::collection::vec(0.0f64..100.0, 2..64),
        drags in proptest::collection::vec(0.0f64..100.0, 0..32),
    ) {
        let series = series_from(xs);
        prop_assume!(series.is_some());
        let series = series.expect("checked above");
        let mut grid = GridBuilder::default()
            .build(&series, &GridRequest::free_draw(None))
            .expect("grid build");
        for x in drags {
            snap_and_fill(&mut grid, x, 1.0);
        }

        let copy = grid.clone();
        prop_assert_eq!(classify(&grid), classify(&grid));
        prop_assert_eq!(classify(&grid), classify(&copy));
        prop_assert_eq!(classify(&grid).is_done(), grid.filled_count() == grid.len());
    }

    #[test]
    fn mapper_round_trips_inside_the_domain(
        x in 0.0f64..50.0,
        y in 1.0f64..1_000.0,
        log in any::<bool>(),
    ) {
        let mode = if log { ValueScaleMode::Log { base: 10.0 } } else { ValueScaleMode::Linear };
        let mapper = CoordinateMapper::new((0.0, 50.0), (1.0, 1_000.0), mode, Viewport::new(640, 480))
            .expect("valid mapper");
        let render = mapper.to_render(DataPoint::new(x, y)).expect("to render");
        let back = mapper
            .to_data(RenderPoint::new(render.x, render.y))
            .expect("to data");
        prop_assert!((back.x - x).abs() <= 1e-9 * x.abs().max(1.0));
        prop_assert!((back.y - y).abs() <= 1e-9 * y.abs().max(1.0));
    }
}
