pub mod coordinate_mapper;
pub mod grid;
pub mod grid_builder;
pub mod line_series;
pub mod progress;
pub mod scale;
pub mod snap;
pub mod types;
pub mod value_scale;
pub mod windowing;

pub use coordinate_mapper::CoordinateMapper;
pub use grid::{DrawableGrid, GridPoint};
pub use grid_builder::{GridBuilder, GridRequest, GridTuning};
pub use line_series::{
    LineSegment, project_defined_segments, project_grid_segments, project_line_segments,
};
pub use progress::{ProgressStatus, classify, draw_region, fill_fraction};
pub use scale::LinearScale;
pub use snap::{nearest_index, snap_and_fill};
pub use types::{DataPoint, RenderPoint, Series, SeriesSet, Viewport};
pub use value_scale::{ValueScale, ValueScaleMode};
pub use windowing::{points_from, points_in_x_window, points_up_to};
