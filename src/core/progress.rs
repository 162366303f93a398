use serde::{Deserialize, Serialize};

use crate::core::DrawableGrid;

/// Drawing progress derived from the active grid's fill state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressStatus {
    Unstarted,
    InProgress,
    Done,
}

impl ProgressStatus {
    #[must_use]
    pub fn is_done(self) -> bool {
        self == Self::Done
    }

    #[must_use]
    pub fn is_started(self) -> bool {
        self != Self::Unstarted
    }
}

/// Classifies the grid. Pure: equal grids always yield equal statuses.
#[must_use]
pub fn classify(grid: &DrawableGrid) -> ProgressStatus {
    let filled = grid.filled_count();
    if filled == grid.prefilled() {
        ProgressStatus::Unstarted
    } else if filled == grid.len() {
        ProgressStatus::Done
    } else {
        ProgressStatus::InProgress
    }
}

/// Share of user-drawable points already filled, in `[0, 1]`.
#[must_use]
pub fn fill_fraction(grid: &DrawableGrid) -> f64 {
    let drawable = grid.len() - grid.prefilled();
    if drawable == 0 {
        return 1.0;
    }
    let drawn = grid.filled_count().saturating_sub(grid.prefilled());
    (drawn as f64 / drawable as f64).clamp(0.0, 1.0)
}

/// Data-space x interval still open for drawing, `None` once done.
///
/// `domain_end` is the right edge of the visible x domain, used while a
/// continuation line is unstarted. `x_step_hint` pulls the band start one
/// step left of the first unfilled point so the last drawn segment stays
/// inside the band.
#[must_use]
pub fn draw_region(grid: &DrawableGrid, domain_end: f64, x_step_hint: f64) -> Option<(f64, f64)> {
    let points = grid.points();
    let first = points.first()?.x;
    let last = points.last()?.x;

    match classify(grid) {
        ProgressStatus::Done => None,
        ProgressStatus::Unstarted if grid.free_draw() => Some((first, last)),
        ProgressStatus::Unstarted => Some((first, domain_end.max(first))),
        ProgressStatus::InProgress => {
            let first_unset = points.iter().find(|point| !point.is_filled())?.x;
            Some((first_unset - x_step_hint, last))
        }
    }
}
