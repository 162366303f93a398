use serde::{Deserialize, Serialize};

use crate::error::{DrawError, DrawResult};

/// Affine mapping between a finite domain and a render-space range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> DrawResult<Self> {
        Self::with_range(domain_start, domain_end, 0.0, 1.0)
    }

    pub fn with_range(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> DrawResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(DrawError::domain(
                "scale domain must be finite and non-zero",
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(DrawError::domain("scale range must be finite and non-zero"));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Returns a copy mapping onto a new range with the same domain.
    pub fn with_output_range(self, range_start: f64, range_end: f64) -> DrawResult<Self> {
        Self::with_range(self.domain_start, self.domain_end, range_start, range_end)
    }

    pub fn map(self, value: f64) -> DrawResult<f64> {
        if !value.is_finite() {
            return Err(DrawError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, output: f64) -> DrawResult<f64> {
        if !output.is_finite() {
            return Err(DrawError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (output - self.range_start) / (self.range_end - self.range_start);
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Evenly spaced domain values, both ends included.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        match tick_count {
            0 => Vec::new(),
            1 => vec![self.domain_start],
            _ => {
                let span = self.domain_end - self.domain_start;
                let denominator = (tick_count - 1) as f64;
                (0..tick_count)
                    .map(|index| self.domain_start + span * (index as f64) / denominator)
                    .collect()
            }
        }
    }
}
