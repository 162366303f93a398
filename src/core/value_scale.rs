use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::LinearScale;
use crate::error::{DrawError, DrawResult};

/// Transform applied to y-values before the affine render mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ValueScaleMode {
    /// Uniform spacing in raw units.
    #[default]
    Linear,
    /// Uniform spacing in log units (all values must be > 0).
    ///
    /// The base only affects tick placement: logarithms of any base are
    /// proportional, so the mapping itself is base-independent.
    Log { base: f64 },
}

impl ValueScaleMode {
    /// Natural-log mode.
    #[must_use]
    pub fn natural_log() -> Self {
        Self::Log {
            base: std::f64::consts::E,
        }
    }

    /// Resolves the `linear` / `log_base` configuration pair.
    pub fn from_config(linear: bool, log_base: Option<f64>) -> DrawResult<Self> {
        if linear {
            return Ok(Self::Linear);
        }
        let mode = match log_base {
            Some(base) => Self::Log { base },
            None => Self::natural_log(),
        };
        mode.validate()
    }

    fn validate(self) -> DrawResult<Self> {
        if let Self::Log { base } = self {
            if !base.is_finite() || base <= 0.0 || base == 1.0 {
                return Err(DrawError::Domain(format!(
                    "log base must be finite, > 0 and != 1 (got {base})"
                )));
            }
        }
        Ok(self)
    }
}

/// Y axis model mapped onto an inverted render axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    linear: LinearScale,
    domain_start: f64,
    domain_end: f64,
    mode: ValueScaleMode,
}

impl ValueScale {
    /// Creates a scale from an explicit domain, mapping `domain_start` to
    /// `height` and `domain_end` to `0`.
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        mode: ValueScaleMode,
        height: f64,
    ) -> DrawResult<Self> {
        let mode = mode.validate()?;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(DrawError::domain(
                "value domain must be finite and non-zero",
            ));
        }
        if domain_start > domain_end {
            return Err(DrawError::Domain(format!(
                "value domain is inverted: [{domain_start}, {domain_end}]"
            )));
        }

        let transformed_start = to_scale_domain(domain_start, mode)?;
        let transformed_end = to_scale_domain(domain_end, mode)?;
        let linear = LinearScale::with_range(transformed_start, transformed_end, height, 0.0)?;
        Ok(Self {
            linear,
            domain_start,
            domain_end,
            mode,
        })
    }

    /// Creates a scale from a computed `(min, max)` extent, widening a flat
    /// extent so a constant series stays drawable.
    pub fn from_extent(
        min: f64,
        max: f64,
        mode: ValueScaleMode,
        height: f64,
    ) -> DrawResult<Self> {
        if min != max {
            return Self::new(min, max, mode, height);
        }
        let (start, end) = match mode {
            ValueScaleMode::Linear => (min - 0.5, max + 0.5),
            ValueScaleMode::Log { base } => {
                let factor = base.sqrt();
                (min / factor, max * factor)
            }
        };
        warn!(value = min, start, end, "widened flat value extent");
        Self::new(start, end, mode, height)
    }

    /// Returns the raw domain kept by the scale.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn mode(self) -> ValueScaleMode {
        self.mode
    }

    /// Rebuilds the scale for a new render height, domain untouched.
    pub fn with_height(self, height: f64) -> DrawResult<Self> {
        Ok(Self {
            linear: self.linear.with_output_range(height, 0.0)?,
            ..self
        })
    }

    pub fn value_to_pixel(self, value: f64) -> DrawResult<f64> {
        self.linear.map(to_scale_domain(value, self.mode)?)
    }

    pub fn pixel_to_value(self, pixel: f64) -> DrawResult<f64> {
        from_scale_domain(self.linear.invert(pixel)?, self.mode)
    }

    /// Builds axis tick values in raw units.
    pub fn ticks(self, tick_count: usize) -> DrawResult<Vec<f64>> {
        match self.mode {
            ValueScaleMode::Linear => {
                Ok(LinearScale::new(self.domain_start, self.domain_end)?.ticks(tick_count))
            }
            ValueScaleMode::Log { base } => {
                let ticks = log_ladder_ticks(self.domain_start, self.domain_end, base)?;
                Ok(evenly_sample_ticks(ticks, tick_count))
            }
        }
    }
}

/// Maps raw values into the internal scale domain selected by `mode`.
fn to_scale_domain(value: f64, mode: ValueScaleMode) -> DrawResult<f64> {
    if !value.is_finite() {
        return Err(DrawError::InvalidData("value must be finite".to_owned()));
    }

    match mode {
        ValueScaleMode::Linear => Ok(value),
        ValueScaleMode::Log { .. } => {
            if value <= 0.0 {
                return Err(DrawError::Domain(format!(
                    "log value scale requires values > 0 (got {value})"
                )));
            }
            Ok(value.ln())
        }
    }
}

fn from_scale_domain(value: f64, mode: ValueScaleMode) -> DrawResult<f64> {
    match mode {
        ValueScaleMode::Linear => Ok(value),
        ValueScaleMode::Log { .. } => {
            let raw = value.exp();
            if !raw.is_finite() || raw <= 0.0 {
                return Err(DrawError::InvalidData(
                    "mapped log value must be finite and > 0".to_owned(),
                ));
            }
            Ok(raw)
        }
    }
}

fn log_ladder_ticks(start: f64, end: f64, base: f64) -> DrawResult<Vec<f64>> {
    if start <= 0.0 || end <= 0.0 {
        return Err(DrawError::domain("log value scale requires values > 0"));
    }

    let min = start.min(end);
    let max = start.max(end);
    let min_exp = min.log(base).floor() as i32;
    let max_exp = max.log(base).ceil() as i32;
    let multipliers: &[f64] = if approx_equal(base, 10.0) {
        &[1.0, 2.0, 5.0]
    } else {
        &[1.0]
    };

    let mut ticks = Vec::new();
    for exp in min_exp..=max_exp {
        let power = base.powi(exp);
        for multiplier in multipliers {
            let candidate = power * multiplier;
            if candidate >= min && candidate <= max {
                ticks.push(candidate);
            }
        }
    }

    if !ticks.iter().any(|value| approx_equal(*value, min)) {
        ticks.push(min);
    }
    if !ticks.iter().any(|value| approx_equal(*value, max)) {
        ticks.push(max);
    }

    ticks.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
    ticks.dedup_by(|lhs, rhs| approx_equal(*lhs, *rhs));
    Ok(ticks)
}

fn evenly_sample_ticks(ticks: Vec<f64>, target: usize) -> Vec<f64> {
    if ticks.len() <= target {
        return ticks;
    }
    match target {
        0 => Vec::new(),
        1 => vec![ticks[0]],
        _ => {
            let last_index = ticks.len() - 1;
            let mut sampled: Vec<f64> = Vec::with_capacity(target);
            for step in 0..target {
                let ratio = (step as f64) / ((target - 1) as f64);
                let index = (ratio * (last_index as f64)).round() as usize;
                let value = ticks[index.min(last_index)];
                if sampled
                    .last()
                    .is_some_and(|prev| approx_equal(*prev, value))
                {
                    continue;
                }
                sampled.push(value);
            }
            sampled
        }
    }
}

fn approx_equal(lhs: f64, rhs: f64) -> bool {
    let scale = lhs.abs().max(rhs.abs()).max(1.0);
    (lhs - rhs).abs() <= scale * 1e-12
}
