use crate::foundation::error::{SlitscanError, SlitscanResult};

/// Maps animation time to a column offset in the cyclic scan buffer.
///
/// One full cycle of `steps` columns spans `duration` time units. Offsets decrease as time
/// advances and wrap modulo `steps`; the column drawn at `t = 0` is the last one (`steps - 1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeMapper {
    steps: usize,
    duration: f64,
}

impl TimeMapper {
    /// Create a mapper for `steps` columns cycling every `duration` time units.
    pub fn new(steps: usize, duration: f64) -> SlitscanResult<Self> {
        if steps == 0 {
            return Err(SlitscanError::config("steps must be > 0"));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SlitscanError::config(format!(
                "duration must be finite and > 0, got {duration}"
            )));
        }
        Ok(Self { steps, duration })
    }

    /// Number of columns in one cycle.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time span of one full cycle.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Time span covered by a single column.
    pub fn column_interval(&self) -> f64 {
        self.duration / self.steps as f64
    }

    /// Column offset in `[0, steps)` for time `t`.
    ///
    /// `round((1 - t / duration) * steps - 1) mod steps`, rounding halves to even.
    pub fn offset(&self, t: f64) -> usize {
        let raw = ((1.0 - t / self.duration) * self.steps as f64 - 1.0).round_ties_even();
        wrap_offset(raw, self.steps)
    }

    /// Continuous (unrounded) counterpart of [`TimeMapper::offset`], reduced into `[0, steps)`.
    pub fn offset_f64(&self, t: f64) -> f64 {
        let raw = (1.0 - t / self.duration) * self.steps as f64 - 1.0;
        raw.rem_euclid(self.steps as f64)
    }
}

/// Reduce an integral float into `[0, steps)`; non-finite input maps to 0.
fn wrap_offset(raw: f64, steps: usize) -> usize {
    if !raw.is_finite() {
        return 0;
    }
    let m = raw.rem_euclid(steps as f64);
    // `rem_euclid` can return exactly `steps` for tiny negative inputs.
    let idx = m as usize;
    if idx >= steps { 0 } else { idx }
}

#[cfg(test)]
#[path = "../../tests/unit/scan/mapper.rs"]
mod tests;
