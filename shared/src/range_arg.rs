//! Inclusive numeric ranges for parameter sweeps.

use std::fmt;

use thiserror::Error;

/// Errors from sweep range expansion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("step size cannot be zero")]
    ZeroStep,

    #[error("invalid range: stop ({stop}) and start ({start}) disagree with step ({step})")]
    Direction { start: f64, stop: f64, step: f64 },

    #[error("range bounds must be finite: {0}")]
    NonFinite(String),
}

/// Parameter sweep range `start:stop:step` with an inclusive stop.
///
/// Values are computed as `start + i * step` rather than by repeated
/// addition, so long sweeps land on the same values every run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    start: f64,
    stop: f64,
    step: f64,
}

impl SweepRange {
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Expand into every value from start to stop (inclusive) by step.
    ///
    /// # Errors
    /// - [`RangeError::ZeroStep`] if step is zero
    /// - [`RangeError::Direction`] if the step points away from stop
    /// - [`RangeError::NonFinite`] if any bound is NaN or infinite
    pub fn values(&self) -> Result<Vec<f64>, RangeError> {
        let (start, stop, step) = (self.start, self.stop, self.step);

        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(RangeError::NonFinite(self.to_string()));
        }
        if step == 0.0 {
            return Err(RangeError::ZeroStep);
        }
        if (stop - start) * step < 0.0 {
            return Err(RangeError::Direction { start, stop, step });
        }

        let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
        Ok((0..count).map(|i| start + i as f64 * step).collect())
    }
}

impl fmt::Display for SweepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stop, self.step)
    }
}
