//! Reduction of repeated timing samples to a single value per point.

use shared::algo::stats::mean;

use crate::error::BenchError;
use crate::executor::TimingSample;

/// Arithmetic mean of the samples, in seconds.
///
/// An empty slice cannot come out of [`crate::executor::TimedExecutor`];
/// it is reported as [`BenchError::EmptySamples`] rather than a panic.
pub fn mean_seconds(samples: &[TimingSample]) -> Result<f64, BenchError> {
    if samples.is_empty() {
        return Err(BenchError::EmptySamples);
    }
    let seconds: Vec<f64> = samples.iter().map(TimingSample::seconds).collect();
    mean(&seconds).map_err(|_| BenchError::EmptySamples)
}
