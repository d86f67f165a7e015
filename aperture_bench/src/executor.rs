//! Repeated timing of the photometry operation.

use std::hint::black_box;
use std::time::{Duration, Instant};

use ndarray::ArrayView2;
use shared::image_proc::{aperture_photometry, Aperture, EvaluationMethod, PhotometryError};

use crate::error::BenchError;
use crate::field::SyntheticField;
use crate::region::RegionSpec;

/// Repetitions per point when a variant does not say otherwise.
pub const DEFAULT_REPETITIONS: usize = 5;

/// The flux aggregation operation under measurement.
///
/// Implementations return one value per aperture position. The executor
/// only times the call and discards the values.
pub trait FluxOperation {
    fn aggregate(
        &self,
        field: ArrayView2<f64>,
        aperture: &Aperture,
        method: EvaluationMethod,
    ) -> Result<Vec<f64>, PhotometryError>;
}

/// [`FluxOperation`] backed by [`shared::image_proc::aperture_photometry`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotometryOperation;

impl FluxOperation for PhotometryOperation {
    fn aggregate(
        &self,
        field: ArrayView2<f64>,
        aperture: &Aperture,
        method: EvaluationMethod,
    ) -> Result<Vec<f64>, PhotometryError> {
        aperture_photometry(&field, aperture, method)
    }
}

/// Wall-clock duration of a single call to the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimingSample(Duration);

impl TimingSample {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub fn seconds(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

/// Runs the operation a fixed number of times, timing each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedExecutor {
    repetitions: usize,
}

impl Default for TimedExecutor {
    fn default() -> Self {
        Self {
            repetitions: DEFAULT_REPETITIONS,
        }
    }
}

impl TimedExecutor {
    pub fn new(repetitions: usize) -> Result<Self, BenchError> {
        if repetitions == 0 {
            return Err(BenchError::ZeroRepetitions);
        }
        Ok(Self { repetitions })
    }

    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    /// Time `repetitions` calls of `op` on `region` over `field`.
    ///
    /// The aperture is built before the first timer starts, and each sample
    /// spans exactly one call. No warm-up call is made, so the first sample
    /// may carry cold-cache cost.
    ///
    /// # Errors
    ///
    /// The first operation failure aborts the remaining repetitions and is
    /// returned as [`BenchError::Execution`].
    pub fn execute<O: FluxOperation + ?Sized>(
        &self,
        op: &O,
        field: &SyntheticField,
        region: &RegionSpec,
        method: EvaluationMethod,
    ) -> Result<Vec<TimingSample>, BenchError> {
        let aperture = region.to_aperture()?;
        let view = field.view();

        let mut samples = Vec::with_capacity(self.repetitions);
        for _ in 0..self.repetitions {
            let start = Instant::now();
            let result = op.aggregate(view.view(), &aperture, method);
            let elapsed = start.elapsed();

            black_box(result?);
            samples.push(TimingSample::new(elapsed));
        }
        Ok(samples)
    }
}
