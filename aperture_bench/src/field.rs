//! The synthetic image every point of a sweep is measured against.

use ndarray::{Array2, ArrayView2};
use rand::Rng;
use shared::image_proc::noise::offset_standard_normal;

use crate::error::BenchError;

/// Immutable 2-D field of standard normal noise on a constant background.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticField {
    data: Array2<f64>,
}

impl SyntheticField {
    /// Draw a `(height, width)` field of `N(0, 1) + offset` values from `rng`.
    ///
    /// The generator is advanced by exactly `height * width` draws, so any
    /// later use of the same generator stays reproducible.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        shape: (usize, usize),
        offset: f64,
    ) -> Result<Self, BenchError> {
        let data = offset_standard_normal(rng, shape, offset)?;
        Ok(Self { data })
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// `(height, width)`
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }
}
