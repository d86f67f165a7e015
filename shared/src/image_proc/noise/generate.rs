//! Noise field generation for synthetic test images.
//!
//! All generators draw from a caller-supplied random number generator so that
//! several independent runs in one process each keep their own reproducible
//! sequence. Samples are drawn in row-major order from a single generator;
//! the same seed yields a bit-identical field.

use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use thiserror::Error;

/// Errors from noise field generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoiseError {
    #[error("invalid noise parameters: {0}")]
    InvalidParameters(String),
}

fn check_size((height, width): (usize, usize)) -> Result<(), NoiseError> {
    if height == 0 || width == 0 {
        return Err(NoiseError::InvalidParameters(format!(
            "field dimensions must be non-zero, got {height}x{width}"
        )));
    }
    Ok(())
}

/// Generate a standard normal field shifted by a constant background level.
///
/// Each pixel is `z + offset` with `z ~ N(0, 1)`.
pub fn offset_standard_normal<R: Rng + ?Sized>(
    rng: &mut R,
    size: (usize, usize),
    offset: f64,
) -> Result<Array2<f64>, NoiseError> {
    check_size(size)?;
    if !offset.is_finite() {
        return Err(NoiseError::InvalidParameters(format!(
            "background offset must be finite, got {offset}"
        )));
    }
    Ok(Array2::from_shape_fn(size, |_| {
        let z: f64 = StandardNormal.sample(rng);
        z + offset
    }))
}
