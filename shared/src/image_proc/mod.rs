//! Image processing primitives for aperture photometry benchmarks.
//!
//! - **aperture_photometry**: flux sums over circular, elliptical and
//!   rectangular apertures with exact, center and subpixel weighting
//! - **noise**: seeded synthetic noise fields

pub mod aperture_photometry;
pub mod noise;

pub use aperture_photometry::{
    aperture_photometry, Aperture, ApertureShape, EvaluationMethod, PhotometryError,
};
pub use noise::{offset_standard_normal, NoiseError};
