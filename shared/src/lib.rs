//! Shared components for the aperture photometry benchmarks.
//!
//! Holds the photometry operation under test, the synthetic noise generators
//! that feed it, and the small numeric helpers the sweep harness builds on.

pub mod algo;
pub mod image_proc;
pub mod range_arg;
