//! Numeric algorithms shared across the benchmarks.

pub mod stats;

pub use stats::mean;
