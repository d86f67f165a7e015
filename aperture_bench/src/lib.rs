//! Timing sweeps for aperture photometry.
//!
//! Measures how the cost of aperture photometry scales with aperture count,
//! aperture size, shape and evaluation method. Each benchmark variant:
//!
//! 1. seeds its own generator and draws one synthetic field
//! 2. enumerates its parameter space, dropping unsupported combinations
//! 3. times the photometry call a fixed number of times per point
//! 4. reduces the samples to a mean and appends a row
//! 5. writes the finished table as CSV under `results/`
//!
//! Everything runs sequentially on one thread so that timings stay
//! comparable between points.

pub mod aggregate;
pub mod error;
pub mod executor;
pub mod field;
pub mod params;
pub mod region;
pub mod runner;
pub mod table;
pub mod variants;

pub use aggregate::mean_seconds;
pub use error::BenchError;
pub use executor::{FluxOperation, PhotometryOperation, TimedExecutor, TimingSample};
pub use field::SyntheticField;
pub use params::{is_supported, ParameterPoint, ParameterSpaceBuilder, ShapeAxis, SweepAxes};
pub use region::{RegionSpec, ShapeKind};
pub use runner::{run_variant, BenchmarkVariant, Placement, Progress};
pub use shared::image_proc::EvaluationMethod;
pub use table::{ResultRow, ResultTable, TableSchema};

use anyhow::{Context, Result};

/// Run a variant with the real photometry operation and persist its table.
///
/// Shared entry point of the benchmark binaries.
pub fn run_and_write(variant: &BenchmarkVariant) -> Result<ResultTable> {
    let table = run_variant(variant, &PhotometryOperation, Progress::Bar)
        .with_context(|| format!("benchmark '{}' failed", variant.name))?;

    let path = variant.output_path();
    table
        .write_csv(&path)
        .with_context(|| format!("could not persist results for '{}'", variant.name))?;
    println!("Wrote {} rows to {}", table.len(), path.display());

    Ok(table)
}
