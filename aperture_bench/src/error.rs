//! Error type for the benchmark harness.

use std::path::PathBuf;

use shared::image_proc::{NoiseError, PhotometryError};
use shared::range_arg::RangeError;
use thiserror::Error;

use crate::region::ShapeKind;
use crate::table::TableSchema;

/// Errors that abort a benchmark run.
///
/// Unsupported shape/method combinations never show up here; they are
/// filtered out of the parameter space by [`crate::params::is_supported`].
#[derive(Error, Debug)]
pub enum BenchError {
    /// Geometry parameter list does not match the shape's arity.
    #[error("{kind} takes {expected} geometry parameters, got {got}")]
    ArityMismatch {
        kind: ShapeKind,
        expected: usize,
        got: usize,
    },

    #[error("{kind} derives its geometry from a size, but the sweep has no size axis")]
    MissingSizeAxis { kind: ShapeKind },

    #[error("repetition count must be at least 1")]
    ZeroRepetitions,

    #[error("cannot aggregate an empty sample set")]
    EmptySamples,

    /// A row is missing a value the table schema needs.
    #[error("parameter point has no {column} value required by the {schema:?} schema")]
    SchemaMismatch {
        schema: TableSchema,
        column: &'static str,
    },

    #[error("synthetic field generation failed: {0}")]
    Field(#[from] NoiseError),

    #[error("invalid sweep range: {0}")]
    Range(#[from] RangeError),

    /// The photometry operation failed during a timed repetition.
    #[error("photometry execution failed: {0}")]
    Execution(#[from] PhotometryError),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write results to {}: {source}", path.display())]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
