//! Benchmark variant definition and the sequential sweep loop.

use std::path::PathBuf;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aggregate::mean_seconds;
use crate::error::BenchError;
use crate::executor::{FluxOperation, TimedExecutor, DEFAULT_REPETITIONS};
use crate::field::SyntheticField;
use crate::params::{ParameterSpaceBuilder, SweepAxes};
use crate::region::RegionSpec;
use crate::table::{ResultTable, TableSchema};

/// Seed for every variant's generator unless overridden.
pub const DEFAULT_SEED: u64 = 11256;

/// `(height, width)` of the synthetic field.
pub const DEFAULT_FIELD_SHAPE: (usize, usize) = (512, 512);

/// Background level added to the unit normal noise.
pub const DEFAULT_OFFSET: f64 = 10.0;

/// Where the N regions of a point are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// N copies of the same position.
    Repeated { x: f64, y: f64 },
    /// N positions drawn uniformly over the field from the run's generator.
    Uniform,
}

impl Placement {
    fn positions<R: Rng + ?Sized>(
        &self,
        count: usize,
        (height, width): (usize, usize),
        rng: &mut R,
    ) -> Vec<(f64, f64)> {
        match *self {
            Placement::Repeated { x, y } => vec![(x, y); count],
            Placement::Uniform => {
                // All ys first, then all xs
                let ys: Vec<f64> = (0..count)
                    .map(|_| height as f64 * rng.gen::<f64>())
                    .collect();
                let xs: Vec<f64> = (0..count).map(|_| width as f64 * rng.gen::<f64>()).collect();
                xs.into_iter().zip(ys).collect()
            }
        }
    }
}

/// Whether to draw a progress bar while sweeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Bar,
    Hidden,
}

/// A complete, compiled-in benchmark definition.
#[derive(Debug, Clone)]
pub struct BenchmarkVariant {
    pub name: String,
    /// File name of the result table under the crate's `results/` directory.
    pub output_file: String,
    pub schema: TableSchema,
    pub seed: u64,
    pub field_shape: (usize, usize),
    pub offset: f64,
    pub repetitions: usize,
    pub axes: SweepAxes,
    pub placement: Placement,
}

impl BenchmarkVariant {
    /// Variant with the default seed, field and repetition count.
    pub fn new(
        name: &str,
        output_file: &str,
        schema: TableSchema,
        axes: SweepAxes,
        placement: Placement,
    ) -> Self {
        Self {
            name: name.to_string(),
            output_file: output_file.to_string(),
            schema,
            seed: DEFAULT_SEED,
            field_shape: DEFAULT_FIELD_SHAPE,
            offset: DEFAULT_OFFSET,
            repetitions: DEFAULT_REPETITIONS,
            axes,
            placement,
        }
    }

    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_field_shape(mut self, field_shape: (usize, usize)) -> Self {
        self.field_shape = field_shape;
        self
    }

    /// Fixed location of this variant's result table.
    pub fn output_path(&self) -> PathBuf {
        results_dir().join(&self.output_file)
    }
}

/// Directory result tables are written to, inside this crate.
pub fn results_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("results")
}

/// Run every point of `variant` against `op` and collect the results.
///
/// Points are processed one at a time: regions built, all repetitions timed,
/// mean taken, row appended. The field is generated once, first, from a
/// generator seeded with the variant's seed; uniform placements continue to
/// draw from that same generator.
///
/// # Errors
///
/// Any failure aborts the sweep; no partial table is returned.
pub fn run_variant<O: FluxOperation + ?Sized>(
    variant: &BenchmarkVariant,
    op: &O,
    progress: Progress,
) -> Result<ResultTable, BenchError> {
    let executor = TimedExecutor::new(variant.repetitions)?;
    let space = ParameterSpaceBuilder::new(variant.axes.clone())?;

    let mut rng = StdRng::seed_from_u64(variant.seed);
    let field = SyntheticField::generate(&mut rng, variant.field_shape, variant.offset)?;

    let total = space.len();
    info!(
        "Running '{}': {} points, {} repetitions, {}x{} field, seed {}",
        variant.name,
        total,
        executor.repetitions(),
        variant.field_shape.0,
        variant.field_shape.1,
        variant.seed
    );

    let bar = match progress {
        Progress::Bar => {
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("=>-"));
            }
            bar.set_message(variant.name.clone());
            bar
        }
        Progress::Hidden => ProgressBar::hidden(),
    };

    let sweep_start = Instant::now();
    let mut table = ResultTable::new(variant.schema);

    for point in space.points() {
        let positions = variant
            .placement
            .positions(point.count(), field.dim(), &mut rng);
        let region = RegionSpec::new(point.kind(), point.params().to_vec(), positions)?;

        let samples = executor.execute(op, &field, &region, point.method())?;
        let time = mean_seconds(&samples)?;
        debug!(
            "N={} size={:?} {} {} -> {:.6e}s",
            point.count(),
            point.size(),
            point.kind(),
            point.method(),
            time
        );

        table.push(point, time)?;
        bar.inc(1);
    }

    bar.finish_with_message(format!("{} complete", variant.name));
    info!(
        "Finished '{}': {} rows in {:.2}s",
        variant.name,
        table.len(),
        sweep_start.elapsed().as_secs_f64()
    );

    Ok(table)
}
