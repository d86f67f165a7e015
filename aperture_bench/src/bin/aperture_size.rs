//! Exact photometry of a single aperture as its radius grows.
//!
//! Runs two variants back to back, each with its own seeded generator:
//! - circle of radius r -> `results/aperture_size.csv`
//! - ellipse (r, r, theta = 20) -> `results/aperture_size-ellipse.csv`
//!
//! Both tables have columns `r,time`; each row is the mean of 5 timed calls.
//!
//! Usage:
//! ```
//! cargo run --release --bin aperture_size
//! ```

use anyhow::Result;
use aperture_bench::{run_and_write, variants};

fn main() -> Result<()> {
    env_logger::init();

    for variant in [
        variants::aperture_size_circle()?,
        variants::aperture_size_ellipse()?,
    ] {
        run_and_write(&variant)?;
    }
    Ok(())
}
