//! Exact photometry of N stacked r=3 circles at the field center.
//!
//! Writes `results/circle_apertures.csv` with columns `N,time`.
//!
//! Usage:
//! ```
//! cargo run --release --bin circle_apertures
//! ```

use anyhow::Result;
use aperture_bench::{run_and_write, variants};

fn main() -> Result<()> {
    env_logger::init();

    run_and_write(&variants::circle_apertures())?;
    Ok(())
}
