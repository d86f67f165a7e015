//! Exact photometry of N r=10 circles scattered uniformly over the field.
//!
//! Positions come from the same seeded generator as the field, so reruns
//! place every aperture identically. Writes `results/num_apertures.csv` with
//! columns `N,time`.
//!
//! Usage:
//! ```
//! cargo run --release --bin num_apertures
//! ```

use anyhow::Result;
use aperture_bench::{run_and_write, variants};

fn main() -> Result<()> {
    env_logger::init();

    run_and_write(&variants::num_apertures())?;
    Ok(())
}
