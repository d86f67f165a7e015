//! Every aperture shape under every evaluation method, for a few counts.
//!
//! Writes `results/apertures.csv` with columns `N,aperture,method,time`.
//! Exact evaluation is skipped for rectangular shapes.
//!
//! Usage:
//! ```
//! cargo run --release --bin apertures
//! ```

use anyhow::Result;
use aperture_bench::{run_and_write, variants};

fn main() -> Result<()> {
    env_logger::init();

    run_and_write(&variants::apertures())?;
    Ok(())
}
