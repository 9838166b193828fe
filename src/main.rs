//! # bmap
//!
//! Command-line generator for synthetic toroidal field maps.
//!
//! ## Usage
//!
//! ```bash
//! # Cylindrical barrel + endcap map with the reference geometry
//! bmap cylindrical
//!
//! # Cartesian box map as CSV, coarser grid
//! bmap cartesian map.csv --num-points-z 50 --num-points-xy 100
//!
//! # Inspect and check a map
//! bmap info cylindrical_grid_data.parquet
//! bmap validate cylindrical_grid_data.parquet
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
