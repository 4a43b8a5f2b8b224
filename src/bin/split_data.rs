//! Split a raw fertility-rate file into training, test and final-test tables
//!
//! Usage: cargo run --bin split_data -- --kind asfr
//!
//! Reads `<data-dir>/asfr/asfrVH.txt` (asfr) or `<data-dir>/asfr/asfrTR.txt`
//! (tri), writes the slices and `geos_key.json` into `<data-dir>`.
//! The data directory defaults to `ASFR_DATA_DIR`, then `data`.

use anyhow::{Context, Result};
use asfr_eval::{run_split, DatasetKind, SplitConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "split_data")]
#[command(about = "Split raw ASFR or tri-data files by calendar year", long_about = None)]
struct Cli {
    /// Dataset variant: 'asfr' (country year age rate) or 'tri' (country year age cohort rate)
    #[arg(long)]
    kind: DatasetKind,

    /// Root data directory
    #[arg(long, env = "ASFR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Raw input file, overriding <data-dir>/asfr/<default name>
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let mut config = match cli.data_dir {
        Some(dir) => SplitConfig::with_data_dir(cli.kind, dir),
        None => SplitConfig::from_env(cli.kind),
    };
    if let Some(input) = cli.input {
        config = config.with_input(input);
    }

    let summary = run_split(&config)
        .with_context(|| format!("splitting {}", config.input_path.display()))?;

    println!(
        "{} records ({} dropped) across {} geographies",
        summary.total_records, summary.dropped_records, summary.geographies
    );
    for (path, count) in &summary.slices {
        println!("  {:<50} {:>10}", path.display(), count);
    }
    println!("Geography key: {}", config.geo_key_path.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
