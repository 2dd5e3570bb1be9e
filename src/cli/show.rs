//! Show command - print a distance matrix or export it as a NumPy array.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::OutputFormat;
use crate::codec::distance::load_distance;
use crate::codec::npy::save_npy;
use crate::utils::validation::npy_output_path;

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    /// Distance matrix file written by `dist`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write a `.npy` file instead of printing
    #[arg(short = 'p', long)]
    pub to_npy: bool,

    /// Output of `--to-npy` (default: the input path with `.npy` appended)
    #[arg(long, requires = "to_npy")]
    pub npy_output: Option<PathBuf>,
}

#[derive(Serialize)]
struct DistanceReport<'a> {
    rows: usize,
    cols: usize,
    values: Vec<&'a [f64]>,
}

/// Execute the show command
///
/// # Errors
///
/// Returns an error if the input cannot be loaded or the `.npy` file cannot be
/// written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ShowArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let distances = load_distance(&args.input)
        .with_context(|| format!("Failed to load distances from {}", args.input.display()))?;
    info!(
        "Loaded {}x{} distance matrix",
        distances.rows(),
        distances.cols()
    );

    if args.to_npy {
        let output = args
            .npy_output
            .clone()
            .unwrap_or_else(|| npy_output_path(&args.input));
        save_npy(&output, &distances)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        println!("Distance matrix wrote to the file: {}", output.display());
        return Ok(());
    }

    match format {
        OutputFormat::Text | OutputFormat::Tsv => {
            for row in distances.iter_rows() {
                let line = row
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\t");
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let report = DistanceReport {
                rows: distances.rows(),
                cols: distances.cols(),
                values: distances.iter_rows().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
