//! Dist command - pairwise cosine distances between the rows of two score
//! matrices.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{load_matrix, OutputFormat};
use crate::codec::distance::save_distance;
use crate::core::types::SketchKind;
use crate::matching::distance::cosine_distance;

/// Arguments for the dist command
#[derive(Args)]
pub struct DistArgs {
    /// First score matrix (rows of the output)
    #[arg(short = 'a', long)]
    pub input1: PathBuf,

    /// Second score matrix (columns of the output)
    #[arg(short = 'b', long)]
    pub input2: PathBuf,

    /// Output file (default: dist.sss-dist, or dist.rssebd-dist for embeddings)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Inputs use the per-record stream layout
    #[arg(long)]
    pub legacy: bool,

    /// Naming of the default output file
    #[arg(long, default_value = "sketch")]
    pub kind: SketchKind,
}

/// Execute the dist command
///
/// # Errors
///
/// Returns an error if an input cannot be loaded, the two matrices have
/// different dimensions, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: DistArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.kind.default_distance_file()));

    let first = load_matrix(&args.input1, args.legacy)?;
    info!("Loaded {} row(s) from {}", first.rows(), args.input1.display());
    let second = load_matrix(&args.input2, args.legacy)?;
    info!("Loaded {} row(s) from {}", second.rows(), args.input2.display());

    if verbose {
        eprintln!("Computing pairwise {} distances...", args.kind.label());
    }
    let distances = cosine_distance(&first, &second).with_context(|| {
        format!(
            "Cannot compare {} with {}",
            args.input1.display(),
            args.input2.display()
        )
    })?;

    save_distance(&output, &distances)
        .with_context(|| format!("Failed to write distances to {}", output.display()))?;

    match format {
        OutputFormat::Text => println!(
            "{}x{} {} distance matrix wrote to file: {}",
            distances.rows(),
            distances.cols(),
            args.kind.label(),
            output.display()
        ),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "output": output,
                "rows": distances.rows(),
                "cols": distances.cols(),
            }))?
        ),
        OutputFormat::Tsv => {
            println!("output\trows\tcols");
            println!(
                "{}\t{}\t{}",
                output.display(),
                distances.rows(),
                distances.cols()
            );
        }
    }

    Ok(())
}
