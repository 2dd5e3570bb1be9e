//! Merge command - concatenate score matrices row-wise.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{load_matrix, save_matrix, OutputFormat};
use crate::core::matrix::EmbeddingMatrix;
use crate::core::types::SketchKind;

/// Arguments for the merge command
#[derive(Args)]
pub struct MergeArgs {
    /// Score matrices to merge, in output order
    #[arg(short, long, required = true, num_args = 2..)]
    pub input: Vec<PathBuf>,

    /// Output file (default: merged.sss, or merged.rssebd for embeddings)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Inputs and output use the per-record stream layout
    #[arg(long)]
    pub legacy: bool,

    /// Naming of the default output file
    #[arg(long, default_value = "sketch")]
    pub kind: SketchKind,
}

/// Execute the merge command
///
/// # Errors
///
/// Returns an error if an input cannot be loaded, the inputs have different
/// dimensions, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: MergeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.kind.default_merged_file()));

    let mut matrices = Vec::with_capacity(args.input.len());
    for path in &args.input {
        let matrix = load_matrix(path, args.legacy)?;
        if verbose {
            eprintln!("Loaded {} row(s) from {}", matrix.rows(), path.display());
        }
        matrices.push(matrix);
    }

    let merged = EmbeddingMatrix::merge(&matrices)
        .context("Cannot merge matrices with different dimensions")?;
    save_matrix(&output, &merged, args.legacy)?;
    info!(
        "Merged {} file(s) into {} row(s)",
        matrices.len(),
        merged.rows()
    );

    match format {
        OutputFormat::Text => println!(
            "Merged {} row(s) into {}",
            merged.rows(),
            output.display()
        ),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "output": output,
                "rows": merged.rows(),
                "embed_len": merged.embed_len(),
                "max_val": merged.max_val(),
            }))?
        ),
        OutputFormat::Tsv => {
            println!("output\trows\tembed_len\tmax_val");
            println!(
                "{}\t{}\t{}\t{}",
                output.display(),
                merged.rows(),
                merged.embed_len(),
                merged.max_val()
            );
        }
    }

    Ok(())
}
