//! Info command - print the header and the values of a score matrix.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_matrix, OutputFormat};
use crate::core::matrix::EmbeddingMatrix;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Score matrix file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Input uses the per-record stream layout
    #[arg(long)]
    pub legacy: bool,
}

/// Execute the info command
///
/// # Errors
///
/// Returns an error if the input cannot be loaded.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: InfoArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let matrix = load_matrix(&args.input, args.legacy)?;

    match format {
        OutputFormat::Text => print_text(&matrix),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matrix)?),
        OutputFormat::Tsv => {
            for row in matrix.iter_rows() {
                println!("{}", join(row, "\t"));
            }
        }
    }

    Ok(())
}

fn print_text(matrix: &EmbeddingMatrix) {
    println!("Embedding dimension: {}", matrix.embed_len());
    println!("Max possible value: {}", matrix.max_val());
    println!("Number of rows: {}", matrix.rows());
    for row in matrix.iter_rows() {
        println!("{}", join(row, " "));
    }
}

fn join(row: &[i32], separator: &str) -> String {
    row.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}
