//! Sketch and embed commands - score every sequence of FASTA files against the
//! reference subsequences and write one score matrix per input file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::cli::{save_matrix, OutputFormat};
use crate::codec::reference_set::load_reference_set;
use crate::core::types::{MatchStrategy, SketchKind};
use crate::matching::engine::{SketchConfig, SketchEngine};
use crate::parsing::fasta::read_sequences;
use crate::utils::validation::{matrix_output_path, validate_output_dir};

/// Arguments shared by the sketch and embed commands
#[derive(Args)]
pub struct SketchArgs {
    /// Reference subsequence file written by `init`
    #[arg(short, long, default_value = "subsequences.txt")]
    pub subsequences: PathBuf,

    /// FASTA files to score (plain or gzip compressed)
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// How reference tokens are located inside each sequence
    #[arg(long, default_value = "indexed")]
    pub strategy: MatchStrategy,

    /// Number of worker threads (default: one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Directory for the output files (default: next to each input)
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct SketchSummary {
    input: PathBuf,
    output: PathBuf,
    sequences: usize,
    embed_len: usize,
}

/// Execute the sketch or embed command
///
/// # Errors
///
/// Returns an error if the reference file or an input cannot be read, or if an
/// output cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(
    args: SketchArgs,
    kind: SketchKind,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker threads")?;
    }

    if let Some(dir) = &args.output_dir {
        validate_output_dir(dir)?;
    }

    let references = load_reference_set(&args.subsequences).with_context(|| {
        format!(
            "Failed to load subsequences from {}",
            args.subsequences.display()
        )
    })?;
    info!(
        "Loaded {} subsequence(s), num_tokens: {}, token_len: {}",
        references.len(),
        references.num_tokens(),
        references.token_len()
    );

    let engine = SketchEngine::new(
        &references,
        SketchConfig {
            strategy: args.strategy,
        },
    );

    let mut summaries = Vec::with_capacity(args.input.len());
    for input in &args.input {
        let sequences = read_sequences(input)
            .with_context(|| format!("Failed to read sequences from {}", input.display()))?;
        if verbose {
            eprintln!(
                "{} {} sequence(s) in {}",
                kind.label(),
                sequences.len(),
                input.display()
            );
        }

        let matrix = engine.compute(&sequences);
        let output = matrix_output_path(input, kind, &references, args.output_dir.as_deref())?;
        save_matrix(&output, &matrix, false)?;
        info!(
            "Finished {} sequence(s), {} wrote to {}",
            matrix.rows(),
            kind,
            output.display()
        );

        summaries.push(SketchSummary {
            input: input.clone(),
            output,
            sequences: matrix.rows(),
            embed_len: matrix.embed_len(),
        });
    }

    match format {
        OutputFormat::Text => {
            for summary in &summaries {
                println!("{}", summary.output.display());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Tsv => {
            println!("input\toutput\tsequences\tembed_len");
            for s in &summaries {
                println!(
                    "{}\t{}\t{}\t{}",
                    s.input.display(),
                    s.output.display(),
                    s.sequences,
                    s.embed_len
                );
            }
        }
    }

    Ok(())
}
