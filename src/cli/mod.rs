//! Command-line interface for subseq-sketch.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **init**: Generate the reference subsequence set
//! - **sketch** / **embed**: Score every sequence of FASTA files against the set
//! - **dist**: Pairwise cosine distances between two score matrices
//! - **info**: Print a score matrix
//! - **show**: Print a distance matrix or export it to `.npy`
//! - **merge**: Concatenate score matrices row-wise
//!
//! ## Usage
//!
//! ```text
//! # 100 random references of 5 tokens, 2 bytes each, over ACGT
//! subseq-sketch init -l 5 -t 2 -n 100 -o subsequences.txt
//!
//! # Sketch two read sets
//! subseq-sketch sketch -s subsequences.txt -i a.fa b.fa.gz
//!
//! # Distances between them, exported for NumPy
//! subseq-sketch dist -a a.n100.l5.t2.sss -b b.fa.n100.l5.t2.sss
//! subseq-sketch show -i dist.sss-dist --to-npy
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::codec::embedding;
use crate::core::matrix::EmbeddingMatrix;

pub mod dist;
pub mod info;
pub mod init;
pub mod merge;
pub mod show;
pub mod sketch;

#[derive(Parser)]
#[command(name = "subseq-sketch")]
#[command(version)]
#[command(about = "Subsequence-based sketches of sequences for fast distance estimation")]
#[command(
    long_about = "subseq-sketch projects every sequence onto a fixed-length integer vector.\n\nEach coordinate is the length of the longest prefix of a random reference subsequence whose tokens occur in order inside the sequence. Cosine distance between vectors approximates edit distance between sequences."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the reference subsequences
    Init(init::InitArgs),

    /// Sketch the sequences of FASTA files
    Sketch(sketch::SketchArgs),

    /// Embed the sequences of FASTA files (same as sketch, embedding file names)
    Embed(sketch::SketchArgs),

    /// Compute pairwise cosine distances between two score matrices
    Dist(dist::DistArgs),

    /// Print a score matrix
    Info(info::InfoArgs),

    /// Print a distance matrix or export it to NumPy
    Show(show::ShowArgs),

    /// Merge score matrices row-wise
    Merge(merge::MergeArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a score matrix in either file layout
pub(crate) fn load_matrix(path: &Path, legacy: bool) -> anyhow::Result<EmbeddingMatrix> {
    let matrix = if legacy {
        embedding::load_legacy(path)
    } else {
        embedding::load_embedding(path)
    };
    matrix.with_context(|| format!("Failed to load score matrix from {}", path.display()))
}

/// Save a score matrix in either file layout
pub(crate) fn save_matrix(
    path: &Path,
    matrix: &EmbeddingMatrix,
    legacy: bool,
) -> anyhow::Result<()> {
    let result = if legacy {
        embedding::save_legacy(path, matrix)
    } else {
        embedding::save_embedding(path, matrix)
    };
    result.with_context(|| format!("Failed to write score matrix to {}", path.display()))
}
