//! Init command - generate the reference subsequence set.
//!
//! Without input files, every reference is drawn from an alphabet. With input
//! files, references are sampled from each of their sequences.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::codec::reference_set::save_reference_set;
use crate::core::reference_set::ReferenceSet;
use crate::parsing::alphabet::read_alphabet;
use crate::parsing::fasta::open_fasta;
use crate::sampling::{SubsequenceSampler, DNA_ALPHABET};

/// Arguments for the init command
#[derive(Args)]
pub struct InitArgs {
    /// Number of tokens in each subsequence
    #[arg(short = 'l', long = "length")]
    pub num_tokens: usize,

    /// Length of each token
    #[arg(short = 't', long = "token")]
    pub token_len: usize,

    /// Number of subsequences to generate (per input sequence when sampling)
    #[arg(short = 'n', long = "number")]
    pub number: usize,

    /// File whose first line is the alphabet (default: ACGT)
    #[arg(short, long, conflicts_with = "input")]
    pub alphabet: Option<PathBuf>,

    /// FASTA files to sample subsequences from
    #[arg(short, long, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Output file
    #[arg(short, long, default_value = "subsequences.txt")]
    pub output: PathBuf,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Serialize)]
struct InitSummary<'a> {
    output: &'a PathBuf,
    subsequences: usize,
    num_tokens: usize,
    token_len: usize,
}

/// Execute the init command
///
/// # Errors
///
/// Returns an error if an input cannot be read, a sequence is too short to
/// sample from, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: InitArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut sampler = match args.seed {
        Some(seed) => SubsequenceSampler::seeded(args.num_tokens, args.token_len, seed),
        None => SubsequenceSampler::from_entropy(args.num_tokens, args.token_len),
    }
    .context("Invalid subsequence parameters")?;

    if verbose {
        eprintln!(
            "Generating subsequences of {} tokens of length {}",
            args.num_tokens, args.token_len
        );
    }

    let set = if args.input.is_empty() {
        let alphabet = match &args.alphabet {
            Some(path) => read_alphabet(path)
                .with_context(|| format!("Could not read alphabet from {}", path.display()))?,
            None => DNA_ALPHABET.to_vec(),
        };
        info!("Using alphabet: {}", String::from_utf8_lossy(&alphabet));
        sampler.generate_from_alphabet(&alphabet, args.number)?
    } else {
        sample_inputs(&mut sampler, &args.input, args.number)?
    };

    save_reference_set(&args.output, &set)
        .with_context(|| format!("Failed to write subsequences to {}", args.output.display()))?;
    info!(
        "Generated {} subsequences, saved in {}",
        set.len(),
        args.output.display()
    );

    let summary = InitSummary {
        output: &args.output,
        subsequences: set.len(),
        num_tokens: set.num_tokens(),
        token_len: set.token_len(),
    };
    match format {
        OutputFormat::Text => println!(
            "Wrote {} subsequences to {}",
            summary.subsequences,
            summary.output.display()
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => {
            println!("output\tsubsequences\tnum_tokens\ttoken_len");
            println!(
                "{}\t{}\t{}\t{}",
                summary.output.display(),
                summary.subsequences,
                summary.num_tokens,
                summary.token_len
            );
        }
    }

    Ok(())
}

/// Sample `number` subsequences from every record of every input, streaming
/// the records one at a time
fn sample_inputs(
    sampler: &mut SubsequenceSampler<StdRng>,
    inputs: &[PathBuf],
    number: usize,
) -> anyhow::Result<ReferenceSet> {
    let mut set = sampler.empty_set()?;

    for path in inputs {
        let sequences = open_fasta(path)
            .with_context(|| format!("Failed to open FASTA file {}", path.display()))?;
        let mut count = 0usize;
        for sequence in sequences {
            let sequence =
                sequence.with_context(|| format!("Failed to read {}", path.display()))?;
            count += 1;
            sampler
                .sample_into(&mut set, &sequence, number)
                .with_context(|| format!("Sequence #{count} of {}", path.display()))?;
        }
        debug!("Sampled from {count} sequence(s) in {}", path.display());
    }

    Ok(set)
}
