//! Readers for the text inputs of the sketching pipeline.
//!
//! - **FASTA files**: sequences to sample references from or to sketch
//! - **Alphabet files**: symbols for randomly generated references
//!
//! ## Example
//!
//! ```rust,no_run
//! use subseq_sketch::parsing::fasta::{open_fasta, read_sequences};
//! use std::path::Path;
//!
//! // Collect every sequence of a file
//! let sequences = read_sequences(Path::new("input.fa")).unwrap();
//!
//! // Or stream them one record at a time
//! for sequence in open_fasta(Path::new("input.fa.gz")).unwrap() {
//!     println!("{} bases", sequence.unwrap().len());
//! }
//! ```

pub mod alphabet;
pub mod fasta;

pub use fasta::ParseError;
