//! # subseq-sketch
//!
//! A library for sketching sequences by their subsequence content.
//!
//! Edit distance between long sequences is expensive to compute for every pair.
//! `subseq-sketch` instead projects each sequence onto a fixed-length integer
//! vector against a shared set of random reference subsequences, and compares
//! the vectors with cosine distance.
//!
//! A reference is a run of `num_tokens` tokens of `token_len` bytes. Its score
//! in a sequence is the number of leading tokens that occur in that sequence in
//! order, not necessarily contiguously.
//!
//! ## Features
//!
//! - **Two reference modes**: random strings over an alphabet, or tokens sampled
//!   from real sequences
//! - **Parallel scoring**: score matrices are filled on a rayon pool
//! - **Two matching strategies**: token index with binary search, or linear scan
//! - **Compact binary formats**: score matrices, distance matrices and NumPy export
//!
//! ## Example
//!
//! ```rust
//! use subseq_sketch::{cosine_distance, SketchConfig, SketchEngine, SubsequenceSampler};
//!
//! // 64 references of 4 tokens, 2 bytes each, reproducible
//! let mut sampler = SubsequenceSampler::seeded(4, 2, 7).unwrap();
//! let references = sampler.generate_from_alphabet(b"ACGT", 64).unwrap();
//!
//! let engine = SketchEngine::new(&references, SketchConfig::default());
//! let sketches = engine.compute(&[b"ACGTTGCAACGTAGCT".to_vec(), b"TTGCAACGTAGCTACG".to_vec()]);
//! assert_eq!(sketches.embed_len(), 64);
//!
//! let distances = cosine_distance(&sketches, &sketches).unwrap();
//! assert_eq!((distances.rows(), distances.cols()), (2, 2));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Reference sets, score matrices and distance matrices
//! - [`sampling`]: Generation of the reference subsequences
//! - [`matching`]: Token matching, the sketching engine and cosine distance
//! - [`codec`]: File formats
//! - [`parsing`]: FASTA and alphabet readers
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod codec;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod sampling;
pub mod utils;

// Re-export commonly used types for convenience
pub use core::matrix::{DistanceMatrix, EmbeddingMatrix};
pub use core::reference_set::ReferenceSet;
pub use core::types::*;
pub use matching::distance::cosine_distance;
pub use matching::engine::{SketchConfig, SketchEngine};
pub use sampling::SubsequenceSampler;
