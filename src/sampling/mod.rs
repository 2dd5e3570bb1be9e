//! Generation of the reference subsequence set.
//!
//! Two modes are supported:
//!
//! - **Alphabet mode**: every byte of every reference is drawn uniformly from an
//!   alphabet, with replacement.
//! - **Sampling mode**: references are cut out of real sequences. Each sequence
//!   is split into `num_tokens` equal parts and one token is drawn from each.
//!
//! ## Example
//!
//! ```rust
//! use subseq_sketch::sampling::SubsequenceSampler;
//!
//! // 2 references of 3 tokens, 1 byte per token, reproducible
//! let mut sampler = SubsequenceSampler::seeded(3, 1, 42).unwrap();
//! let references = sampler.generate_from_alphabet(b"ACGT", 2).unwrap();
//! assert_eq!(references.len(), 2);
//! assert_eq!(references.subsequence_len(), 3);
//! ```

pub mod sampler;

pub use sampler::{SamplingError, SubsequenceSampler};

/// Alphabet used when no alphabet file is given
pub const DNA_ALPHABET: &[u8] = b"ACGT";
