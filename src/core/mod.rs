//! Core data types for subsequence sketching.
//!
//! - [`ReferenceSet`]: the ordered reference subsequences that define matrix columns
//! - [`EmbeddingMatrix`]: integer scores of every sequence against every reference
//! - [`DistanceMatrix`]: pairwise cosine distances between two score matrices
//! - [`SketchKind`], [`MatchStrategy`]: naming and scoring options
//!
//! ## Tokens
//!
//! A token is a fixed-length run of bytes. Sequences, tokens and references are
//! opaque byte strings; nothing in this crate interprets the alphabet.
//!
//! | Term | Length |
//! |------|--------|
//! | token | `token_len` |
//! | reference | `num_tokens * token_len` |
//! | target | any |

pub mod matrix;
pub mod reference_set;
pub mod types;

pub use matrix::{DistanceMatrix, EmbeddingMatrix, MatrixError};
pub use reference_set::{ReferenceSet, ReferenceSetError};
pub use types::{MatchStrategy, SketchKind};
