//! Subsequence scoring, score matrices and distances.
//!
//! - [`matcher`]: longest in-order token prefix of a reference inside a target
//! - [`SketchEngine`]: scores every target against every reference in parallel
//! - [`cosine_distance`]: pairwise cosine distance between two score matrices
//!
//! ## Scoring
//!
//! A reference of `k` tokens scores `m` against a target when its first `m`
//! tokens occur in the target at increasing positions and token `m + 1` does
//! not occur after the `m`-th match. Scores therefore lie in `[0, k]`.
//!
//! ## Example
//!
//! ```rust
//! use subseq_sketch::core::ReferenceSet;
//! use subseq_sketch::matching::{cosine_distance, SketchConfig, SketchEngine};
//!
//! let mut references = ReferenceSet::new(3, 2).unwrap();
//! references.push(b"ACGTAC".to_vec()).unwrap();
//! references.push(b"GGTTAA".to_vec()).unwrap();
//!
//! let engine = SketchEngine::new(&references, SketchConfig::default());
//! let sketches = engine.compute(&["ACGTACGT", "GGCCTTAA"]);
//! assert_eq!(sketches.row(0), &[3, 0]);
//!
//! let distances = cosine_distance(&sketches, &sketches).unwrap();
//! assert_eq!(distances.get(0, 0), Some(0.0));
//! ```

pub mod distance;
pub mod engine;
pub mod matcher;

pub use distance::{cosine_distance, DistanceError, ZERO_THRESHOLD};
pub use engine::{SketchConfig, SketchEngine};
pub use matcher::{score, IndexedMatcher, LinearMatcher, TokenMatcher};
