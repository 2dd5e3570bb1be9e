use rayon::prelude::*;
use tracing::debug;

use crate::core::matrix::EmbeddingMatrix;
use crate::core::reference_set::ReferenceSet;
use crate::core::types::MatchStrategy;
use crate::matching::matcher::{IndexedMatcher, LinearMatcher, TokenMatcher};

/// Scores are bounded by `num_tokens`, which `ReferenceSet` keeps within `i32`
#[inline]
fn score_to_cell(score: usize) -> i32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    {
        score as i32
    }
}

/// Configuration for the sketching engine
#[derive(Debug, Clone, Default)]
pub struct SketchConfig {
    /// How reference tokens are located inside each target
    pub strategy: MatchStrategy,
}

/// Computes score matrices of target sequences against a reference set
pub struct SketchEngine<'a> {
    references: &'a ReferenceSet,
    config: SketchConfig,
}

impl<'a> SketchEngine<'a> {
    pub fn new(references: &'a ReferenceSet, config: SketchConfig) -> Self {
        Self { references, config }
    }

    #[must_use]
    pub fn references(&self) -> &ReferenceSet {
        self.references
    }

    /// Score every target against every reference.
    ///
    /// Cell `(i, j)` holds the score of reference `j` in target `i`. Cells are
    /// independent, so they are filled in parallel on the current rayon pool.
    #[must_use]
    pub fn compute<T>(&self, targets: &[T]) -> EmbeddingMatrix
    where
        T: AsRef<[u8]> + Sync,
    {
        let embed_len = self.references.len();
        let mut matrix =
            EmbeddingMatrix::zeros(targets.len(), embed_len, self.references.max_score());

        if targets.is_empty() || embed_len == 0 {
            return matrix;
        }

        debug!(
            "Scoring {} sequence(s) against {} reference(s) with {:?} matching",
            targets.len(),
            embed_len,
            self.config.strategy
        );

        match self.config.strategy {
            MatchStrategy::Indexed => self.fill_indexed(targets, matrix.values_mut()),
            MatchStrategy::Linear => self.fill_linear(targets, matrix.values_mut()),
        }

        matrix
    }

    /// One index per target, then the whole row from that index
    fn fill_indexed<T>(&self, targets: &[T], cells: &mut [i32])
    where
        T: AsRef<[u8]> + Sync,
    {
        let token_len = self.references.token_len();
        let references = self.references.as_slice();

        cells
            .par_chunks_mut(references.len())
            .zip(targets.par_iter())
            .for_each(|(row, target)| {
                let matcher = IndexedMatcher::new(target.as_ref(), token_len);
                for (cell, reference) in row.iter_mut().zip(references) {
                    *cell = score_to_cell(matcher.score(reference));
                }
            });
    }

    /// Every (target, reference) pair is its own work item
    fn fill_linear<T>(&self, targets: &[T], cells: &mut [i32])
    where
        T: AsRef<[u8]> + Sync,
    {
        let token_len = self.references.token_len();
        let references = self.references.as_slice();
        let embed_len = references.len();

        cells.par_iter_mut().enumerate().for_each(|(k, cell)| {
            let target = targets[k / embed_len].as_ref();
            let matcher = LinearMatcher::new(target, token_len);
            *cell = score_to_cell(matcher.score(&references[k % embed_len]));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_set(token_len: usize, subsequences: &[&str]) -> ReferenceSet {
        let num_tokens = subsequences[0].len() / token_len;
        let mut set = ReferenceSet::new(num_tokens, token_len).unwrap();
        for s in subsequences {
            set.push(s.as_bytes().to_vec()).unwrap();
        }
        set
    }

    #[test]
    fn test_compute_matrix_cells() {
        let refs = reference_set(2, &["ACGTAC", "TTTTTT", "GTACGT"]);
        let targets = vec![b"ACGTACGT".to_vec(), b"TTGG".to_vec()];

        let engine = SketchEngine::new(&refs, SketchConfig::default());
        let m = engine.compute(&targets);

        assert_eq!(m.rows(), 2);
        assert_eq!(m.embed_len(), 3);
        assert_eq!(m.max_val(), 3);
        assert_eq!(m.row(0), &[3, 0, 3]);
        assert_eq!(m.row(1), &[0, 1, 0]);
    }

    #[test]
    fn test_strategies_produce_identical_matrices() {
        let refs = reference_set(1, &["ACG", "TTA", "GGG", "CAT", "AAC"]);
        let targets = vec!["ACGTTAGC", "GATTACA", "", "CCCCC", "TGCATGCA"];

        let indexed = SketchEngine::new(
            &refs,
            SketchConfig {
                strategy: MatchStrategy::Indexed,
            },
        )
        .compute(&targets);
        let linear = SketchEngine::new(
            &refs,
            SketchConfig {
                strategy: MatchStrategy::Linear,
            },
        )
        .compute(&targets);

        assert_eq!(indexed, linear);
        assert_eq!(indexed.row(2), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_inputs() {
        let refs = reference_set(1, &["AC"]);
        let targets: Vec<Vec<u8>> = Vec::new();
        let m = SketchEngine::new(&refs, SketchConfig::default()).compute(&targets);
        assert_eq!(m.rows(), 0);
        assert_eq!(m.embed_len(), 1);

        let empty = ReferenceSet::new(2, 1).unwrap();
        let m = SketchEngine::new(&empty, SketchConfig::default()).compute(&["ACGT"]);
        assert_eq!(m.rows(), 1);
        assert_eq!(m.embed_len(), 0);
        assert_eq!(m.max_val(), 2);
    }
}
