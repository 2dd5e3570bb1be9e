//! Longest in-order token prefix of a reference found inside a target.
//!
//! Given a target `T` and a reference `R` cut into tokens `r0 r1 ... rk`, the
//! score is the largest `m` such that `r0 .. r(m-1)` occur in `T` at strictly
//! increasing start positions. Target tokens may be skipped between matches;
//! reference tokens may not. Matching stops at the first reference token that
//! cannot be placed after the previous one.
//!
//! Starting positions only have to increase, so consecutive matched tokens may
//! overlap in the target.

use std::collections::HashMap;

use crate::core::types::MatchStrategy;

/// Scores references against one fixed target.
pub trait TokenMatcher {
    /// Number of leading tokens of `reference` matched in order.
    ///
    /// `reference` is cut into `token_len` chunks; a trailing partial chunk is
    /// ignored.
    fn score(&self, reference: &[u8]) -> usize;
}

/// Token positions of one target, built once and reused for many references.
///
/// Borrows the target, so the index can never outlive the sequence it
/// describes.
#[derive(Debug)]
pub struct IndexedMatcher<'a> {
    token_len: usize,
    /// Start positions of every token, ascending
    index: HashMap<&'a [u8], Vec<usize>>,
}

impl<'a> IndexedMatcher<'a> {
    /// Index every `token_len` window of `target`.
    ///
    /// # Panics
    ///
    /// Panics if `token_len` is zero.
    #[must_use]
    pub fn new(target: &'a [u8], token_len: usize) -> Self {
        assert!(token_len > 0, "token length must be positive");

        let mut index: HashMap<&'a [u8], Vec<usize>> = HashMap::new();
        for (pos, window) in target.windows(token_len).enumerate() {
            index.entry(window).or_default().push(pos);
        }

        Self { token_len, index }
    }

    /// First start position `>= from` of `token`, if any
    fn find(&self, token: &[u8], from: usize) -> Option<usize> {
        let positions = self.index.get(token)?;
        let i = positions.partition_point(|&pos| pos < from);
        positions.get(i).copied()
    }

    /// Number of distinct tokens in the target
    #[must_use]
    pub fn distinct_tokens(&self) -> usize {
        self.index.len()
    }
}

impl TokenMatcher for IndexedMatcher<'_> {
    fn score(&self, reference: &[u8]) -> usize {
        let mut matched = 0;
        let mut from = 0;

        for token in reference.chunks_exact(self.token_len) {
            match self.find(token, from) {
                Some(pos) => {
                    matched += 1;
                    from = pos + 1;
                }
                None => break,
            }
        }

        matched
    }
}

/// Scans the target again for every token; nothing is precomputed.
#[derive(Debug, Clone, Copy)]
pub struct LinearMatcher<'a> {
    target: &'a [u8],
    token_len: usize,
}

impl<'a> LinearMatcher<'a> {
    /// # Panics
    ///
    /// Panics if `token_len` is zero.
    #[must_use]
    pub fn new(target: &'a [u8], token_len: usize) -> Self {
        assert!(token_len > 0, "token length must be positive");
        Self { target, token_len }
    }

    fn find(&self, token: &[u8], from: usize) -> Option<usize> {
        self.target
            .get(from..)?
            .windows(token.len())
            .position(|window| window == token)
            .map(|offset| from + offset)
    }
}

impl TokenMatcher for LinearMatcher<'_> {
    fn score(&self, reference: &[u8]) -> usize {
        let mut matched = 0;
        let mut from = 0;

        for token in reference.chunks_exact(self.token_len) {
            match self.find(token, from) {
                Some(pos) => {
                    matched += 1;
                    from = pos + 1;
                }
                None => break,
            }
        }

        matched
    }
}

impl MatchStrategy {
    /// Build the matcher for `target` that implements this strategy
    #[must_use]
    pub fn matcher<'a>(self, target: &'a [u8], token_len: usize) -> Box<dyn TokenMatcher + 'a> {
        match self {
            Self::Indexed => Box::new(IndexedMatcher::new(target, token_len)),
            Self::Linear => Box::new(LinearMatcher::new(target, token_len)),
        }
    }
}

/// Score a single reference against a single target
#[must_use]
pub fn score(target: &[u8], reference: &[u8], token_len: usize, strategy: MatchStrategy) -> usize {
    match strategy {
        MatchStrategy::Indexed => IndexedMatcher::new(target, token_len).score(reference),
        MatchStrategy::Linear => LinearMatcher::new(target, token_len).score(reference),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(target: &[u8], reference: &[u8], token_len: usize) -> usize {
        let indexed = score(target, reference, token_len, MatchStrategy::Indexed);
        let linear = score(target, reference, token_len, MatchStrategy::Linear);
        assert_eq!(
            indexed,
            linear,
            "strategies disagree on target {:?} reference {:?}",
            String::from_utf8_lossy(target),
            String::from_utf8_lossy(reference)
        );
        indexed
    }

    #[test]
    fn test_example_scenario() {
        // AC at 0, GT at 2, AC at 4
        assert_eq!(both(b"ACGTACGT", b"ACGTAC", 2), 3);
    }

    #[test]
    fn test_missing_first_token_scores_zero() {
        assert_eq!(both(b"ACGTACGT", b"TTACGT", 2), 0);
    }

    #[test]
    fn test_empty_reference_scores_zero() {
        assert_eq!(both(b"ACGT", b"", 2), 0);
    }

    #[test]
    fn test_target_shorter_than_token() {
        assert_eq!(both(b"A", b"AAAA", 2), 0);
        assert_eq!(both(b"", b"AC", 1), 0);
    }

    #[test]
    fn test_stops_at_first_unmatched_token() {
        // G is found, then no A after it, so the trailing C never counts
        assert_eq!(both(b"ACG", b"GAC", 1), 1);
    }

    #[test]
    fn test_skips_target_tokens_between_matches() {
        assert_eq!(both(b"AxxxCyyyG", b"ACG", 1), 3);
    }

    #[test]
    fn test_repeated_tokens_need_distinct_positions() {
        assert_eq!(both(b"AAA", b"AAAA", 1), 3);
        assert_eq!(both(b"AAAA", b"AAAA", 1), 4);
    }

    #[test]
    fn test_overlapping_token_matches() {
        // AA at 0 then AA at 1
        assert_eq!(both(b"AAA", b"AAAA", 2), 2);
    }

    #[test]
    fn test_partial_trailing_chunk_ignored() {
        assert_eq!(both(b"ACGT", b"ACG", 2), 1);
    }

    #[test]
    fn test_score_bounded_by_token_count() {
        let target = b"ACGTTGCAACGTTGCA";
        for reference in [&b"ACGT"[..], b"TTTT", b"GCAA", b"CAGT", b"AAAA"] {
            let s = both(target, reference, 1);
            assert!(s <= reference.len());
        }
    }

    #[test]
    fn test_full_match_when_tokens_in_order() {
        let target = b"GGACTTTGTAAACCC";
        assert_eq!(both(target, b"ACGTAC", 2), 3);
    }

    #[test]
    fn test_indexed_matcher_reused_across_references() {
        let target = b"ACGTACGT";
        let matcher = IndexedMatcher::new(target, 2);
        assert_eq!(matcher.distinct_tokens(), 4);
        assert_eq!(matcher.score(b"ACGTAC"), 3);
        assert_eq!(matcher.score(b"GTACGT"), 3);
        assert_eq!(matcher.score(b"CGCGCG"), 2);
        // repeated calls are pure
        assert_eq!(matcher.score(b"ACGTAC"), 3);
    }

    #[test]
    fn test_strategy_matcher_dispatch() {
        let target = b"ACGTACGT";
        for strategy in [MatchStrategy::Indexed, MatchStrategy::Linear] {
            let matcher = strategy.matcher(target, 2);
            assert_eq!(matcher.score(b"ACGTAC"), 3);
        }
    }

    #[test]
    fn test_strategies_agree_on_pseudo_random_inputs() {
        // small LCG so the test needs no RNG dependency
        let mut state: u32 = 12345;
        let mut next = move || {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            b"ACGT"[((state >> 16) % 4) as usize]
        };

        for token_len in 1..=3 {
            for _ in 0..50 {
                let target: Vec<u8> = (0..40).map(|_| next()).collect();
                let reference: Vec<u8> = (0..token_len * 6).map(|_| next()).collect();
                both(&target, &reference, token_len);
            }
        }
    }
}
