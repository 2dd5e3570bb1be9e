use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReferenceSetError {
    #[error("Token length must be at least 1")]
    ZeroTokenLength,

    #[error("Number of tokens must be at least 1")]
    ZeroTokens,

    #[error("Number of tokens {0} exceeds the maximum of {max}", max = i32::MAX)]
    TooManyTokens(usize),

    #[error("Subsequence length {found} does not match the expected {expected} ({num_tokens} tokens of length {token_len})")]
    LengthMismatch {
        expected: usize,
        found: usize,
        num_tokens: usize,
        token_len: usize,
    },
}

/// An ordered collection of reference subsequences.
///
/// Every member holds exactly `num_tokens` tokens of `token_len` bytes each.
/// Member order defines the column order of every score matrix computed from
/// the set, so it is preserved by all operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSet {
    num_tokens: usize,
    token_len: usize,
    subsequences: Vec<Vec<u8>>,
}

impl ReferenceSet {
    /// Create an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is zero or if `num_tokens` cannot be
    /// stored as the `i32` maximum score of a matrix file.
    pub fn new(num_tokens: usize, token_len: usize) -> Result<Self, ReferenceSetError> {
        if token_len == 0 {
            return Err(ReferenceSetError::ZeroTokenLength);
        }
        if num_tokens == 0 {
            return Err(ReferenceSetError::ZeroTokens);
        }
        if i32::try_from(num_tokens).is_err() {
            return Err(ReferenceSetError::TooManyTokens(num_tokens));
        }

        Ok(Self {
            num_tokens,
            token_len,
            subsequences: Vec::new(),
        })
    }

    /// Append a subsequence to the end of the set.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceSetError::LengthMismatch` if the subsequence is not
    /// exactly `num_tokens * token_len` bytes long.
    pub fn push(&mut self, subsequence: Vec<u8>) -> Result<(), ReferenceSetError> {
        let expected = self.subsequence_len();
        if subsequence.len() != expected {
            return Err(ReferenceSetError::LengthMismatch {
                expected,
                found: subsequence.len(),
                num_tokens: self.num_tokens,
                token_len: self.token_len,
            });
        }
        self.subsequences.push(subsequence);
        Ok(())
    }

    pub fn reserve(&mut self, additional: usize) {
        self.subsequences.reserve(additional);
    }

    #[must_use]
    pub fn num_tokens(&self) -> usize {
        self.num_tokens
    }

    #[must_use]
    pub fn token_len(&self) -> usize {
        self.token_len
    }

    /// Length in bytes of every member
    #[must_use]
    pub fn subsequence_len(&self) -> usize {
        self.num_tokens * self.token_len
    }

    /// Highest score a target can reach against any member
    #[must_use]
    pub fn max_score(&self) -> i32 {
        // Checked in `new`
        i32::try_from(self.num_tokens).unwrap_or(i32::MAX)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.subsequences.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.subsequences.iter().map(Vec::as_slice)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Vec<u8>] {
        &self.subsequences
    }

    /// Tokens of the member at `index`, in order
    pub fn tokens(&self, index: usize) -> impl Iterator<Item = &[u8]> {
        self.subsequences
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .chunks_exact(self.token_len)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.subsequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subsequences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_parameters() {
        assert_eq!(
            ReferenceSet::new(3, 0).unwrap_err(),
            ReferenceSetError::ZeroTokenLength
        );
        assert_eq!(
            ReferenceSet::new(0, 2).unwrap_err(),
            ReferenceSetError::ZeroTokens
        );
    }

    #[test]
    fn test_push_checks_length() {
        let mut set = ReferenceSet::new(3, 2).unwrap();
        assert!(set.push(b"ACGTAC".to_vec()).is_ok());

        let err = set.push(b"ACGT".to_vec()).unwrap_err();
        assert!(matches!(
            err,
            ReferenceSetError::LengthMismatch {
                expected: 6,
                found: 4,
                ..
            }
        ));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_tokens_split_by_token_len() {
        let mut set = ReferenceSet::new(3, 2).unwrap();
        set.push(b"ACGTAC".to_vec()).unwrap();

        let tokens: Vec<&[u8]> = set.tokens(0).collect();
        assert_eq!(tokens, vec![&b"AC"[..], &b"GT"[..], &b"AC"[..]]);
        assert_eq!(set.tokens(5).count(), 0);
        assert_eq!(set.max_score(), 3);
    }
}
