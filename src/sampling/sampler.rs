use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::core::reference_set::{ReferenceSet, ReferenceSetError};
use crate::utils::validation::{check_subsequence_limit, ValidationError};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SamplingError {
    #[error("Alphabet is empty")]
    EmptyAlphabet,

    #[error("Sequence of length {sequence_len} splits into parts of length {part_len}, shorter than the token length {token_len}")]
    PartTooShort {
        sequence_len: usize,
        part_len: usize,
        token_len: usize,
    },

    #[error(transparent)]
    ReferenceSet(#[from] ReferenceSetError),

    #[error(transparent)]
    Limit(#[from] ValidationError),
}

/// Draws reference subsequences of `num_tokens` tokens of `token_len` bytes.
///
/// The random generator is owned by the sampler; seed it for reproducible
/// output or use [`SubsequenceSampler::from_entropy`] for fresh randomness.
#[derive(Debug)]
pub struct SubsequenceSampler<R: Rng = StdRng> {
    num_tokens: usize,
    token_len: usize,
    rng: R,
}

impl SubsequenceSampler<StdRng> {
    /// Sampler seeded from operating system entropy
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is invalid for a `ReferenceSet`.
    pub fn from_entropy(num_tokens: usize, token_len: usize) -> Result<Self, SamplingError> {
        Self::with_rng(num_tokens, token_len, StdRng::from_entropy())
    }

    /// Sampler with a fixed seed
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is invalid for a `ReferenceSet`.
    pub fn seeded(num_tokens: usize, token_len: usize, seed: u64) -> Result<Self, SamplingError> {
        Self::with_rng(num_tokens, token_len, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SubsequenceSampler<R> {
    /// # Errors
    ///
    /// Returns an error if either parameter is invalid for a `ReferenceSet`.
    pub fn with_rng(num_tokens: usize, token_len: usize, rng: R) -> Result<Self, SamplingError> {
        // validate once up front
        ReferenceSet::new(num_tokens, token_len)?;
        Ok(Self {
            num_tokens,
            token_len,
            rng,
        })
    }

    /// Empty set with this sampler's token geometry
    ///
    /// # Errors
    ///
    /// Never fails for a sampler built through its constructors.
    pub fn empty_set(&self) -> Result<ReferenceSet, SamplingError> {
        Ok(ReferenceSet::new(self.num_tokens, self.token_len)?)
    }

    /// Draw `num` subsequences uniformly over `alphabet`, with replacement.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::EmptyAlphabet` if the alphabet has no symbols,
    /// and `SamplingError::Limit` if `num` exceeds the subsequence limit.
    pub fn generate_from_alphabet(
        &mut self,
        alphabet: &[u8],
        num: usize,
    ) -> Result<ReferenceSet, SamplingError> {
        if alphabet.is_empty() {
            return Err(SamplingError::EmptyAlphabet);
        }
        check_subsequence_limit(num)?;

        let mut set = self.empty_set()?;
        set.reserve(num);
        let len = set.subsequence_len();

        for _ in 0..num {
            let subsequence: Vec<u8> = (0..len)
                .map(|_| alphabet[self.rng.gen_range(0..alphabet.len())])
                .collect();
            set.push(subsequence)?;
        }

        Ok(set)
    }

    /// Sample `num_each` subsequences from every sequence, in input order.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::PartTooShort` as soon as a sequence is too short
    /// to supply one token per part.
    pub fn generate_from_sequences<I, S>(
        &mut self,
        sequences: I,
        num_each: usize,
    ) -> Result<ReferenceSet, SamplingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut set = self.empty_set()?;
        for sequence in sequences {
            self.sample_into(&mut set, sequence.as_ref(), num_each)?;
        }
        Ok(set)
    }

    /// Sample `num` subsequences from one sequence and append them to `set`.
    ///
    /// The sequence is cut into `num_tokens` equal parts (remainder dropped);
    /// one token is drawn from a uniformly random offset inside each part, and
    /// the tokens are joined in part order.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::PartTooShort` if a part is shorter than a token,
    /// and `SamplingError::Limit` if the set would grow past the subsequence
    /// limit.
    pub fn sample_into(
        &mut self,
        set: &mut ReferenceSet,
        sequence: &[u8],
        num: usize,
    ) -> Result<(), SamplingError> {
        let part_len = sequence.len() / self.num_tokens;
        if part_len < self.token_len {
            return Err(SamplingError::PartTooShort {
                sequence_len: sequence.len(),
                part_len,
                token_len: self.token_len,
            });
        }

        check_subsequence_limit(set.len().saturating_add(num))?;

        set.reserve(num);
        let max_offset = part_len - self.token_len;

        for _ in 0..num {
            let mut subsequence = Vec::with_capacity(self.num_tokens * self.token_len);
            for part in 0..self.num_tokens {
                let start = part * part_len + self.rng.gen_range(0..=max_offset);
                subsequence.extend_from_slice(&sequence[start..start + self.token_len]);
            }
            set.push(subsequence)?;
        }

        Ok(())
    }
}
