use rayon::prelude::*;
use thiserror::Error;
use tracing::warn;

use crate::core::matrix::{DistanceMatrix, EmbeddingMatrix, MatrixError};

/// Distances below this value are reported as exactly zero
pub const ZERO_THRESHOLD: f64 = 1e-8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DistanceError {
    #[error("Dimensions do not match: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error(transparent)]
    Shape(#[from] MatrixError),
}

/// Pairwise cosine distance between the rows of `a` and the rows of `b`.
///
/// Both inputs are row-normalised, `D = 1 - A·Bᵗ` is formed, and entries
/// below [`ZERO_THRESHOLD`] are snapped to `0.0`. A row with zero norm yields
/// NaN distances.
///
/// A `max_val` mismatch is only logged: the dot product stays well defined
/// even when the two matrices were scored on different scales.
///
/// # Errors
///
/// Returns `DistanceError::DimensionMismatch` if the inputs have a different
/// number of columns.
pub fn cosine_distance(
    a: &EmbeddingMatrix,
    b: &EmbeddingMatrix,
) -> Result<DistanceMatrix, DistanceError> {
    if a.embed_len() != b.embed_len() {
        return Err(DistanceError::DimensionMismatch {
            left: a.embed_len(),
            right: b.embed_len(),
        });
    }

    if a.max_val() != b.max_val() {
        warn!(
            "Max possible values are not consistent, #1: {}, #2: {}. The results may not be meaningful.",
            a.max_val(),
            b.max_val()
        );
    }

    let dim = a.embed_len();
    let left = normalize_rows(a);
    let right = normalize_rows(b);
    let cols = b.rows();

    let mut values = vec![0.0; a.rows() * cols];
    if dim > 0 && cols > 0 {
        values
            .par_chunks_mut(cols)
            .zip(left.par_chunks(dim))
            .for_each(|(out, x)| {
                for (cell, y) in out.iter_mut().zip(right.chunks(dim)) {
                    let d = 1.0 - dot(x, y);
                    *cell = if d < ZERO_THRESHOLD { 0.0 } else { d };
                }
            });
    } else {
        // No columns: every row is a zero vector
        values.fill(f64::NAN);
    }

    Ok(DistanceMatrix::from_values(a.rows(), cols, values)?)
}

/// Rows divided by their Euclidean norm, row-major
fn normalize_rows(m: &EmbeddingMatrix) -> Vec<f64> {
    let mut out = Vec::with_capacity(m.rows() * m.embed_len());
    for row in m.iter_rows() {
        let norm = row
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum::<f64>()
            .sqrt();
        out.extend(row.iter().map(|&v| f64::from(v) / norm));
    }
    out
}

#[inline]
fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, embed_len: usize, max_val: i32, values: &[i32]) -> EmbeddingMatrix {
        EmbeddingMatrix::from_values(rows, embed_len, max_val, values.to_vec()).unwrap()
    }

    #[test]
    fn test_output_shape() {
        let a = matrix(3, 4, 5, &[1, 2, 3, 4, 0, 1, 0, 1, 5, 5, 5, 5]);
        let b = matrix(2, 4, 5, &[1, 0, 0, 0, 2, 2, 2, 2]);

        let d = cosine_distance(&a, &b).unwrap();
        assert_eq!(d.rows(), 3);
        assert_eq!(d.cols(), 2);
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let a = matrix(3, 4, 5, &[1; 12]);
        let b = matrix(2, 5, 5, &[1; 10]);
        assert_eq!(
            cosine_distance(&a, &b).unwrap_err(),
            DistanceError::DimensionMismatch { left: 4, right: 5 }
        );
    }

    #[test]
    fn test_max_val_mismatch_still_computes() {
        let a = matrix(1, 2, 3, &[1, 2]);
        let b = matrix(1, 2, 7, &[1, 2]);
        let d = cosine_distance(&a, &b).unwrap();
        assert_eq!(d.get(0, 0), Some(0.0));
    }

    #[test]
    fn test_self_distance_has_zero_diagonal() {
        let a = matrix(
            4,
            5,
            6,
            &[1, 2, 3, 4, 5, 6, 0, 0, 1, 2, 3, 3, 3, 3, 3, 1, 6, 2, 5, 4],
        );
        let d = cosine_distance(&a, &a).unwrap();
        for i in 0..4 {
            assert_eq!(d.get(i, i), Some(0.0));
        }
    }

    #[test]
    fn test_values_within_range() {
        let a = matrix(3, 3, 4, &[4, 0, 0, 0, 4, 0, 1, 2, 3]);
        let b = matrix(3, 3, 4, &[0, 0, 4, 1, 1, 1, 4, 4, 0]);
        let d = cosine_distance(&a, &b).unwrap();
        for v in d.values() {
            assert!((0.0..=2.0).contains(v), "distance {v} out of range");
        }
    }

    #[test]
    fn test_known_values() {
        // orthogonal rows are at distance 1, parallel rows at 0
        let a = matrix(2, 2, 1, &[1, 0, 0, 1]);
        let b = matrix(2, 2, 1, &[0, 1, 2, 0]);
        let d = cosine_distance(&a, &b).unwrap();
        assert_eq!(d.row(0), &[1.0, 0.0]);
        assert_eq!(d.row(1), &[0.0, 1.0]);

        let c = matrix(1, 2, 1, &[1, 1]);
        let d = cosine_distance(&a, &c).unwrap();
        let expected = 1.0 - std::f64::consts::FRAC_1_SQRT_2;
        assert!((d.get(0, 0).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_norm_row_yields_nan() {
        let a = matrix(1, 2, 1, &[0, 0]);
        let b = matrix(1, 2, 1, &[1, 1]);
        let d = cosine_distance(&a, &b).unwrap();
        assert!(d.get(0, 0).unwrap().is_nan());
    }
}
