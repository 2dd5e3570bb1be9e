use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Buffer of {found} values does not fit a {rows}x{cols} matrix")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        found: usize,
    },

    #[error("Cannot merge matrices with different dimension, was {expected}, matrix #{index} is {found}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
        index: usize,
    },

    #[error("No matrices to merge")]
    NothingToMerge,
}

/// Per-sequence score vectors against a reference set.
///
/// Row `i` belongs to the `i`-th input sequence and column `j` to the `j`-th
/// reference. Values live in a single row-major buffer with stride `embed_len`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddingMatrix {
    rows: usize,
    embed_len: usize,
    /// Highest attainable score, i.e. the number of tokens per reference
    max_val: i32,
    values: Vec<i32>,
}

impl EmbeddingMatrix {
    /// Create a matrix filled with zeros
    #[must_use]
    pub fn zeros(rows: usize, embed_len: usize, max_val: i32) -> Self {
        Self {
            rows,
            embed_len,
            max_val,
            values: vec![0; rows * embed_len],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::ShapeMismatch` if the buffer length is not
    /// `rows * embed_len`.
    pub fn from_values(
        rows: usize,
        embed_len: usize,
        max_val: i32,
        values: Vec<i32>,
    ) -> Result<Self, MatrixError> {
        if values.len() != rows * embed_len {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols: embed_len,
                found: values.len(),
            });
        }
        Ok(Self {
            rows,
            embed_len,
            max_val,
            values,
        })
    }

    /// Concatenate matrices row-wise, preserving input order.
    ///
    /// All inputs must share `embed_len`. A differing `max_val` only triggers a
    /// warning; the first matrix's value is kept.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::NothingToMerge` for an empty input and
    /// `MatrixError::DimensionMismatch` if the column counts differ.
    pub fn merge(matrices: &[Self]) -> Result<Self, MatrixError> {
        let first = matrices.first().ok_or(MatrixError::NothingToMerge)?;

        for (index, matrix) in matrices.iter().enumerate().skip(1) {
            if matrix.embed_len != first.embed_len {
                return Err(MatrixError::DimensionMismatch {
                    expected: first.embed_len,
                    found: matrix.embed_len,
                    index: index + 1,
                });
            }
            if matrix.max_val != first.max_val {
                warn!(
                    "Merging matrices with different max possible values, was {}, matrix #{} is {}",
                    first.max_val,
                    index + 1,
                    matrix.max_val
                );
            }
        }

        let rows = matrices.iter().map(|m| m.rows).sum();
        let mut values = Vec::with_capacity(rows * first.embed_len);
        for matrix in matrices {
            values.extend_from_slice(&matrix.values);
        }

        Ok(Self {
            rows,
            embed_len: first.embed_len,
            max_val: first.max_val,
            values,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn embed_len(&self) -> usize {
        self.embed_len
    }

    #[must_use]
    pub fn max_val(&self) -> i32 {
        self.max_val
    }

    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[i32] {
        let start = row * self.embed_len;
        &self.values[start..start + self.embed_len]
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.rows && col < self.embed_len {
            Some(self.values[row * self.embed_len + col])
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[i32]> {
        (0..self.rows).map(move |row| self.row(row))
    }

    #[must_use]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [i32] {
        &mut self.values
    }
}

/// Pairwise cosine distances between the rows of two score matrices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::ShapeMismatch` if the buffer length is not
    /// `rows * cols`.
    pub fn from_values(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, MatrixError> {
        if values.len() != rows * cols {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols,
                found: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.values[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |row| self.row(row))
    }

    /// Values in row-major order
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values in column-major (Fortran) order
    #[must_use]
    pub fn column_major(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.values.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                out.push(self.values[row * self.cols + col]);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, embed_len: usize, max_val: i32, start: i32) -> EmbeddingMatrix {
        let count = i32::try_from(rows * embed_len).unwrap();
        EmbeddingMatrix::from_values(rows, embed_len, max_val, (start..start + count).collect())
            .unwrap()
    }

    #[test]
    fn test_row_access() {
        let m = matrix(2, 3, 5, 0);
        assert_eq!(m.row(0), &[0, 1, 2]);
        assert_eq!(m.row(1), &[3, 4, 5]);
        assert_eq!(m.get(1, 2), Some(5));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.iter_rows().count(), 2);
    }

    #[test]
    fn test_from_values_rejects_bad_shape() {
        let err = EmbeddingMatrix::from_values(2, 3, 1, vec![0; 5]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::ShapeMismatch {
                rows: 2,
                cols: 3,
                found: 5
            }
        );
    }

    #[test]
    fn test_merge_preserves_row_order() {
        let a = matrix(3, 5, 4, 0);
        let b = matrix(4, 5, 4, 100);

        let merged = EmbeddingMatrix::merge(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(merged.rows(), 7);
        assert_eq!(merged.embed_len(), 5);
        assert_eq!(merged.row(0), a.row(0));
        assert_eq!(merged.row(2), a.row(2));
        assert_eq!(merged.row(3), b.row(0));
        assert_eq!(merged.row(6), b.row(3));
    }

    #[test]
    fn test_merge_dimension_mismatch_is_fatal() {
        let a = matrix(3, 4, 4, 0);
        let b = matrix(2, 5, 4, 0);
        let err = EmbeddingMatrix::merge(&[a, b]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                expected: 4,
                found: 5,
                index: 2
            }
        );
    }

    #[test]
    fn test_merge_max_val_mismatch_keeps_first() {
        let a = matrix(1, 2, 4, 0);
        let b = matrix(1, 2, 6, 0);
        let merged = EmbeddingMatrix::merge(&[a, b]).unwrap();
        assert_eq!(merged.max_val(), 4);
        assert_eq!(merged.rows(), 2);
    }

    #[test]
    fn test_merge_empty_input() {
        assert_eq!(
            EmbeddingMatrix::merge(&[]).unwrap_err(),
            MatrixError::NothingToMerge
        );
    }

    #[test]
    fn test_distance_column_major() {
        let d = DistanceMatrix::from_values(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(d.column_major(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(d.get(1, 0), Some(4.0));
        assert_eq!(d.row(1), &[4.0, 5.0, 6.0]);
    }
}
