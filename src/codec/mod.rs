//! File formats for reference sets, score matrices and distance matrices.
//!
//! | Format | Layout |
//! |--------|--------|
//! | Reference set (text) | `"<count> <num_tokens> <token_len>"`, then one subsequence per line |
//! | Score matrix | `u64 rows`, `i32 embed_len`, `i32 max_val`, `rows * embed_len` `i32` row-major |
//! | Legacy score stream | records of `i32 size`, `i32 max_val`, `size` `i32`, until end of file |
//! | Distance matrix | `i32 rows`, `i32 cols`, `rows * cols` `f64` row-major |
//! | `.npy` export | NumPy format 1.0, `<f8`, Fortran order |
//!
//! All binary values are little-endian. Readers reject truncated files and
//! files whose payload does not match the declared dimensions exactly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use subseq_sketch::codec::{embedding, reference_set};
//! use std::path::Path;
//!
//! let references = reference_set::load_reference_set(Path::new("subsequences.txt")).unwrap();
//! let sketches = embedding::load_embedding(Path::new("input.n10.l5.t2.sss")).unwrap();
//! assert_eq!(sketches.embed_len(), references.len());
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::matrix::MatrixError;
use crate::core::reference_set::ReferenceSetError;

pub mod distance;
pub mod embedding;
pub mod npy;
pub mod reference_set;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Could not open the file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write to the file {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Truncated {what}: expected {expected} bytes, found {found}")]
    Truncated {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Declared {rows}x{cols} {what} does not match the {found} bytes of payload")]
    PayloadMismatch {
        what: &'static str,
        rows: usize,
        cols: usize,
        found: usize,
    },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Inconsistent dimension found, #1: {expected} #{record}: {found}")]
    InconsistentDimension {
        expected: usize,
        found: usize,
        record: usize,
    },

    #[error("{what} of {value} is too large for the file format")]
    TooLarge { what: &'static str, value: usize },

    #[error(transparent)]
    ReferenceSet(#[from] ReferenceSetError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub(crate) fn open(path: &Path) -> Result<BufReader<File>, CodecError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| CodecError::Open {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn create(path: &Path) -> Result<BufWriter<File>, CodecError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| CodecError::Create {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Split `n` bytes off the front of `bytes`
fn take<'a>(bytes: &mut &'a [u8], n: usize, what: &'static str) -> Result<&'a [u8], CodecError> {
    if bytes.len() < n {
        return Err(CodecError::Truncated {
            what,
            expected: n,
            found: bytes.len(),
        });
    }
    let (head, tail) = bytes.split_at(n);
    *bytes = tail;
    Ok(head)
}

pub(crate) fn take_i32(bytes: &mut &[u8], what: &'static str) -> Result<i32, CodecError> {
    let head = take(bytes, 4, what)?;
    Ok(i32::from_le_bytes([head[0], head[1], head[2], head[3]]))
}

pub(crate) fn take_u64(bytes: &mut &[u8], what: &'static str) -> Result<u64, CodecError> {
    let head = take(bytes, 8, what)?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(head);
    Ok(u64::from_le_bytes(buf))
}

/// Non-negative `i32` header field as `usize`
pub(crate) fn dimension(value: i32, field: &str) -> Result<usize, CodecError> {
    usize::try_from(value)
        .map_err(|_| CodecError::InvalidHeader(format!("negative {field}: {value}")))
}

/// `usize` dimension as an `i32` header field
pub(crate) fn header_i32(value: usize, what: &'static str) -> Result<i32, CodecError> {
    i32::try_from(value).map_err(|_| CodecError::TooLarge { what, value })
}

/// Byte length of `rows * cols` values of `width` bytes
pub(crate) fn payload_len(rows: usize, cols: usize, width: usize) -> Result<usize, CodecError> {
    rows.checked_mul(cols)
        .and_then(|n| n.checked_mul(width))
        .ok_or_else(|| CodecError::InvalidHeader(format!("dimensions {rows}x{cols} overflow")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_advances() {
        let data = [1u8, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0];
        let mut bytes = &data[..];
        assert_eq!(take_i32(&mut bytes, "test").unwrap(), 1);
        assert_eq!(take_u64(&mut bytes, "test").unwrap(), 2);
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_take_truncated() {
        let mut bytes = &[1u8, 2][..];
        assert!(matches!(
            take_i32(&mut bytes, "header"),
            Err(CodecError::Truncated {
                expected: 4,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_dimension_rejects_negative() {
        assert_eq!(dimension(3, "rows").unwrap(), 3);
        assert!(matches!(
            dimension(-1, "rows"),
            Err(CodecError::InvalidHeader(_))
        ));
    }
}
