use std::io::{Read, Write};
use std::path::Path;

use crate::codec::{
    create, dimension, header_i32, open, payload_len, read_all, take_i32, CodecError,
};
use crate::core::matrix::DistanceMatrix;

const HEADER_LEN: usize = 8;

/// Write a distance matrix: `i32 rows`, `i32 cols`, then `f64` values row by row.
///
/// # Errors
///
/// Returns `CodecError::TooLarge` if a dimension does not fit an `i32`, or
/// `CodecError::Io` if writing fails.
pub fn write_distance<W: Write>(mut writer: W, matrix: &DistanceMatrix) -> Result<(), CodecError> {
    let rows = header_i32(matrix.rows(), "row count")?;
    let cols = header_i32(matrix.cols(), "column count")?;

    writer.write_all(&rows.to_le_bytes())?;
    writer.write_all(&cols.to_le_bytes())?;
    for value in matrix.values() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a distance matrix written by [`write_distance`].
///
/// # Errors
///
/// Returns `CodecError::Truncated` if the header is incomplete,
/// `CodecError::InvalidHeader` for negative dimensions, and
/// `CodecError::PayloadMismatch` if the payload is not exactly `rows * cols`
/// values.
pub fn read_distance<R: Read>(reader: R) -> Result<DistanceMatrix, CodecError> {
    const WHAT: &str = "distance matrix header";

    let bytes = read_all(reader)?;
    let mut bytes = &bytes[..];

    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Truncated {
            what: WHAT,
            expected: HEADER_LEN,
            found: bytes.len(),
        });
    }

    let rows = dimension(take_i32(&mut bytes, WHAT)?, "row count")?;
    let cols = dimension(take_i32(&mut bytes, WHAT)?, "column count")?;

    if bytes.len() != payload_len(rows, cols, 8)? {
        return Err(CodecError::PayloadMismatch {
            what: "distance matrix",
            rows,
            cols,
            found: bytes.len(),
        });
    }

    let values = bytes
        .chunks_exact(8)
        .map(|c| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(c);
            f64::from_le_bytes(buf)
        })
        .collect();

    Ok(DistanceMatrix::from_values(rows, cols, values)?)
}

/// Save a distance matrix to a file
///
/// # Errors
///
/// Returns `CodecError::Create` if the file cannot be created, or any error of
/// [`write_distance`].
pub fn save_distance(path: &Path, matrix: &DistanceMatrix) -> Result<(), CodecError> {
    write_distance(create(path)?, matrix)
}

/// Load a distance matrix from a file
///
/// # Errors
///
/// Returns `CodecError::Open` if the file cannot be opened, or any error of
/// [`read_distance`].
pub fn load_distance(path: &Path) -> Result<DistanceMatrix, CodecError> {
    read_distance(open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample_matrix() -> DistanceMatrix {
        DistanceMatrix::from_values(2, 3, vec![0.0, 0.25, 1.0, 0.5, 0.0, 1.75]).unwrap()
    }

    #[test]
    fn test_layout() {
        let mut bytes = Vec::new();
        write_distance(&mut bytes, &sample_matrix()).unwrap();

        assert_eq!(bytes.len(), 8 + 6 * 8);
        assert_eq!(&bytes[0..4], &2i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &3i32.to_le_bytes());
        assert_eq!(&bytes[16..24], &0.25f64.to_le_bytes());
    }

    #[test]
    fn test_file_round_trip() {
        let matrix = sample_matrix();
        let temp = NamedTempFile::new().unwrap();
        save_distance(temp.path(), &matrix).unwrap();
        assert_eq!(load_distance(temp.path()).unwrap(), matrix);
    }

    #[test]
    fn test_truncated_file() {
        let mut bytes = Vec::new();
        write_distance(&mut bytes, &sample_matrix()).unwrap();

        assert!(matches!(
            read_distance(&bytes[..6]),
            Err(CodecError::Truncated { .. })
        ));
        assert!(matches!(
            read_distance(&bytes[..bytes.len() - 8]),
            Err(CodecError::PayloadMismatch { .. })
        ));
    }
}
