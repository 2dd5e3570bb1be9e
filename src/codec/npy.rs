//! Export of distance matrices to NumPy `.npy` files (format version 1.0).
//!
//! The payload is written in Fortran (column-major) order and the header says
//! so, which lets `numpy.load` read the file without any conversion.

use std::io::Write;
use std::path::Path;

use crate::codec::{create, CodecError};
use crate::core::matrix::DistanceMatrix;

const MAGIC: &[u8; 6] = b"\x93NUMPY";
const VERSION: [u8; 2] = [1, 0];
/// Magic, version and header length field
const PREAMBLE_LEN: usize = MAGIC.len() + VERSION.len() + 2;
const ALIGNMENT: usize = 64;

/// Header dictionary, space padded and newline terminated so that the data
/// starts on a 64-byte boundary
fn header(rows: usize, cols: usize) -> String {
    let mut header =
        format!("{{'descr': '<f8', 'fortran_order': True, 'shape': ({rows}, {cols}), }}");
    let unpadded = PREAMBLE_LEN + header.len() + 1;
    let padding = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
    header.extend(std::iter::repeat(' ').take(padding));
    header.push('\n');
    header
}

/// Write a distance matrix in `.npy` format.
///
/// # Errors
///
/// Returns `CodecError::TooLarge` if the header does not fit the 16-bit length
/// field, or `CodecError::Io` if writing fails.
pub fn write_npy<W: Write>(mut writer: W, matrix: &DistanceMatrix) -> Result<(), CodecError> {
    let header = header(matrix.rows(), matrix.cols());
    let header_len = u16::try_from(header.len()).map_err(|_| CodecError::TooLarge {
        what: "npy header length",
        value: header.len(),
    })?;

    writer.write_all(MAGIC)?;
    writer.write_all(&VERSION)?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(header.as_bytes())?;
    for value in matrix.column_major() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a distance matrix as an `.npy` file
///
/// # Errors
///
/// Returns `CodecError::Create` if the file cannot be created, or any error of
/// [`write_npy`].
pub fn save_npy(path: &Path, matrix: &DistanceMatrix) -> Result<(), CodecError> {
    write_npy(create(path)?, matrix)
}
