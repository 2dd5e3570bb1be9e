use std::io::{Read, Write};
use std::path::Path;

use tracing::warn;

use crate::codec::{
    create, dimension, header_i32, open, payload_len, read_all, take_i32, take_u64, CodecError,
};
use crate::core::matrix::EmbeddingMatrix;

const HEADER_LEN: usize = 16;

/// Write a score matrix: `u64 rows`, `i32 embed_len`, `i32 max_val`, then
/// the values row by row.
///
/// # Errors
///
/// Returns `CodecError::TooLarge` if `embed_len` does not fit an `i32`, or
/// `CodecError::Io` if writing fails.
pub fn write_embedding<W: Write>(mut writer: W, matrix: &EmbeddingMatrix) -> Result<(), CodecError> {
    let embed_len = header_i32(matrix.embed_len(), "embedding dimension")?;

    writer.write_all(&(matrix.rows() as u64).to_le_bytes())?;
    writer.write_all(&embed_len.to_le_bytes())?;
    writer.write_all(&matrix.max_val().to_le_bytes())?;
    for value in matrix.values() {
        writer.write_all(&value.to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a score matrix written by [`write_embedding`].
///
/// # Errors
///
/// Returns `CodecError::Truncated` if the header is incomplete,
/// `CodecError::InvalidHeader` for negative or overflowing dimensions, and
/// `CodecError::PayloadMismatch` if the payload is not exactly
/// `rows * embed_len` values.
pub fn read_embedding<R: Read>(reader: R) -> Result<EmbeddingMatrix, CodecError> {
    decode_embedding(&read_all(reader)?)
}

fn decode_embedding(mut bytes: &[u8]) -> Result<EmbeddingMatrix, CodecError> {
    const WHAT: &str = "score matrix header";

    if bytes.len() < HEADER_LEN {
        return Err(CodecError::Truncated {
            what: WHAT,
            expected: HEADER_LEN,
            found: bytes.len(),
        });
    }

    let rows = take_u64(&mut bytes, WHAT)?;
    let rows = usize::try_from(rows)
        .map_err(|_| CodecError::InvalidHeader(format!("row count {rows} is too large")))?;
    let embed_len = dimension(take_i32(&mut bytes, WHAT)?, "embedding dimension")?;
    let max_val = take_i32(&mut bytes, WHAT)?;

    if bytes.len() != payload_len(rows, embed_len, 4)? {
        return Err(CodecError::PayloadMismatch {
            what: "score matrix",
            rows,
            cols: embed_len,
            found: bytes.len(),
        });
    }

    let values = decode_i32s(bytes);
    Ok(EmbeddingMatrix::from_values(rows, embed_len, max_val, values)?)
}

fn decode_i32s(bytes: &[u8]) -> Vec<i32> {
    bytes
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Write a matrix in the legacy per-record stream format: every row is
/// preceded by its own `i32 size` and `i32 max_val`.
///
/// # Errors
///
/// Returns `CodecError::TooLarge` if `embed_len` does not fit an `i32`, or
/// `CodecError::Io` if writing fails.
pub fn write_legacy<W: Write>(mut writer: W, matrix: &EmbeddingMatrix) -> Result<(), CodecError> {
    let size = header_i32(matrix.embed_len(), "embedding dimension")?;

    for row in matrix.iter_rows() {
        writer.write_all(&size.to_le_bytes())?;
        writer.write_all(&matrix.max_val().to_le_bytes())?;
        for value in row {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read a legacy per-record stream until end of file.
///
/// Every record must have the same size. A differing `max_val` is only
/// logged; the value of the first record is kept. An empty stream yields a
/// matrix with no rows and no columns.
///
/// # Errors
///
/// Returns `CodecError::InconsistentDimension` if record sizes differ, and
/// `CodecError::Truncated` if the stream ends inside a record.
pub fn read_legacy<R: Read>(reader: R) -> Result<EmbeddingMatrix, CodecError> {
    let bytes = read_all(reader)?;
    let mut bytes = &bytes[..];

    let mut embed_len: Option<usize> = None;
    let mut max_val: Option<i32> = None;
    let mut rows = 0;
    let mut values = Vec::new();

    while !bytes.is_empty() {
        let record = rows + 1;
        let size = dimension(take_i32(&mut bytes, "record header")?, "record size")?;
        let record_max = take_i32(&mut bytes, "record header")?;

        match embed_len {
            None => embed_len = Some(size),
            Some(expected) if expected != size => {
                return Err(CodecError::InconsistentDimension {
                    expected,
                    found: size,
                    record,
                });
            }
            Some(_) => {}
        }

        match max_val {
            None => max_val = Some(record_max),
            Some(first) if first != record_max => {
                warn!("Inconsistent max value found, #1: {first} #{record}: {record_max}");
            }
            Some(_) => {}
        }

        let len = payload_len(1, size, 4)?;
        if bytes.len() < len {
            return Err(CodecError::Truncated {
                what: "record",
                expected: len,
                found: bytes.len(),
            });
        }
        let (payload, rest) = bytes.split_at(len);
        values.extend(decode_i32s(payload));
        bytes = rest;
        rows += 1;
    }

    Ok(EmbeddingMatrix::from_values(
        rows,
        embed_len.unwrap_or(0),
        max_val.unwrap_or(0),
        values,
    )?)
}

/// Save a score matrix to a file
///
/// # Errors
///
/// Returns `CodecError::Create` if the file cannot be created, or any error of
/// [`write_embedding`].
pub fn save_embedding(path: &Path, matrix: &EmbeddingMatrix) -> Result<(), CodecError> {
    write_embedding(create(path)?, matrix)
}

/// Load a score matrix from a file
///
/// # Errors
///
/// Returns `CodecError::Open` if the file cannot be opened, or any error of
/// [`read_embedding`].
pub fn load_embedding(path: &Path) -> Result<EmbeddingMatrix, CodecError> {
    read_embedding(open(path)?)
}

/// Save a score matrix as a legacy per-record stream
///
/// # Errors
///
/// Returns `CodecError::Create` if the file cannot be created, or any error of
/// [`write_legacy`].
pub fn save_legacy(path: &Path, matrix: &EmbeddingMatrix) -> Result<(), CodecError> {
    write_legacy(create(path)?, matrix)
}

/// Load a legacy per-record stream from a file
///
/// # Errors
///
/// Returns `CodecError::Open` if the file cannot be opened, or any error of
/// [`read_legacy`].
pub fn load_legacy(path: &Path) -> Result<EmbeddingMatrix, CodecError> {
    read_legacy(open(path)?)
}
