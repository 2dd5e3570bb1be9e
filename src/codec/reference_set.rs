use std::io::{BufRead, Write};
use std::path::Path;

use crate::codec::{create, open, CodecError};
use crate::core::reference_set::ReferenceSet;
use crate::utils::validation::check_subsequence_limit;

/// Write a reference set as text.
///
/// The first line holds the number of subsequences, the number of tokens per
/// subsequence and the token length; every following line is one subsequence.
///
/// # Errors
///
/// Returns `CodecError::Io` if writing fails.
pub fn write_reference_set<W: Write>(mut writer: W, set: &ReferenceSet) -> Result<(), CodecError> {
    writeln!(
        writer,
        "{} {} {}",
        set.len(),
        set.num_tokens(),
        set.token_len()
    )?;
    for subsequence in set.iter() {
        writer.write_all(subsequence)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a reference set written by [`write_reference_set`].
///
/// Blank lines are skipped. The declared count is checked against
/// [`MAX_SUBSEQUENCES`](crate::utils::validation::MAX_SUBSEQUENCES) and then
/// against the lines actually read; no space is reserved up front.
///
/// # Errors
///
/// Returns `CodecError::InvalidHeader` if the header cannot be parsed or the
/// number of subsequences differs from the declared count, and
/// `CodecError::ReferenceSet` if a subsequence has the wrong length.
pub fn read_reference_set<R: BufRead>(reader: R) -> Result<ReferenceSet, CodecError> {
    let mut lines = reader.split(b'\n');

    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| CodecError::InvalidHeader("empty subsequence file".to_string()))?;
    let (count, num_tokens, token_len) = parse_header(&header)?;
    check_subsequence_limit(count).map_err(|e| CodecError::InvalidHeader(e.to_string()))?;

    let mut set = ReferenceSet::new(num_tokens, token_len)?;

    for line in lines {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() {
            continue;
        }
        set.push(line)?;
    }

    if set.len() != count {
        return Err(CodecError::InvalidHeader(format!(
            "header declares {count} subsequences but {} were found",
            set.len()
        )));
    }

    Ok(set)
}

fn parse_header(line: &[u8]) -> Result<(usize, usize, usize), CodecError> {
    let text = std::str::from_utf8(line)
        .map_err(|_| CodecError::InvalidHeader("header is not valid text".to_string()))?;
    let fields: Vec<&str> = text.split_whitespace().collect();

    if fields.len() != 3 {
        return Err(CodecError::InvalidHeader(format!(
            "expected '<count> <num_tokens> <token_len>', found '{}'",
            text.trim()
        )));
    }

    let parse = |field: &str, name: &str| {
        field
            .parse::<usize>()
            .map_err(|_| CodecError::InvalidHeader(format!("invalid {name}: '{field}'")))
    };

    Ok((
        parse(fields[0], "count")?,
        parse(fields[1], "number of tokens")?,
        parse(fields[2], "token length")?,
    ))
}

/// Save a reference set to a file
///
/// # Errors
///
/// Returns `CodecError::Create` if the file cannot be created, or
/// `CodecError::Io` if writing fails.
pub fn save_reference_set(path: &Path, set: &ReferenceSet) -> Result<(), CodecError> {
    write_reference_set(create(path)?, set)
}

/// Load a reference set from a file
///
/// # Errors
///
/// Returns `CodecError::Open` if the file cannot be opened, or any error of
/// [`read_reference_set`].
pub fn load_reference_set(path: &Path) -> Result<ReferenceSet, CodecError> {
    read_reference_set(open(path)?)
}
