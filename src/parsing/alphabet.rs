//! Alphabet files: the first line lists every permissible symbol.

use std::io::BufRead;
use std::path::Path;

use crate::parsing::fasta::ParseError;

/// Read the alphabet from the first line of a file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::InvalidFormat` if the first line is missing or empty.
pub fn read_alphabet(path: &Path) -> Result<Vec<u8>, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_alphabet(std::io::BufReader::new(file)).ok_or_else(|| {
        ParseError::InvalidFormat(format!("Could not read alphabet from {}", path.display()))
    })
}

/// First line of `reader` without its line terminator, `None` if empty
fn parse_alphabet<R: BufRead>(mut reader: R) -> Option<Vec<u8>> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).ok()?;

    while matches!(line.last(), Some(b'\n' | b'\r')) {
        line.pop();
    }

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}
