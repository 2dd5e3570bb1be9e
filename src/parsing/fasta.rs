//! Sequence reader for FASTA files using noodles.
//!
//! Header lines are skipped; the sequence lines of each record are joined and
//! returned as raw bytes. Supports both uncompressed and gzip/bgzip compressed
//! files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Lazy iterator over the sequences of one FASTA file.
///
/// Sequences are produced in file order and the iterator cannot be restarted.
pub struct FastaSequences {
    path: PathBuf,
    reader: fasta::io::Reader<Box<dyn BufRead>>,
    definition: String,
}

impl FastaSequences {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for FastaSequences {
    type Item = Result<Vec<u8>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.definition.clear();
        match self.reader.read_definition(&mut self.definition) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => {
                return Some(Err(ParseError::Noodles(format!(
                    "Failed to parse FASTA record in {}: {e}",
                    self.path.display()
                ))));
            }
        }

        let mut sequence = Vec::new();
        Some(
            self.reader
                .read_sequence(&mut sequence)
                .map(|_| sequence)
                .map_err(|e| {
                    ParseError::Noodles(format!(
                        "Failed to parse FASTA sequence in {}: {e}",
                        self.path.display()
                    ))
                }),
        )
    }
}

/// Open a FASTA file for lazy reading.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, or
/// `ParseError::InvalidFormat` if it does not start with a `>` record marker.
pub fn open_fasta(path: &Path) -> Result<FastaSequences, ParseError> {
    let file = File::open(path)?;
    let mut inner: Box<dyn BufRead> = if is_gzipped(path) {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    if inner.fill_buf()?.first() != Some(&b'>') {
        return Err(ParseError::InvalidFormat(format!(
            "{} does not appear to be a valid FASTA file",
            path.display()
        )));
    }

    Ok(FastaSequences {
        path: path.to_path_buf(),
        reader: fasta::io::Reader::new(inner),
        definition: String::new(),
    })
}

/// Read every sequence of a FASTA file into memory, in file order.
///
/// # Errors
///
/// Returns the same errors as [`open_fasta`], plus `ParseError::Noodles` if a
/// record cannot be parsed.
pub fn read_sequences(path: &Path) -> Result<Vec<Vec<u8>>, ParseError> {
    open_fasta(path)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fasta_file(content: &[u8]) -> NamedTempFile {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(content).unwrap();
        temp.flush().unwrap();
        temp
    }

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("test.fa.gz")));
        assert!(is_gzipped(Path::new("test.fna.BGZ")));
        assert!(!is_gzipped(Path::new("test.fa")));
    }

    #[test]
    fn test_read_sequences_joins_lines() {
        let temp = fasta_file(b">chr1 description\nACGTACGT\nACGT\n>chr2\nGGGG\n");

        let sequences = read_sequences(temp.path()).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0], b"ACGTACGTACGT");
        assert_eq!(sequences[1], b"GGGG");
    }

    #[test]
    fn test_sequences_are_lazy_and_ordered() {
        let temp = fasta_file(b">a\nAC\n>b\nGT\n>c\nTT\n");

        let mut reader = open_fasta(temp.path()).unwrap();
        assert_eq!(reader.path(), temp.path());
        assert_eq!(reader.next().unwrap().unwrap(), b"AC");
        assert_eq!(reader.next().unwrap().unwrap(), b"GT");
        assert_eq!(reader.next().unwrap().unwrap(), b"TT");
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_missing_record_marker_rejected() {
        let temp = fasta_file(b"ACGT\n>chr1\nACGT\n");
        assert!(matches!(
            open_fasta(temp.path()),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_file_rejected() {
        let temp = fasta_file(b"");
        assert!(matches!(
            read_sequences(temp.path()),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            open_fasta(Path::new("/nonexistent/input.fa")),
            Err(ParseError::Io(_))
        ));
    }

    #[test]
    fn test_gzipped_fasta() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">chr1\nACGT\nAC\n").unwrap();
        temp.write_all(&encoder.finish().unwrap()).unwrap();
        temp.flush().unwrap();

        let sequences = read_sequences(temp.path()).unwrap();
        assert_eq!(sequences, vec![b"ACGTAC".to_vec()]);
    }
}
