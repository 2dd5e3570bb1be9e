//! Limits on user-supplied counts, output naming and checks on paths.

use std::path::{Path, PathBuf};

use crate::core::reference_set::ReferenceSet;
use crate::core::types::SketchKind;

/// Maximum number of reference subsequences in one set
pub const MAX_SUBSEQUENCES: usize = 10_000_000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Too many subsequences: {0} exceeds the maximum of {MAX_SUBSEQUENCES}")]
    TooManySubsequences(usize),
    #[error("Output directory does not exist: {0}")]
    MissingDirectory(PathBuf),
    #[error("Output path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Input path has no file name: {0}")]
    NoFileName(PathBuf),
}

/// Check that a set may hold `count` subsequences.
///
/// Call this with the final count BEFORE allocating or generating anything.
///
/// # Errors
///
/// Returns `ValidationError::TooManySubsequences` above [`MAX_SUBSEQUENCES`].
pub fn check_subsequence_limit(count: usize) -> Result<(), ValidationError> {
    if count > MAX_SUBSEQUENCES {
        return Err(ValidationError::TooManySubsequences(count));
    }
    Ok(())
}

/// Check that an output directory exists and is a directory.
///
/// # Errors
///
/// Returns `ValidationError::MissingDirectory` or
/// `ValidationError::NotADirectory`.
pub fn validate_output_dir(dir: &Path) -> Result<(), ValidationError> {
    if !dir.exists() {
        return Err(ValidationError::MissingDirectory(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ValidationError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}

/// Path of the score matrix written for `input`.
///
/// The last extension of the input is replaced by
/// `<prefix><count>.l<num_tokens>.t<token_len>.<ext>`, e.g. `reads.fa` becomes
/// `reads.n100.l5.t2.sss`. The file lands next to the input unless `out_dir`
/// is given.
///
/// ```
/// use std::path::Path;
/// use subseq_sketch::core::{ReferenceSet, SketchKind};
/// use subseq_sketch::utils::validation::matrix_output_path;
///
/// let set = ReferenceSet::new(5, 2).unwrap();
/// let path = matrix_output_path(Path::new("data/reads.fa"), SketchKind::Sketch, &set, None).unwrap();
/// assert_eq!(path, Path::new("data/reads.n0.l5.t2.sss"));
/// ```
///
/// # Errors
///
/// Returns `ValidationError::NoFileName` if `input` ends in `..` or is empty.
pub fn matrix_output_path(
    input: &Path,
    kind: SketchKind,
    references: &ReferenceSet,
    out_dir: Option<&Path>,
) -> Result<PathBuf, ValidationError> {
    let file_name = input
        .file_name()
        .ok_or_else(|| ValidationError::NoFileName(input.to_path_buf()))?;

    let extension = format!(
        "{}{}.l{}.t{}.{}",
        kind.count_prefix(),
        references.len(),
        references.num_tokens(),
        references.token_len(),
        kind.matrix_extension()
    );

    let target = match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.to_path_buf(),
    };
    Ok(target.with_extension(extension))
}

/// `path` with `.npy` appended to its full name
#[must_use]
pub fn npy_output_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".npy");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::SubsequenceSampler;

    fn references() -> ReferenceSet {
        SubsequenceSampler::seeded(5, 2, 3)
            .unwrap()
            .generate_from_alphabet(b"ACGT", 10)
            .unwrap()
    }

    #[test]
    fn test_subsequence_limit() {
        assert!(check_subsequence_limit(0).is_ok());
        assert!(check_subsequence_limit(MAX_SUBSEQUENCES).is_ok());
        assert_eq!(
            check_subsequence_limit(MAX_SUBSEQUENCES + 1),
            Err(ValidationError::TooManySubsequences(MAX_SUBSEQUENCES + 1))
        );
        assert!(check_subsequence_limit(usize::MAX).is_err());
    }

    #[test]
    fn test_sketch_output_path() {
        let path =
            matrix_output_path(Path::new("reads.fa"), SketchKind::Sketch, &references(), None)
                .unwrap();
        assert_eq!(path, PathBuf::from("reads.n10.l5.t2.sss"));
    }

    #[test]
    fn test_embedding_output_path() {
        let path = matrix_output_path(
            Path::new("/data/reads.fasta.gz"),
            SketchKind::Embedding,
            &references(),
            None,
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/data/reads.fasta.D10.l5.t2.rssebd"));
    }

    #[test]
    fn test_output_dir_replaces_parent() {
        let path = matrix_output_path(
            Path::new("/data/reads.fa"),
            SketchKind::Sketch,
            &references(),
            Some(Path::new("/out")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/out/reads.n10.l5.t2.sss"));
    }

    #[test]
    fn test_input_without_file_name() {
        assert!(matches!(
            matrix_output_path(Path::new(".."), SketchKind::Sketch, &references(), None),
            Err(ValidationError::NoFileName(_))
        ));
    }

    #[test]
    fn test_npy_output_path() {
        assert_eq!(
            npy_output_path(Path::new("dist.sss-dist")),
            PathBuf::from("dist.sss-dist.npy")
        );
    }

    #[test]
    fn test_validate_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_output_dir(dir.path()).is_ok());

        let missing = dir.path().join("missing");
        assert_eq!(
            validate_output_dir(&missing),
            Err(ValidationError::MissingDirectory(missing.clone()))
        );

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert_eq!(
            validate_output_dir(&file),
            Err(ValidationError::NotADirectory(file.clone()))
        );
    }
}
