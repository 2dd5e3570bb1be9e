use serde::{Deserialize, Serialize};

/// Naming convention for score matrices.
///
/// Sketching and embedding run the same engine; they differ only in how
/// results are labelled and which file extensions are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SketchKind {
    #[default]
    Sketch,
    Embedding,
}

impl SketchKind {
    /// Singular noun used in log and report messages
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sketch => "sketching",
            Self::Embedding => "embedding",
        }
    }

    /// Extension of score matrix files
    #[must_use]
    pub fn matrix_extension(self) -> &'static str {
        match self {
            Self::Sketch => "sss",
            Self::Embedding => "rssebd",
        }
    }

    /// Prefix of the reference count in generated file names (`n10`, `D10`)
    #[must_use]
    pub fn count_prefix(self) -> &'static str {
        match self {
            Self::Sketch => "n",
            Self::Embedding => "D",
        }
    }

    /// Default output path of the `dist` command
    #[must_use]
    pub fn default_distance_file(self) -> String {
        format!("dist.{}-dist", self.matrix_extension())
    }

    /// Default output path of the `merge` command
    #[must_use]
    pub fn default_merged_file(self) -> String {
        format!("merged.{}", self.matrix_extension())
    }
}

impl std::fmt::Display for SketchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Strategy used to locate reference tokens inside a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Index every token of the target once, then binary search per lookup.
    /// Pays off when many references are scored against the same target.
    #[default]
    Indexed,
    /// Rescan the target for every token. Cheaper for a handful of comparisons.
    Linear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sketch_kind_naming() {
        assert_eq!(SketchKind::Sketch.default_distance_file(), "dist.sss-dist");
        assert_eq!(
            SketchKind::Embedding.default_distance_file(),
            "dist.rssebd-dist"
        );
        assert_eq!(SketchKind::Sketch.default_merged_file(), "merged.sss");
        assert_eq!(SketchKind::Embedding.count_prefix(), "D");
        assert_eq!(SketchKind::Embedding.to_string(), "embedding");
    }
}
