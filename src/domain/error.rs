// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the core can surface. The application layer
// wraps these in anyhow with extra context; nothing in the
// core retries or swallows them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Neither corpus directory contained a matching image
    #[error("No images found in '{concept_dir}' or '{no_concept_dir}'")]
    EmptyCorpus {
        concept_dir:    PathBuf,
        no_concept_dir: PathBuf,
    },

    /// Input shape was not three positive dimensions
    #[error("Invalid input shape {0:?}: expected three positive dimensions")]
    InvalidShape(Vec<i64>),

    /// Training or loading parameters rejected before any work started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The artifact could not be written; nothing was left at the target path
    #[error("Cannot persist artifact to '{path}': {source}")]
    Persistence {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact not found at '{0}'. Have you run 'train' first?")]
    ArtifactNotFound(PathBuf),

    #[error("Cannot read artifact '{path}': {source}")]
    ArtifactRead {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact '{path}' is corrupt: {reason}")]
    ArtifactParse {
        path:   PathBuf,
        reason: String,
    },

    /// Walking a corpus directory failed part-way
    #[error("Cannot scan '{path}': {source}")]
    Scan {
        path:   PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Result alias used by every core module.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = PipelineError::ArtifactNotFound(PathBuf::from("models/cats.json"));
        assert!(err.to_string().contains("models/cats.json"));

        let err = PipelineError::InvalidShape(vec![224, 0, 3]);
        assert!(err.to_string().contains("[224, 0, 3]"));
    }
}
