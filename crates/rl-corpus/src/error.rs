//! Corpus error types.

use std::path::PathBuf;

/// Error raised while assembling or loading a corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// Filesystem access failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Document key does not start with the `~` root marker.
    #[error("invalid document key '{0}': keys must start with '~/'")]
    InvalidKey(String),
    /// Two documents share the same key.
    #[error("duplicate document key '{0}'")]
    DuplicateKey(String),
    /// Source directory does not exist.
    #[error("source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
