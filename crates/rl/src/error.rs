//! CLI error types.

use std::path::PathBuf;

use rl_config::ConfigError;
use rl_corpus::CorpusError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Corpus(#[from] CorpusError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} problem(s) found in list directives")]
    Diagnostics(usize),
}
