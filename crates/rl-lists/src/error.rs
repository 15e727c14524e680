//! List expansion error types.

use crate::UnknownStyle;

/// Invalid value for a recognized directive argument.
///
/// These are soft errors: the scanner reports them and the directive keeps
/// the default for the affected field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// `depth` or `limit` is not a base-10 integer.
    #[error("invalid {field} '{value}': expected an integer")]
    InvalidInteger {
        /// Argument name (`depth` or `limit`).
        field: &'static str,
        /// Value as written.
        value: String,
    },
    /// `style` is not one of the known list styles.
    #[error(transparent)]
    UnknownStyle(#[from] UnknownStyle),
}

/// Error raised while matching a directive against the corpus.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// A glob could not be compiled.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Glob as written in the directive (after folder resolution).
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}
