//! Document corpus for RL list expansion.
//!
//! This crate holds everything the list matcher reads during one build pass:
//!
//! - [`Document`]: a markdown document addressed by a `~/dir/file.md` key
//! - [`Frontmatter`]: case-insensitive `key: value` pairs from the leading `---` block
//! - [`Metadata`]: optional YAML sidecar carrying title overrides
//! - [`FrontmatterIndex`]: `(variable, value)` pairs mapped to the documents carrying them
//! - [`Corpus`]: the immutable document set plus its index
//! - [`CorpusLoader`]: builds a corpus from a directory of markdown files
//!
//! # Example
//!
//! ```
//! use rl_corpus::{Corpus, SourceDocument};
//!
//! let corpus = Corpus::new(vec![
//!     SourceDocument::new("~/guide/install.md", "---\nstatus: active\n---\n# Install\n"),
//!     SourceDocument::new("~/guide/usage.md", "# Usage\n"),
//! ])
//! .unwrap();
//!
//! let install = corpus.get("~/guide/install.md").unwrap();
//! assert_eq!(install.title().as_deref(), Some("Install"));
//! assert_eq!(corpus.index().documents_with("Status", "ACTIVE").map(|s| s.len()), Some(1));
//! ```

mod corpus;
mod document;
mod error;
mod frontmatter;
mod index;
mod loader;
mod metadata;
mod title;

pub use corpus::Corpus;
pub use document::{Document, ROOT_MARKER, SourceDocument};
pub use error::CorpusError;
pub use frontmatter::{Frontmatter, FrontmatterPair};
pub use index::FrontmatterIndex;
pub use loader::CorpusLoader;
pub use metadata::{Metadata, MetadataError};
pub use title::heading_title;
