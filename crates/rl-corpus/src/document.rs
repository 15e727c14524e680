//! Documents and their keys.
//!
//! # Key Convention
//!
//! Every document is addressed by a hierarchical key rooted at `~`:
//! - `~/index.md` - file at the corpus root
//! - `~/guide/install.md` - nested file
//!
//! Keys always use `/` separators regardless of platform.

use crate::{Frontmatter, Metadata, title};

/// Root marker every document key starts with.
pub const ROOT_MARKER: &str = "~";

/// Raw input for one document, before frontmatter parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceDocument {
    /// Document key (e.g., `~/guide/install.md`).
    pub key: String,
    /// Raw markdown text.
    pub text: String,
    /// Sidecar metadata, if any.
    pub metadata: Metadata,
}

impl SourceDocument {
    /// Create a source document without metadata.
    #[must_use]
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            metadata: Metadata::default(),
        }
    }

    /// Attach sidecar metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A document in the corpus.
///
/// Immutable once the corpus is built.
#[derive(Debug, PartialEq, Eq)]
pub struct Document {
    key: String,
    text: String,
    frontmatter: Frontmatter,
    metadata: Metadata,
}

impl Document {
    /// Build a document, parsing the frontmatter block from its text.
    #[must_use]
    pub fn from_source(source: SourceDocument) -> Self {
        let frontmatter = Frontmatter::parse(&source.text);
        Self {
            key: source.key,
            text: source.text,
            frontmatter,
            metadata: source.metadata,
        }
    }

    /// Document key (e.g., `~/guide/install.md`).
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw markdown text, including the frontmatter block.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed frontmatter.
    #[must_use]
    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    /// Sidecar metadata.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Derived display title, `None` when nothing provides one.
    ///
    /// Resolution: frontmatter `title` > metadata `title_override` >
    /// metadata `title` > first level 1–3 heading.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        title::derive_title(self)
    }
}

/// Whether `key` follows the `~/...` key convention.
pub(crate) fn is_valid_key(key: &str) -> bool {
    key.strip_prefix(ROOT_MARKER)
        .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source_parses_frontmatter() {
        let doc = Document::from_source(SourceDocument::new(
            "~/a.md",
            "---\nowner: billing\n---\nBody\n",
        ));
        assert_eq!(doc.key(), "~/a.md");
        assert_eq!(doc.frontmatter().get("owner"), Some("billing"));
        assert!(doc.text().ends_with("Body\n"));
    }

    #[test]
    fn test_title_falls_through_to_heading() {
        let doc = Document::from_source(SourceDocument::new("~/a.md", "# Alpha\n"));
        assert_eq!(doc.title().as_deref(), Some("Alpha"));
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("~/a.md"));
        assert!(is_valid_key("~/dir/sub/file.md"));
        assert!(!is_valid_key("~"));
        assert!(!is_valid_key("~/"));
        assert!(!is_valid_key("docs/a.md"));
        assert!(!is_valid_key("/a.md"));
        assert!(!is_valid_key("~a.md"));
    }
}
