//! The document corpus of one build pass.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::document::is_valid_key;
use crate::{CorpusError, Document, FrontmatterIndex, SourceDocument};

/// Immutable set of documents plus their frontmatter index.
///
/// Construction runs in two phases: frontmatter is parsed for every document
/// in parallel, then the [`FrontmatterIndex`] is merged on the calling thread.
/// After that the corpus is only read, so it can be shared across threads.
#[derive(Debug, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    positions: HashMap<String, usize>,
    index: FrontmatterIndex,
}

impl Corpus {
    /// Build a corpus from source documents, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::InvalidKey`] for keys not rooted at `~/` and
    /// [`CorpusError::DuplicateKey`] when two documents share a key.
    pub fn new(sources: Vec<SourceDocument>) -> Result<Self, CorpusError> {
        let mut positions = HashMap::with_capacity(sources.len());
        for (position, source) in sources.iter().enumerate() {
            if !is_valid_key(&source.key) {
                return Err(CorpusError::InvalidKey(source.key.clone()));
            }
            if positions.insert(source.key.clone(), position).is_some() {
                return Err(CorpusError::DuplicateKey(source.key.clone()));
            }
        }

        let documents: Vec<Document> = sources
            .into_par_iter()
            .map(Document::from_source)
            .collect();

        let index = FrontmatterIndex::build(documents.iter().map(Document::frontmatter));

        tracing::debug!(
            documents = documents.len(),
            pairs = index.len(),
            "Built frontmatter index"
        );

        Ok(Self {
            documents,
            positions,
            index,
        })
    }

    /// All documents in corpus order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by key (exact match).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.position(key).map(|p| &self.documents[p])
    }

    /// Position of a document in [`documents`](Self::documents).
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Frontmatter index over all documents.
    #[must_use]
    pub fn index(&self) -> &FrontmatterIndex {
        &self.index
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
