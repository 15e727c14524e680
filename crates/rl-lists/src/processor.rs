//! Per-document and per-corpus list expansion.

use std::fmt;

use rayon::prelude::*;
use rl_corpus::{Corpus, Document};

use crate::directive::DEFAULT_LIMIT;
use crate::{MatchContext, ParseError, PatternCache, find_related, render, scan_with_limit};

/// Problem found while expanding one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Key of the document the problem is in.
    pub key: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    fn from_parse_error(key: &str, error: ParseError) -> Self {
        Self {
            key: key.to_owned(),
            line: error.line,
            column: error.column,
            message: error.message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.key, self.line, self.column, self.message)
    }
}

/// Result of expanding one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedDocument {
    /// Document key.
    pub key: String,
    /// Text with every successfully matched directive replaced.
    pub text: String,
    /// Number of directives replaced.
    pub expanded: usize,
    /// Scan and match problems, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Expands `[!list ...]` directives against a corpus.
///
/// # Example
///
/// ```
/// use rl_corpus::{Corpus, SourceDocument};
/// use rl_lists::ListProcessor;
///
/// let corpus = Corpus::new(vec![
///     SourceDocument::new("~/index.md", "# Home\n\nSee also:[!list]"),
///     SourceDocument::new("~/faq.md", "# FAQ\n"),
/// ])?;
/// let processor = ListProcessor::new(&corpus);
///
/// let home = processor.process_document(corpus.get("~/index.md").unwrap());
/// assert_eq!(home.text, "# Home\n\nSee also:\n\n* [FAQ](~/faq.md)\n\n");
/// assert!(home.diagnostics.is_empty());
/// # Ok::<(), rl_corpus::CorpusError>(())
/// ```
pub struct ListProcessor<'a> {
    corpus: &'a Corpus,
    cache: PatternCache,
    default_limit: i32,
}

impl<'a> ListProcessor<'a> {
    /// Create a processor with a fresh pattern cache.
    #[must_use]
    pub fn new(corpus: &'a Corpus) -> Self {
        Self {
            corpus,
            cache: PatternCache::new(),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Use the given pattern cache.
    #[must_use]
    pub fn with_cache(mut self, cache: PatternCache) -> Self {
        self.cache = cache;
        self
    }

    /// Limit for directives that do not set `limit`.
    #[must_use]
    pub fn with_default_limit(mut self, limit: i32) -> Self {
        self.default_limit = limit;
        self
    }

    /// Pattern cache shared by every document processed so far.
    #[must_use]
    pub fn cache(&self) -> &PatternCache {
        &self.cache
    }

    /// Expand the directives of one document.
    ///
    /// Replacements are spliced left to right and all surrounding text is
    /// kept as is. A directive whose patterns fail to compile stays in the
    /// text untouched and is reported as a diagnostic.
    #[must_use]
    pub fn process_document(&self, doc: &Document) -> ProcessedDocument {
        let key = doc.key();
        let text = doc.text();
        let scanned = scan_with_limit(text, self.default_limit);

        let mut diagnostics: Vec<Diagnostic> = scanned
            .errors
            .into_iter()
            .map(|e| Diagnostic::from_parse_error(key, e))
            .collect();

        let ctx = MatchContext {
            corpus: self.corpus,
            cache: &self.cache,
        };
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut expanded = 0;

        for directive in &scanned.directives {
            let span = &directive.span;
            match find_related(ctx, doc, directive) {
                Ok(related) => {
                    out.push_str(&text[copied..span.start]);
                    out.push_str(&render(
                        directive.style,
                        &related.links,
                        related.truncated,
                        &directive.default_text,
                    ));
                    copied = span.end + 1;
                    expanded += 1;
                }
                Err(e) => diagnostics.push(Diagnostic {
                    key: key.to_owned(),
                    line: span.line,
                    column: span.column,
                    message: e.to_string(),
                }),
            }
        }
        out.push_str(&text[copied..]);

        diagnostics.sort_by_key(|d| (d.line, d.column));
        tracing::debug!(
            document = key,
            expanded,
            problems = diagnostics.len(),
            "Processed document"
        );

        ProcessedDocument {
            key: key.to_owned(),
            text: out,
            expanded,
            diagnostics,
        }
    }

    /// Expand every document of the corpus in parallel.
    ///
    /// Results are returned in corpus order.
    #[must_use]
    pub fn process_corpus(&self) -> Vec<ProcessedDocument> {
        let results: Vec<ProcessedDocument> = self
            .corpus
            .documents()
            .par_iter()
            .map(|doc| self.process_document(doc))
            .collect();

        tracing::info!(
            documents = results.len(),
            patterns = self.cache.len(),
            cache_hits = self.cache.hits(),
            "Expanded list directives"
        );

        results
    }
}
