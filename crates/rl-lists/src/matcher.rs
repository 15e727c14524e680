//! Matching engine: selects the documents a directive links to.
//!
//! Filters run in a fixed order: folder, exclude (always including the
//! current document), depth, filename, frontmatter conditions. The survivors
//! are truncated to the limit in corpus order and only then sorted by title.

use rl_corpus::{Corpus, Document};

use crate::glob::{GlobMode, PatternCache};
use crate::path::{append_keys, depth_between, directory_name, file_name, is_within, rooted_dir};
use crate::{LinkToArticle, ListDirective, ListError};

/// Read-only state shared by every match in one build.
#[derive(Clone, Copy)]
pub struct MatchContext<'a> {
    /// Documents to choose from.
    pub corpus: &'a Corpus,
    /// Compiled glob cache.
    pub cache: &'a PatternCache,
}

/// Links selected for one directive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Related {
    /// Links sorted by title.
    pub links: Vec<LinkToArticle>,
    /// More documents matched than the limit allowed.
    pub truncated: bool,
}

/// Find the documents related to `current` according to `directive`.
///
/// # Errors
///
/// Returns [`ListError::InvalidPattern`] if one of the directive's globs
/// cannot be compiled.
///
/// # Example
///
/// ```
/// use rl_corpus::{Corpus, SourceDocument};
/// use rl_lists::{MatchContext, PatternCache, find_related, scan};
///
/// let corpus = Corpus::new(vec![
///     SourceDocument::new("~/guide/index.md", "# Guide\n"),
///     SourceDocument::new("~/guide/setup.md", "# Setup\n"),
///     SourceDocument::new("~/guide/usage.md", "# Usage\n"),
/// ])?;
/// let cache = PatternCache::new();
/// let ctx = MatchContext { corpus: &corpus, cache: &cache };
///
/// let directive = &scan(r#"[!list folder="."]"#).directives[0];
/// let current = corpus.get("~/guide/index.md").unwrap();
/// let related = find_related(ctx, current, directive)?;
///
/// let hrefs: Vec<_> = related.links.iter().map(|l| l.href.as_str()).collect();
/// assert_eq!(hrefs, ["~/guide/setup.md", "~/guide/usage.md"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn find_related(
    ctx: MatchContext<'_>,
    current: &Document,
    directive: &ListDirective,
) -> Result<Related, ListError> {
    let current_key = current.key();
    let current_dir = rooted_dir(current_key);
    let mut candidates: Vec<(usize, &Document)> =
        ctx.corpus.documents().iter().enumerate().collect();

    let folder = directive.folder_pattern.as_str();
    if folder == "*" || folder == "." {
        candidates.retain(|(_, doc)| is_within(current_dir, rooted_dir(doc.key())));
    } else if !folder.is_empty() {
        let glob = resolve_folder(folder, current_dir);
        let re = ctx.cache.get_or_compile(GlobMode::Prefix, &glob)?;
        candidates.retain(|(_, doc)| re.is_match(rooted_dir(doc.key())));
    }

    candidates.retain(|(_, doc)| doc.key() != current_key);
    if !directive.exclude_pattern.is_empty() {
        let re = ctx
            .cache
            .get_or_compile(GlobMode::Unanchored, &directive.exclude_pattern)?;
        candidates.retain(|(_, doc)| !re.is_match(directory_name(doc.key())));
    }

    if directive.depth > 0 {
        let max = directive.depth;
        candidates.retain(|(_, doc)| (0..=max).contains(&depth_between(doc.key(), current_key)));
    }

    let file = directive.file_pattern.as_str();
    if !file.is_empty() && file != "*" {
        let re = ctx.cache.get_or_compile(GlobMode::Full, file)?;
        candidates.retain(|(_, doc)| re.is_match(file_name(doc.key())));
    }

    let conditions = directive
        .conditions
        .iter()
        .map(|(variable, value)| (variable.as_str(), value.as_str()));
    if let Some(allowed) = ctx.corpus.index().documents_matching_all(conditions) {
        candidates.retain(|(position, _)| allowed.contains(position));
    }

    let mut truncated = false;
    if let Ok(limit) = usize::try_from(directive.limit)
        && limit > 0
    {
        truncated = candidates.len() > limit;
        candidates.truncate(limit);
    }

    let mut links: Vec<LinkToArticle> = candidates
        .into_iter()
        .map(|(_, doc)| LinkToArticle::new(doc.title(), doc.key()))
        .collect();
    links.sort_by(|a, b| {
        a.title
            .as_deref()
            .unwrap_or_default()
            .cmp(b.title.as_deref().unwrap_or_default())
    });

    tracing::debug!(
        document = current_key,
        matches = links.len(),
        truncated,
        "Matched list directive"
    );

    Ok(Related { links, truncated })
}

/// Turn a folder glob into an absolute `~/...` glob.
fn resolve_folder(folder: &str, current_dir: &str) -> String {
    let absolute = if folder.starts_with("~/") || folder == "~" {
        folder.to_owned()
    } else if folder.starts_with('/') {
        format!("~{folder}")
    } else {
        append_keys(current_dir, folder)
    };
    match absolute.trim_end_matches('/') {
        "" | "~" => "~".to_owned(),
        trimmed => trimmed.to_owned(),
    }
}
