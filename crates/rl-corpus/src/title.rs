//! Title derivation.
//!
//! Resolution order: frontmatter `title` > metadata `title_override` >
//! metadata `title` > first level 1–3 heading outside the frontmatter block.

use std::sync::LazyLock;

use regex::Regex;

use crate::Document;
use crate::frontmatter;

/// ATX heading of level 1–3 with optional closing `#` sequence.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}#{1,3}[ \t]+(.+?)(?:[ \t]+#+)?[ \t]*$").expect("valid heading regex")
});

/// Derive the display title of a document.
pub(crate) fn derive_title(doc: &Document) -> Option<String> {
    let metadata = doc.metadata();
    [
        doc.frontmatter().get("title"),
        metadata.title_override.as_deref(),
        metadata.title.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|t| !t.is_empty())
    .map(str::to_owned)
    .or_else(|| heading_title(doc.text()))
}

/// Extract the first level 1–3 heading from markdown.
///
/// Skips the leading frontmatter block and fenced code blocks.
///
/// # Example
///
/// ```
/// use rl_corpus::heading_title;
///
/// let md = "---\ntitle: ignored\n---\nIntro\n\n## Setup ##\n";
/// assert_eq!(heading_title(md).as_deref(), Some("Setup"));
/// assert_eq!(heading_title("#### Too deep"), None);
/// ```
#[must_use]
pub fn heading_title(markdown: &str) -> Option<String> {
    let body = &markdown[frontmatter::block_len(markdown)..];
    let mut fence: Option<&str> = None;

    for line in body.lines() {
        let trimmed = line.trim_start();
        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
            }
            continue;
        }
        if trimmed.starts_with("```") {
            fence = Some("```");
            continue;
        }
        if trimmed.starts_with("~~~") {
            fence = Some("~~~");
            continue;
        }
        if let Some(caps) = HEADING_RE.captures(line) {
            let title = caps[1].trim();
            if !title.is_empty() {
                return Some(title.to_owned());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Metadata, SourceDocument};

    fn doc(text: &str, metadata: Metadata) -> Document {
        Document::from_source(SourceDocument::new("~/doc.md", text).with_metadata(metadata))
    }

    #[test]
    fn test_frontmatter_title_wins() {
        let metadata = Metadata {
            title_override: Some("Override".to_owned()),
            title: Some("Meta".to_owned()),
        };
        let d = doc("---\ntitle: From Frontmatter\n---\n# Heading\n", metadata);
        assert_eq!(derive_title(&d).as_deref(), Some("From Frontmatter"));
    }

    #[test]
    fn test_title_override_before_metadata_title() {
        let metadata = Metadata {
            title_override: Some("Override".to_owned()),
            title: Some("Meta".to_owned()),
        };
        let d = doc("# Heading\n", metadata);
        assert_eq!(derive_title(&d).as_deref(), Some("Override"));
    }

    #[test]
    fn test_metadata_title_before_heading() {
        let metadata = Metadata {
            title: Some("Meta".to_owned()),
            ..Metadata::default()
        };
        let d = doc("# Heading\n", metadata);
        assert_eq!(derive_title(&d).as_deref(), Some("Meta"));
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let metadata = Metadata {
            title_override: Some("  ".to_owned()),
            ..Metadata::default()
        };
        let d = doc("---\ntitle:\n---\n### Third Level\n", metadata);
        assert_eq!(derive_title(&d).as_deref(), Some("Third Level"));
    }

    #[test]
    fn test_absent_title() {
        let d = doc("plain text only\n", Metadata::default());
        assert_eq!(derive_title(&d), None);
    }

    #[test]
    fn test_heading_skips_frontmatter_lines() {
        let md = "---\n# not a heading\n---\n# Real\n";
        assert_eq!(heading_title(md).as_deref(), Some("Real"));
    }

    #[test]
    fn test_heading_skips_code_fences() {
        let md = "```bash\n# install deps\n```\n## Usage\n";
        assert_eq!(heading_title(md).as_deref(), Some("Usage"));
    }

    #[test]
    fn test_heading_keeps_hash_inside_text() {
        assert_eq!(heading_title("# C# Basics").as_deref(), Some("C# Basics"));
        assert_eq!(heading_title("# C#").as_deref(), Some("C#"));
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(heading_title("#hashtag\n"), None);
    }

    #[test]
    fn test_heading_level_limit() {
        assert_eq!(heading_title("#### Deep\n# Top\n").as_deref(), Some("Top"));
    }
}
