//! Markdown rendering of matched links.

use std::fmt::Write;

use crate::ListStyle;

/// A matched document projected for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkToArticle {
    /// Derived title, if the document has one.
    pub title: Option<String>,
    /// Link target (the document key).
    pub href: String,
}

impl LinkToArticle {
    /// Create a link.
    #[must_use]
    pub fn new(title: Option<String>, href: impl Into<String>) -> Self {
        Self {
            title,
            href: href.into(),
        }
    }

    /// Text shown for the link: the title, or the href when there is none.
    #[must_use]
    pub fn label(&self) -> &str {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title,
            _ => &self.href,
        }
    }
}

/// Render links as a markdown list.
///
/// With no links the result is `"\n{default_text}\n"`, or empty when there is
/// no default text. Otherwise the list is framed by a leading blank line and a
/// trailing newline, and a `...` placeholder line marks a truncated list.
///
/// # Example
///
/// ```
/// use rl_lists::{LinkToArticle, ListStyle, render};
///
/// let links = [LinkToArticle::new(Some("Install".to_owned()), "~/install.md")];
/// assert_eq!(
///     render(ListStyle::Numbered, &links, true, ""),
///     "\n\n1. [Install](~/install.md)\n2. ...\n\n"
/// );
/// ```
#[must_use]
pub fn render(style: ListStyle, links: &[LinkToArticle], truncated: bool, default_text: &str) -> String {
    if links.is_empty() {
        return if default_text.is_empty() {
            String::new()
        } else {
            format!("\n{default_text}\n")
        };
    }

    let mut out = String::from("\n\n");
    for (i, link) in links.iter().enumerate() {
        let _ = writeln!(out, "{}[{}]({})", marker(style, i + 1), link.label(), link.href);
    }
    if truncated {
        let _ = writeln!(out, "{}...", marker(style, links.len() + 1));
    }
    out.push('\n');
    out
}

/// Line prefix for the `n`th (1-based) item.
fn marker(style: ListStyle, n: usize) -> String {
    match style {
        ListStyle::Bullet => "* ".to_owned(),
        ListStyle::Numbered => format!("{n}. "),
        ListStyle::Heading => "## ".to_owned(),
    }
}
