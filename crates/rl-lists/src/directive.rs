//! Parsed `[!list ...]` directive.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::DirectiveError;

/// Limit used when a directive does not set `limit`.
pub const DEFAULT_LIMIT: i32 = 10;

/// Output style of a generated list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ListStyle {
    /// `* [Title](href)`
    #[default]
    Bullet,
    /// `1. [Title](href)`
    Numbered,
    /// `## [Title](href)`
    Heading,
}

/// Unrecognized `style` value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown list style '{0}' (expected bullet, number or heading)")]
pub struct UnknownStyle(pub String);

impl FromStr for ListStyle {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bullet" => Ok(Self::Bullet),
            "number" => Ok(Self::Numbered),
            "heading" => Ok(Self::Heading),
            _ => Err(UnknownStyle(s.to_owned())),
        }
    }
}

impl fmt::Display for ListStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bullet => "bullet",
            Self::Numbered => "number",
            Self::Heading => "heading",
        })
    }
}

/// Location of a directive in the document text.
///
/// `start` is the byte offset of `[` and `end` the byte offset of the closing
/// `]`, both inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of `[`.
    pub start: usize,
    /// Byte offset of `]`.
    pub end: usize,
    /// 1-based line of `[`.
    pub line: usize,
    /// 1-based column of `[`.
    pub column: usize,
    /// Exact directive text, `[` through `]`.
    pub text: String,
}

impl Span {
    /// Half-open byte range covering the directive.
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end + 1
    }
}

/// One `[!list ...]` occurrence with its arguments applied over the defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListDirective {
    /// Filename glob (`file=`).
    pub file_pattern: String,
    /// Folder glob (`folder=`); empty means any folder.
    pub folder_pattern: String,
    /// Directory-name glob to exclude (`exclude=`).
    pub exclude_pattern: String,
    /// Maximum depth below the current document; `-1` is unbounded.
    pub depth: i32,
    /// Maximum number of links; `<= 0` is unbounded.
    pub limit: i32,
    /// Output style.
    pub style: ListStyle,
    /// Text rendered when nothing matches.
    pub default_text: String,
    /// Required frontmatter values, keyed by lower-cased variable name.
    pub conditions: BTreeMap<String, String>,
    /// Where the directive appears in the source.
    pub span: Span,
}

impl Default for ListDirective {
    fn default() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }
}

impl ListDirective {
    /// Directive with every field at its default and the given limit.
    #[must_use]
    pub fn with_limit(limit: i32) -> Self {
        Self {
            file_pattern: "*".to_owned(),
            folder_pattern: String::new(),
            exclude_pattern: String::new(),
            depth: -1,
            limit,
            style: ListStyle::Bullet,
            default_text: String::new(),
            conditions: BTreeMap::new(),
            span: Span::default(),
        }
    }

    /// Apply one `key=value` argument.
    ///
    /// Keys are case-insensitive. Unknown keys become frontmatter conditions,
    /// the last value for a repeated key wins.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::InvalidInteger`] when `depth`/`limit` is not
    /// a base-10 integer and [`DirectiveError::UnknownStyle`] for an unknown
    /// `style`. The field keeps its previous value.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), DirectiveError> {
        match key.to_lowercase().as_str() {
            "file" => self.file_pattern = value.to_owned(),
            "folder" => self.folder_pattern = value.to_owned(),
            "exclude" => self.exclude_pattern = value.to_owned(),
            "depth" => self.depth = parse_int("depth", value)?,
            "limit" => self.limit = parse_int("limit", value)?,
            "style" => self.style = value.parse::<ListStyle>()?,
            "default-text" => self.default_text = value.to_owned(),
            other => {
                self.conditions.insert(other.to_owned(), value.to_owned());
            }
        }
        Ok(())
    }
}

fn parse_int(field: &'static str, value: &str) -> Result<i32, DirectiveError> {
    value.parse().map_err(|_| DirectiveError::InvalidInteger {
        field,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let d = ListDirective::default();
        assert_eq!(d.file_pattern, "*");
        assert_eq!(d.folder_pattern, "");
        assert_eq!(d.exclude_pattern, "");
        assert_eq!(d.depth, -1);
        assert_eq!(d.limit, 10);
        assert_eq!(d.style, ListStyle::Bullet);
        assert_eq!(d.default_text, "");
        assert!(d.conditions.is_empty());
    }

    #[test]
    fn test_apply_known_keys_case_insensitive() {
        let mut d = ListDirective::default();
        d.apply("FILE", "*.md").unwrap();
        d.apply("Folder", "/api").unwrap();
        d.apply("exclude", "internal").unwrap();
        d.apply("Depth", "2").unwrap();
        d.apply("LIMIT", "0").unwrap();
        d.apply("style", "Heading").unwrap();
        d.apply("Default-Text", "Nothing yet").unwrap();

        assert_eq!(d.file_pattern, "*.md");
        assert_eq!(d.folder_pattern, "/api");
        assert_eq!(d.exclude_pattern, "internal");
        assert_eq!(d.depth, 2);
        assert_eq!(d.limit, 0);
        assert_eq!(d.style, ListStyle::Heading);
        assert_eq!(d.default_text, "Nothing yet");
        assert!(d.conditions.is_empty());
    }

    #[test]
    fn test_apply_unknown_key_is_condition() {
        let mut d = ListDirective::default();
        d.apply("Status", "Active").unwrap();
        d.apply("status", "Draft").unwrap();
        assert_eq!(d.conditions.len(), 1);
        assert_eq!(d.conditions.get("status").map(String::as_str), Some("Draft"));
    }

    #[test]
    fn test_apply_bad_integer_keeps_default() {
        let mut d = ListDirective::default();
        let err = d.apply("depth", "deep").unwrap_err();
        assert_eq!(
            err,
            DirectiveError::InvalidInteger {
                field: "depth",
                value: "deep".to_owned(),
            }
        );
        assert_eq!(err.to_string(), "invalid depth 'deep': expected an integer");
        assert_eq!(d.depth, -1);
    }

    #[test]
    fn test_apply_unknown_style_keeps_default() {
        let mut d = ListDirective::default();
        let err = d.apply("style", "table").unwrap_err();
        assert_eq!(
            err,
            DirectiveError::UnknownStyle(UnknownStyle("table".to_owned()))
        );
        assert!(err.to_string().contains("'table'"));
        assert_eq!(d.style, ListStyle::Bullet);
    }

    #[test]
    fn test_style_roundtrip_names() {
        for style in [ListStyle::Bullet, ListStyle::Numbered, ListStyle::Heading] {
            assert_eq!(style.to_string().parse::<ListStyle>(), Ok(style));
        }
        assert_eq!("NUMBER".parse::<ListStyle>(), Ok(ListStyle::Numbered));
    }

    #[test]
    fn test_span_range() {
        let span = Span {
            start: 3,
            end: 9,
            ..Span::default()
        };
        assert_eq!(span.range(), 3..10);
    }
}
