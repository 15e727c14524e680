//! `[!list ...]` directive expansion.
//!
//! A directive embedded in a markdown document is replaced by a generated list
//! of links to related documents of the same corpus:
//!
//! ```text
//! [!list folder="/api" file="*.md" depth=2 limit=5 style=number status=stable]
//! ```
//!
//! # Pipeline
//!
//! 1. [`scan`] finds directives and parses their arguments, collecting
//!    recoverable [`ParseError`]s.
//! 2. [`find_related`] filters the corpus by folder, exclusion, depth,
//!    filename and frontmatter conditions, then truncates and sorts.
//! 3. [`render`] turns the matches into a bullet, numbered or heading list.
//!
//! [`ListProcessor`] ties the steps together for one document or, in
//! parallel, for a whole corpus.
//!
//! # Recognized keys
//!
//! | Key | Meaning | Default |
//! |-----|---------|---------|
//! | `file` | filename glob | `*` |
//! | `folder` | folder glob; `.` or `*` for the current folder | none |
//! | `exclude` | directory-name glob to skip | none |
//! | `depth` | max nesting distance from the current document | `-1` (any) |
//! | `limit` | max number of links, `<= 0` for no limit | `10` |
//! | `style` | `bullet`, `number` or `heading` | `bullet` |
//! | `default-text` | text when nothing matches | empty |
//!
//! Any other key is a frontmatter condition.

mod directive;
mod error;
mod glob;
mod matcher;
mod path;
mod processor;
mod render;
mod scanner;

pub use directive::{DEFAULT_LIMIT, ListDirective, ListStyle, Span, UnknownStyle};
pub use error::{DirectiveError, ListError};
pub use glob::{GlobMode, PatternCache, compile_glob, glob_to_regex};
pub use matcher::{MatchContext, Related, find_related};
pub use path::{append_keys, depth_between, directory_name, file_name, rooted_dir};
pub use processor::{Diagnostic, ListProcessor, ProcessedDocument};
pub use render::{LinkToArticle, render};
pub use scanner::{ParseError, ScanResult, scan, scan_with_limit};
