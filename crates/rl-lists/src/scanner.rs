//! `[!list ...]` directive scanner.
//!
//! A single left-to-right pass over the document text. The cursor tracks the
//! byte offset plus a 1-based line and column so every error can point at the
//! source. Failures are isolated per directive:
//!
//! - running out of input inside a directive ends the scan,
//! - a malformed argument (bad token, missing `=`) drops that directive and
//!   scanning resumes at the failing position,
//! - a bad `depth`/`limit` integer or unknown `style` is reported but the
//!   directive is still produced with that field at its default.

use crate::directive::{DEFAULT_LIMIT, ListDirective, Span};

const MARKER: &str = "[!list";

/// Recoverable scan error with its source position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    /// Human-readable description.
    pub message: String,
    /// Byte offset in the scanned text.
    pub offset: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

/// Directives in source order plus every error met along the way.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Parsed directives in source order.
    pub directives: Vec<ListDirective>,
    /// Scan and format errors in source order.
    pub errors: Vec<ParseError>,
}

/// Scan `text` for `[!list ...]` directives using the default limit.
///
/// # Example
///
/// ```
/// use rl_lists::{ListStyle, scan};
///
/// let result = scan(r#"See also: [!list folder="/x" depth=2 style=number]"#);
/// assert!(result.errors.is_empty());
/// let directive = &result.directives[0];
/// assert_eq!(directive.folder_pattern, "/x");
/// assert_eq!(directive.depth, 2);
/// assert_eq!(directive.style, ListStyle::Numbered);
/// ```
#[must_use]
pub fn scan(text: &str) -> ScanResult {
    scan_with_limit(text, DEFAULT_LIMIT)
}

/// Scan `text`, using `default_limit` for directives that omit `limit`.
#[must_use]
pub fn scan_with_limit(text: &str, default_limit: i32) -> ScanResult {
    let mut result = ScanResult::default();
    let mut cursor = Cursor::new(text);

    while let Some(start) = cursor.find_marker() {
        cursor.advance_to(start);
        let (line, column) = (cursor.line, cursor.column);
        cursor.advance_to(start + MARKER.len());

        let mut directive = ListDirective::with_limit(default_limit);
        match parse_arguments(&mut cursor, &mut directive, &mut result.errors) {
            Ok(()) => {
                let end = cursor.offset;
                directive.span = Span {
                    start,
                    end,
                    line,
                    column,
                    text: text[start..=end].to_owned(),
                };
                cursor.bump();
                result.directives.push(directive);
            }
            Err(Failure::Exhausted(error)) => {
                result.errors.push(error);
                break;
            }
            Err(Failure::Malformed(error)) => result.errors.push(error),
        }
    }

    result
}

enum Failure {
    /// Input ended inside a directive.
    Exhausted(ParseError),
    /// The directive is unusable but scanning can go on.
    Malformed(ParseError),
}

/// Parse `key=value` pairs up to the closing `]`, leaving the cursor on it.
fn parse_arguments(
    cursor: &mut Cursor<'_>,
    directive: &mut ListDirective,
    errors: &mut Vec<ParseError>,
) -> Result<(), Failure> {
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => {
                return Err(Failure::Exhausted(
                    cursor.error("End of input while skipping whitespace"),
                ));
            }
            Some(']') => return Ok(()),
            Some(_) => {}
        }

        let key = read_token(cursor, "key")?;

        cursor.skip_whitespace();
        match cursor.peek() {
            None => {
                return Err(Failure::Exhausted(
                    cursor.error("End of input while advancing to '='"),
                ));
            }
            Some('=') => {
                cursor.bump();
            }
            Some(_) => {
                return Err(Failure::Malformed(
                    cursor.error(&format!("Expected '=' after key '{key}'")),
                ));
            }
        }

        cursor.skip_whitespace();
        if cursor.peek().is_none() {
            return Err(Failure::Exhausted(
                cursor.error("End of input while skipping whitespace after '='"),
            ));
        }

        let value_at = cursor.clone();
        let value = read_token(cursor, "value")?;
        if let Err(e) = directive.apply(key, value) {
            errors.push(value_at.error(&e.to_string()));
        }
    }
}

/// Read a double-quoted string (no escapes) or an identifier.
///
/// Identifiers start with a letter or digit and continue with letters,
/// digits, `_` or `-`.
fn read_token<'a>(cursor: &mut Cursor<'a>, what: &str) -> Result<&'a str, Failure> {
    let text = cursor.text;

    if cursor.peek() == Some('"') {
        cursor.bump();
        let start = cursor.offset;
        loop {
            match cursor.peek() {
                None => {
                    return Err(Failure::Exhausted(
                        cursor.error(&format!("End of input while reading quoted {what}")),
                    ));
                }
                Some('"') => {
                    let token = &text[start..cursor.offset];
                    cursor.bump();
                    return Ok(token);
                }
                Some(_) => {
                    cursor.bump();
                }
            }
        }
    }

    let start = cursor.offset;
    while let Some(c) = cursor.peek() {
        let continues = cursor.offset > start && (c == '_' || c == '-');
        if c.is_alphanumeric() || continues {
            cursor.bump();
        } else {
            break;
        }
    }

    match cursor.peek() {
        None => Err(Failure::Exhausted(
            cursor.error(&format!("End of input while reading {what}")),
        )),
        Some(c) if cursor.offset == start => Err(Failure::Malformed(
            cursor.error(&format!("Expected {what} but found '{c}'")),
        )),
        Some(_) => Ok(&text[start..cursor.offset]),
    }
}

/// Position-tracking cursor over the scanned text.
#[derive(Clone)]
struct Cursor<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn advance_to(&mut self, offset: usize) {
        while self.offset < offset && self.bump().is_some() {}
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Byte offset of the next case-insensitive marker at or after the cursor.
    fn find_marker(&self) -> Option<usize> {
        let marker = MARKER.as_bytes();
        self.text
            .as_bytes()
            .get(self.offset..)?
            .windows(marker.len())
            .position(|window| window.eq_ignore_ascii_case(marker))
            .map(|i| self.offset + i)
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError {
            message: message.to_owned(),
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }
}
