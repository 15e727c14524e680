//! Leading `---` frontmatter block.
//!
//! This is a line splitter, not a YAML parser: each line inside the block is
//! split at its first `:` into a trimmed `key` and `value`. Variable names are
//! case-insensitive; values keep their spelling for display and are compared
//! case-insensitively.

use std::collections::BTreeMap;

const DELIMITER: &str = "---";

/// Case-insensitive `(variable, value)` pairs from a document's frontmatter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Lower-cased variable name → value as written.
    values: BTreeMap<String, String>,
}

/// Normalized `(variable, value)` pair used as a [`FrontmatterIndex`](crate::FrontmatterIndex) key.
///
/// Both components are lower-cased, so equality is case-insensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrontmatterPair {
    variable: String,
    value: String,
}

impl FrontmatterPair {
    /// Create a normalized pair.
    #[must_use]
    pub fn new(variable: &str, value: &str) -> Self {
        Self {
            variable: variable.to_lowercase(),
            value: value.to_lowercase(),
        }
    }

    /// Lower-cased variable name.
    #[must_use]
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Lower-cased value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Frontmatter {
    /// Parse the frontmatter block at the start of `text`.
    ///
    /// The first line must start with `---` and the block must be closed by a
    /// later line starting with `---`. Anything else (no opener, unclosed block)
    /// yields empty frontmatter. Lines without a `:` are ignored; a repeated
    /// variable keeps the last value.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines();
        match lines.next() {
            Some(first) if first.starts_with(DELIMITER) => {}
            _ => return Self::default(),
        }

        let mut values = BTreeMap::new();
        for line in lines {
            if line.starts_with(DELIMITER) {
                return Self { values };
            }
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    values.insert(key.to_lowercase(), unquote(value.trim()).to_owned());
                }
            }
        }

        Self::default()
    }

    /// Build frontmatter from explicit pairs.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .collect();
        Self { values }
    }

    /// Look up a variable (case-insensitive).
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.values
            .get(&variable.to_lowercase())
            .map(String::as_str)
    }

    /// Whether `variable` is present with a value equal to `value`, ignoring case.
    #[must_use]
    pub fn has_value(&self, variable: &str, value: &str) -> bool {
        self.get(variable)
            .is_some_and(|found| found.to_lowercase() == value.to_lowercase())
    }

    /// Normalized pairs, in variable order.
    pub fn pairs(&self) -> impl Iterator<Item = FrontmatterPair> + '_ {
        self.values.iter().map(|(k, v)| FrontmatterPair::new(k, v))
    }

    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Strip one pair of matching surrounding quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Byte length of the leading frontmatter block, including its closing line.
///
/// Returns 0 when the text has no closed frontmatter block.
pub(crate) fn block_len(text: &str) -> usize {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return 0;
    };
    if !first.starts_with(DELIMITER) {
        return 0;
    }
    let mut consumed = first.len();
    for line in lines {
        consumed += line.len();
        if line.starts_with(DELIMITER) {
            return consumed;
        }
    }
    0
}
