//! Glob compilation and the shared pattern cache.
//!
//! Only `*` (any run of characters) and `?` (any single character) are
//! wildcards. Every other character is escaped, so the resulting regex has no
//! nested quantifiers and matching stays linear in the input.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use regex::{Regex, RegexBuilder};

use crate::ListError;

/// Compiled size limit for a single glob.
const DEFAULT_SIZE_LIMIT: usize = 1 << 20;

/// How a glob is anchored when compiled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlobMode {
    /// `^glob(?:/|$)`: matches a directory and everything below it, whole
    /// segments only.
    Prefix,
    /// `^glob$`: matches the whole input.
    Full,
    /// `glob`: matches anywhere in the input.
    Unanchored,
}

/// Translate a glob into regex source for `mode`.
///
/// # Example
///
/// ```
/// use rl_lists::{GlobMode, glob_to_regex};
///
/// assert_eq!(glob_to_regex("*.md", GlobMode::Full), r"^.*\.md$");
/// assert_eq!(glob_to_regex("~/api", GlobMode::Prefix), "^~/api(?:/|$)");
/// ```
#[must_use]
pub fn glob_to_regex(glob: &str, mode: GlobMode) -> String {
    let mut body = String::with_capacity(glob.len() + 8);
    for c in glob.chars() {
        match c {
            '*' => body.push_str(".*"),
            '?' => body.push('.'),
            c => {
                if is_meta(c) {
                    body.push('\\');
                }
                body.push(c);
            }
        }
    }
    match mode {
        GlobMode::Prefix => format!("^{body}(?:/|$)"),
        GlobMode::Full => format!("^{body}$"),
        GlobMode::Unanchored => body,
    }
}

/// Characters with a meaning in regex syntax outside character classes.
fn is_meta(c: char) -> bool {
    matches!(
        c,
        '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
    )
}

/// Compile a glob into a case-insensitive regex.
pub fn compile_glob(glob: &str, mode: GlobMode) -> Result<Regex, ListError> {
    compile_with_limit(glob, mode, DEFAULT_SIZE_LIMIT)
}

fn compile_with_limit(glob: &str, mode: GlobMode, size_limit: usize) -> Result<Regex, ListError> {
    RegexBuilder::new(&glob_to_regex(glob, mode))
        .case_insensitive(true)
        .size_limit(size_limit)
        .build()
        .map_err(|source| ListError::InvalidPattern {
            pattern: glob.to_owned(),
            source,
        })
}

/// Compiled-glob cache shared by every document of a build.
///
/// Keyed by `(mode, glob)`. Safe to share across threads; the map is guarded
/// by a mutex and compiled patterns are handed out as [`Arc<Regex>`].
#[derive(Debug)]
pub struct PatternCache {
    patterns: Mutex<HashMap<(GlobMode, String), Arc<Regex>>>,
    size_limit: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size_limit(DEFAULT_SIZE_LIMIT)
    }

    /// Create an empty cache with a custom compiled size limit per pattern.
    #[must_use]
    pub fn with_size_limit(size_limit: usize) -> Self {
        Self {
            patterns: Mutex::new(HashMap::new()),
            size_limit,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Return the compiled pattern for `glob`, compiling it on first use.
    ///
    /// Failed compilations are not cached.
    pub fn get_or_compile(&self, mode: GlobMode, glob: &str) -> Result<Arc<Regex>, ListError> {
        let key = (mode, glob.to_owned());
        if let Some(regex) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(regex));
        }

        // Compile outside the lock; a concurrent miss on the same key only
        // costs a duplicate compilation.
        let regex = Arc::new(compile_with_limit(glob, mode, self.size_limit)?);
        self.misses.fetch_add(1, Ordering::Relaxed);
        let cached = Arc::clone(self.lock().entry(key).or_insert(regex));
        Ok(cached)
    }

    /// Number of distinct compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been compiled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Lookups served from the cache.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that compiled a new pattern.
    #[must_use]
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(GlobMode, String), Arc<Regex>>> {
        self.patterns.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_to_regex_escapes_metacharacters() {
        assert_eq!(
            glob_to_regex("a.b$c^d{e[f(g|h)i+j\\", GlobMode::Unanchored),
            r"a\.b\$c\^d\{e\[f\(g\|h\)i\+j\\"
        );
    }

    #[test]
    fn test_glob_to_regex_wildcards() {
        assert_eq!(glob_to_regex("*pro?", GlobMode::Unanchored), ".*pro.");
        assert_eq!(glob_to_regex("", GlobMode::Full), "^$");
    }

    #[test]
    fn test_unanchored_glob_matches_directory_name() {
        let re = compile_glob("*pro*", GlobMode::Unanchored).unwrap();
        assert!(re.is_match("products"));
        assert!(!re.is_match("docs"));
    }

    #[test]
    fn test_full_glob_is_anchored_and_case_insensitive() {
        let re = compile_glob("*.MD", GlobMode::Full).unwrap();
        assert!(re.is_match("install.md"));
        assert!(!re.is_match("install.md.bak"));

        let re = compile_glob("page?.md", GlobMode::Full).unwrap();
        assert!(re.is_match("page1.md"));
        assert!(!re.is_match("page10.md"));
    }

    #[test]
    fn test_prefix_glob_matches_whole_segments() {
        let re = compile_glob("~/api", GlobMode::Prefix).unwrap();
        assert!(re.is_match("~/api"));
        assert!(re.is_match("~/api/"));
        assert!(re.is_match("~/API/v2"));
        assert!(!re.is_match("~/docs/api"));
        assert!(!re.is_match("~/apis"));
        assert!(!re.is_match("~/api-old/v1"));
    }

    #[test]
    fn test_prefix_glob_wildcard_spans_segment() {
        let re = compile_glob("~/api*", GlobMode::Prefix).unwrap();
        assert!(re.is_match("~/apis"));
        assert!(re.is_match("~/api-old/v1"));
    }

    #[test]
    fn test_literal_dot_is_not_wildcard() {
        let re = compile_glob("a.md", GlobMode::Full).unwrap();
        assert!(!re.is_match("axmd"));
    }

    #[test]
    fn test_cache_returns_same_pattern() {
        let cache = PatternCache::new();
        let first = cache.get_or_compile(GlobMode::Full, "*.md").unwrap();
        let second = cache.get_or_compile(GlobMode::Full, "*.md").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn test_cache_keys_on_mode() {
        let cache = PatternCache::new();
        let full = cache.get_or_compile(GlobMode::Full, "api").unwrap();
        let prefix = cache.get_or_compile(GlobMode::Prefix, "api").unwrap();

        assert!(!Arc::ptr_eq(&full, &prefix));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_size_limit_error_not_cached() {
        let cache = PatternCache::with_size_limit(64);
        let glob = "?".repeat(200);

        let err = cache.get_or_compile(GlobMode::Full, &glob).unwrap_err();
        assert!(matches!(err, ListError::InvalidPattern { ref pattern, .. } if *pattern == glob));
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 0);
    }

    #[test]
    fn test_cache_shared_across_threads() {
        let cache = PatternCache::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let re = cache.get_or_compile(GlobMode::Unanchored, "*guide*").unwrap();
                    assert!(re.is_match("user-guide"));
                });
            }
        });
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits() + cache.misses(), 4);
    }
}
