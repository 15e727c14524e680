//! Frontmatter index.
//!
//! Maps each normalized `(variable, value)` pair to the positions of the
//! documents carrying it. Built once per corpus, read-only afterwards.

use std::collections::{BTreeSet, HashMap};

use crate::{Frontmatter, FrontmatterPair};

/// Read-only `(variable, value)` → document positions map.
///
/// Positions refer to [`Corpus::documents`](crate::Corpus::documents).
#[derive(Debug, Default)]
pub struct FrontmatterIndex {
    entries: HashMap<FrontmatterPair, BTreeSet<usize>>,
}

impl FrontmatterIndex {
    /// Build the index from per-document frontmatter, in corpus order.
    pub fn build<'a>(frontmatters: impl IntoIterator<Item = &'a Frontmatter>) -> Self {
        let mut entries: HashMap<FrontmatterPair, BTreeSet<usize>> = HashMap::new();
        for (position, frontmatter) in frontmatters.into_iter().enumerate() {
            for pair in frontmatter.pairs() {
                entries.entry(pair).or_default().insert(position);
            }
        }
        Self { entries }
    }

    /// Documents whose frontmatter has `variable` equal to `value` (case-insensitive).
    #[must_use]
    pub fn documents_with(&self, variable: &str, value: &str) -> Option<&BTreeSet<usize>> {
        self.entries.get(&FrontmatterPair::new(variable, value))
    }

    /// Documents satisfying every `(variable, value)` condition.
    ///
    /// Returns `None` when there are no conditions (everything matches).
    #[must_use]
    pub fn documents_matching_all<'a>(
        &self,
        conditions: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Option<BTreeSet<usize>> {
        let mut result: Option<BTreeSet<usize>> = None;
        for (variable, value) in conditions {
            let Some(found) = self.documents_with(variable, value) else {
                return Some(BTreeSet::new());
            };
            result = Some(match result {
                None => found.clone(),
                Some(acc) => acc.intersection(found).copied().collect(),
            });
        }
        result
    }

    /// Number of distinct pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
