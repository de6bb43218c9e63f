use std::collections::HashMap;

use rust_decimal::Decimal;
use taxinvoice_core::{DomainError, DomainResult};

use crate::classification::ClassificationEntry;

/// Immutable classification table with an exact-match code index.
///
/// Entries keep their insertion order; `search` yields them in that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceTable {
    entries: Vec<ClassificationEntry>,
    by_code: HashMap<String, usize>,
}

impl ReferenceTable {
    /// Build a table, rejecting blank codes, negative rates and duplicate codes.
    pub fn from_entries(
        entries: impl IntoIterator<Item = ClassificationEntry>,
    ) -> DomainResult<Self> {
        let mut table = Self::default();
        for entry in entries {
            if entry.code.trim().is_empty() {
                return Err(DomainError::validation("classification code cannot be empty"));
            }
            if entry.tax_rate_percent < Decimal::ZERO {
                return Err(DomainError::validation(format!(
                    "tax rate for {} cannot be negative",
                    entry.code
                )));
            }
            if table.by_code.contains_key(&entry.code) {
                return Err(DomainError::conflict(format!(
                    "duplicate classification code {}",
                    entry.code
                )));
            }
            table.push(entry);
        }
        Ok(table)
    }

    /// Build from entries already known to be valid (the built-in master list).
    pub(crate) fn from_trusted(entries: Vec<ClassificationEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            debug_assert!(!table.by_code.contains_key(&entry.code));
            table.push(entry);
        }
        table
    }

    fn push(&mut self, entry: ClassificationEntry) {
        self.by_code.insert(entry.code.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Exact-match lookup. `None` is an ordinary outcome, not a failure.
    pub fn lookup(&self, code: &str) -> Option<&ClassificationEntry> {
        self.by_code.get(code).map(|&idx| &self.entries[idx])
    }

    /// Entries whose code or description contains `query`, ignoring case.
    ///
    /// The returned iterator is lazy and `Clone`; clone it (or call `search`
    /// again) to restart from the first match.
    pub fn search(&self, query: &str) -> Search<'_> {
        Search {
            entries: self.entries.iter(),
            needle: query.to_lowercase(),
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ClassificationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReferenceTable {
    type Item = &'a ClassificationEntry;
    type IntoIter = core::slice::Iter<'a, ClassificationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Lazy search over a [`ReferenceTable`], in table order.
#[derive(Debug, Clone)]
pub struct Search<'a> {
    entries: core::slice::Iter<'a, ClassificationEntry>,
    needle: String,
}

impl<'a> Iterator for Search<'a> {
    type Item = &'a ClassificationEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let needle = &self.needle;
        self.entries.find(|entry| entry.matches(needle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}

impl core::iter::FusedIterator for Search<'_> {}
