//! Candidate tokens with per-case occurrence counts.


use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a single token occurrence was cased in the corpus.
///
/// Sentence-initial words arrive from cleanup in ALL CAPS, so anything that
/// is neither plain lowercase nor a simple Capitalized word is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseClass {
    Lower,
    Capitalized,
    Ambiguous,
}

impl CaseClass {
    pub fn of(token: &str) -> Self {
        let mut chars = token.chars();
        let Some(first) = chars.next() else {
            return CaseClass::Lower;
        };
        let rest_has_upper = chars.any(char::is_uppercase);
        if !first.is_uppercase() && !rest_has_upper {
            CaseClass::Lower
        } else if first.is_uppercase() && !rest_has_upper {
            CaseClass::Capitalized
        } else {
            CaseClass::Ambiguous
        }
    }
}

/// Occurrence counts for one candidate, split by case context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntry {
    pub lower_count: u64,
    pub capitalized_count: u64,
    pub ambiguous_count: u64,
}

impl CandidateEntry {
    pub fn total(&self) -> u64 {
        self.lower_count + self.capitalized_count + self.ambiguous_count
    }

    fn record(&mut self, class: CaseClass) {
        match class {
            CaseClass::Lower => self.lower_count += 1,
            CaseClass::Capitalized => self.capitalized_count += 1,
            CaseClass::Ambiguous => self.ambiguous_count += 1,
        }
    }
}

/// Candidate table keyed by lowercase token, iterated in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTable {
    entries: BTreeMap<String, CandidateEntry>,
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count case-preserved tokens. Empty tokens are ignored.
    pub fn from_tokens<S: AsRef<str>>(tokens: impl IntoIterator<Item = S>) -> Self {
        let mut table = Self::new();
        for token in tokens {
            table.observe(token.as_ref());
        }
        table
    }

    /// Record one occurrence of `token`.
    pub fn observe(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        let class = CaseClass::of(token);
        self.entries
            .entry(token.to_lowercase())
            .or_default()
            .record(class);
    }

    pub fn insert(&mut self, token: impl Into<String>, entry: CandidateEntry) {
        self.entries.insert(token.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, token: &str) -> Option<&CandidateEntry> {
        self.entries.get(token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CandidateEntry)> {
        self.entries.iter().map(|(t, e)| (t.as_str(), e))
    }

    /// Keep only entries for which `keep` returns true. Entries are removed
    /// whole; counts are never modified.
    pub fn retain(mut self, mut keep: impl FnMut(&str, &CandidateEntry) -> bool) -> Self {
        self.entries.retain(|t, e| keep(t, e));
        self
    }
}

impl<S: AsRef<str>> FromIterator<S> for CandidateTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}
