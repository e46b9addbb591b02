//! Reference dictionary with corpus frequencies.
//!
//! `Lexicon` maps each dictionary word to the number of times it occurs in
//! the corpus. `LexiconIndex` is the frozen, sorted view used for
//! prefix-range queries during compound detection and source retrieval.

mod index;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::table::CandidateTable;

pub use index::{reverse_word, IndexEntry, LexiconIndex, SortedIndex, RANGE_SENTINEL};

/// A dictionary word and its corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub frequency: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    frequencies: HashMap<String, u64>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit `(word, frequency)` pairs. Later duplicates win.
    pub fn from_entries(entries: impl IntoIterator<Item = DictionaryEntry>) -> Self {
        let frequencies = entries
            .into_iter()
            .map(|e| (e.word, e.frequency))
            .collect();
        Self { frequencies }
    }

    /// Build from a dictionary word list, taking each word's frequency from
    /// the total occurrences of the same (lowercase) token in `table`.
    ///
    /// Lookup is case-sensitive: a dictionary word with uppercase letters
    /// never matches a lowercase table key and gets frequency 0.
    pub fn from_table<S: AsRef<str>>(
        words: impl IntoIterator<Item = S>,
        table: &CandidateTable,
    ) -> Self {
        let mut frequencies = HashMap::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            let frequency = table.get(word).map_or(0, |e| e.total());
            frequencies.insert(word.to_string(), frequency);
        }
        Self { frequencies }
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.frequencies.contains_key(word)
    }

    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.frequencies.get(word).copied()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.frequencies.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.frequencies.iter().map(|(w, &f)| (w.as_str(), f))
    }

    /// All entries sorted by word.
    pub fn entries(&self) -> Vec<DictionaryEntry> {
        let mut entries: Vec<DictionaryEntry> = self
            .iter()
            .map(|(word, frequency)| DictionaryEntry {
                word: word.to_string(),
                frequency,
            })
            .collect();
        entries.sort_by(|a, b| a.word.cmp(&b.word));
        entries
    }

    /// Keep only words whose frequency satisfies `keep`.
    pub fn retain(mut self, mut keep: impl FnMut(&str, u64) -> bool) -> Self {
        self.frequencies.retain(|w, f| keep(w, *f));
        self
    }

    /// Freeze into the sorted forward/backward index used by range queries.
    pub fn index(&self) -> LexiconIndex {
        LexiconIndex::build(self.words())
    }
}
