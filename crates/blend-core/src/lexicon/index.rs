/// Upper-bound suffix for prefix range queries.
///
/// A query for prefix `p` covers the half-open range `[p, p + "zzz")`. Words
/// that share `p` but continue past `"zzz"` in byte order fall outside the
/// range, so recall is approximate.
pub const RANGE_SENTINEL: &str = "zzz";

/// One indexed word: the sort `key` (the word itself, or the word reversed
/// for the backward index) and the `word` as spelled in the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub key: String,
    pub word: String,
}

/// Words sorted by key, answering range queries with two binary searches.
#[derive(Debug, Clone, Default)]
pub struct SortedIndex {
    entries: Vec<IndexEntry>,
}

impl SortedIndex {
    pub fn forward<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_entries(words.into_iter().map(|w| IndexEntry {
            key: w.to_string(),
            word: w.to_string(),
        }))
    }

    /// Index keyed on each word read right to left.
    pub fn backward<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self::from_entries(words.into_iter().map(|w| IndexEntry {
            key: reverse_word(w),
            word: w.to_string(),
        }))
    }

    fn from_entries(entries: impl IntoIterator<Item = IndexEntry>) -> Self {
        let mut entries: Vec<IndexEntry> = entries.into_iter().collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.word.cmp(&b.word)));
        entries.dedup_by(|a, b| a.key == b.key);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose key lies in `[prefix, prefix + RANGE_SENTINEL)`.
    pub fn range(&self, prefix: &str) -> &[IndexEntry] {
        let upper = format!("{prefix}{RANGE_SENTINEL}");
        let lo = self.entries.partition_point(|e| e.key.as_str() < prefix);
        let hi = self.entries.partition_point(|e| e.key.as_str() < upper.as_str());
        &self.entries[lo..hi.max(lo)]
    }
}

/// Frozen forward and backward indexes over one lexicon.
#[derive(Debug, Clone, Default)]
pub struct LexiconIndex {
    pub forward: SortedIndex,
    pub backward: SortedIndex,
}

impl LexiconIndex {
    pub fn build<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        let words: Vec<&str> = words.into_iter().collect();
        Self {
            forward: SortedIndex::forward(words.iter().copied()),
            backward: SortedIndex::backward(words.iter().copied()),
        }
    }
}

pub fn reverse_word(word: &str) -> String {
    word.chars().rev().collect()
}
