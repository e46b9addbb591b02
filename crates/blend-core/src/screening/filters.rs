use std::collections::BTreeMap;

use crate::lexicon::{Lexicon, SortedIndex};
use crate::table::{CandidateEntry, CandidateTable};

use super::distance::levenshtein_within;

/// Number of leading characters used to look up compound heads.
const COMPOUND_HEAD_PREFIX: usize = 3;
/// Minimum length of a compound head, and the margin a compound tail must
/// leave: the tail must be shorter than `len(v) - COMPOUND_MARGIN`.
const COMPOUND_MARGIN: usize = 3;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Drop tokens shorter than `min_len` characters. `min_len < 2` keeps everything.
pub fn short_words(table: CandidateTable, min_len: usize) -> CandidateTable {
    if min_len < 2 {
        return table;
    }
    table.retain(|token, _| char_len(token) >= min_len)
}

/// Drop candidates seen fewer than `min_occurrences` times. `0` keeps everything.
pub fn rare_candidates(table: CandidateTable, min_occurrences: u64) -> CandidateTable {
    table.retain(|_, entry| entry.total() >= min_occurrences)
}

/// Drop dictionary words seen fewer than `min_occurrences` times. `None`
/// disables the filter.
pub fn rare_dictionary(lexicon: Lexicon, min_occurrences: Option<u64>) -> Lexicon {
    match min_occurrences {
        Some(min) => lexicon.retain(|_, frequency| frequency >= min),
        None => lexicon,
    }
}

/// True when the case statistics mark `entry` as a proper noun.
///
/// Never seen in lowercase but seen capitalized mid-sentence: proper noun.
/// Otherwise only a confident majority of capitalized uses counts, and only
/// once `min_total` occurrences are available.
pub fn is_likely_proper_noun(entry: &CandidateEntry, cutoff: f64, min_total: u64) -> bool {
    let lower = entry.lower_count;
    let upper = entry.capitalized_count;
    if lower == 0 && upper > 0 {
        return true;
    }
    if lower > 0 && upper > 0 {
        let ratio = upper as f64 / (lower + upper) as f64;
        return ratio > cutoff && entry.total() >= min_total;
    }
    false
}

pub fn proper_nouns(table: CandidateTable, cutoff: f64, min_total: u64) -> CandidateTable {
    table.retain(|_, entry| !is_likely_proper_noun(entry, cutoff, min_total))
}

/// Split `token` into `head + tail` with both parts in the lexicon, if possible.
///
/// Heads come from a range query on the first three characters; tails are
/// checked by direct lookup.
pub fn compound_split<'a>(
    token: &'a str,
    lexicon: &Lexicon,
    heads: &SortedIndex,
) -> Option<(&'a str, &'a str)> {
    let len = char_len(token);
    let prefix: String = token.chars().take(COMPOUND_HEAD_PREFIX).collect();
    let max_tail = len.saturating_sub(COMPOUND_MARGIN);

    heads.range(&prefix).iter().find_map(|entry| {
        let head = entry.word.as_str();
        if char_len(head) < COMPOUND_HEAD_PREFIX {
            return None;
        }
        let tail = token.strip_prefix(head)?;
        let valid = !tail.is_empty() && char_len(tail) < max_tail && lexicon.contains(tail);
        valid.then(|| token.split_at(head.len()))
    })
}

pub fn compound_words(table: CandidateTable, lexicon: &Lexicon, min_len: usize) -> CandidateTable {
    let heads = SortedIndex::forward(lexicon.words());
    table.retain(|token, _| {
        char_len(token) < min_len || compound_split(token, lexicon, &heads).is_none()
    })
}

/// Edit distance tolerated for a candidate of `len` characters.
pub fn typo_budget(len: usize) -> usize {
    match len {
        0..=4 => 0,
        5..=12 => 1,
        _ => 2,
    }
}

/// Dictionary words bucketed by character length.
pub struct LengthBuckets<'a> {
    buckets: BTreeMap<usize, Vec<(&'a str, u64)>>,
}

impl<'a> LengthBuckets<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        let mut buckets: BTreeMap<usize, Vec<(&'a str, u64)>> = BTreeMap::new();
        for (word, frequency) in lexicon.iter() {
            buckets.entry(char_len(word)).or_default().push((word, frequency));
        }
        Self { buckets }
    }

    /// Find a dominant dictionary word within the typo budget of `token`.
    ///
    /// The word must be at least `ratio` times as frequent as the token,
    /// otherwise the two are treated as independent real words.
    pub fn dominant_match(&self, token: &str, frequency: u64, ratio: u64) -> Option<&'a str> {
        let len = char_len(token);
        let budget = typo_budget(len);
        if budget == 0 {
            return None;
        }
        let min_frequency = frequency.saturating_mul(ratio);
        self.buckets
            .range(len.saturating_sub(budget)..=len + budget)
            .flat_map(|(_, words)| words.iter())
            .find(|&&(word, word_frequency)| {
                word_frequency >= min_frequency && levenshtein_within(word, token, budget).is_some()
            })
            .map(|&(word, _)| word)
    }
}

pub fn typos(table: CandidateTable, lexicon: &Lexicon, ratio: u64) -> CandidateTable {
    let buckets = LengthBuckets::new(lexicon);
    table.retain(|token, entry| {
        buckets
            .dominant_match(token, entry.total(), ratio)
            .is_none()
    })
}
