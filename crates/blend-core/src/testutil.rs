//! Shared fixtures for unit tests.

use crate::lexicon::{DictionaryEntry, Lexicon};
use crate::table::{CandidateEntry, CandidateTable};

pub(crate) fn table_from(tokens: &[&str]) -> CandidateTable {
    CandidateTable::from_tokens(tokens.iter().copied())
}

/// A table where every token is seen `count` times in lowercase.
pub(crate) fn lowercase_table(tokens: &[(&str, u64)]) -> CandidateTable {
    let mut table = CandidateTable::new();
    for &(token, count) in tokens {
        table.insert(
            token,
            CandidateEntry {
                lower_count: count,
                ..CandidateEntry::default()
            },
        );
    }
    table
}

pub(crate) fn lexicon_from(entries: &[(&str, u64)]) -> Lexicon {
    Lexicon::from_entries(entries.iter().map(|&(word, frequency)| DictionaryEntry {
        word: word.to_string(),
        frequency,
    }))
}

/// The canonical belieber corpus.
pub(crate) fn belieber_tokens() -> Vec<&'static str> {
    vec![
        "believe", "believe", "Bieber", "belieber", "belieber", "belieber",
    ]
}
