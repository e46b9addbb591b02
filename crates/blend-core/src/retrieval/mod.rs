//! Source-word retrieval for screened blend candidates.
//!
//! For each candidate the dictionary is searched twice: forward, among words
//! sharing the candidate's leading characters, and backward, among words
//! sharing its trailing characters. Every word in range is scored with a
//! local alignment and the best `top_k` are kept per direction.
//!
//! Candidates are independent, so the batch runs on the rayon pool against a
//! frozen, shared [`LexiconIndex`].

pub mod align;
mod top_k;

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

use crate::lexicon::{Lexicon, LexiconIndex, SortedIndex};
use crate::settings::RetrievalSettings;
use crate::table::CandidateTable;

pub use align::{alignment_score, local_alignment};
pub use top_k::{ScoredSource, TopK};

/// A candidate with its best forward (start) and backward (end) sources.
///
/// Both lists are in ascending score order, so the best match is last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateWithSources {
    pub token: String,
    #[serde(rename = "forward_top_k")]
    pub forward: Vec<ScoredSource>,
    #[serde(rename = "backward_top_k")]
    pub backward: Vec<ScoredSource>,
}

impl CandidateWithSources {
    pub fn best_forward(&self) -> Option<&ScoredSource> {
        self.forward.last()
    }

    pub fn best_backward(&self) -> Option<&ScoredSource> {
        self.backward.last()
    }

    /// True when retrieval says nothing useful about this candidate: a
    /// direction found no source, or a single dictionary word explains the
    /// whole candidate from one end.
    pub fn is_uninformative(&self) -> bool {
        match (self.best_forward(), self.best_backward()) {
            (Some(f), Some(b)) => f.score == 1.0 || b.score == 1.0,
            _ => true,
        }
    }
}

/// Retrieval results keyed by candidate token.
pub type RetrievalResults = BTreeMap<String, CandidateWithSources>;

/// Retrieve sources with the default `top_k` and anchor length.
pub fn retrieve_sources(candidates: &CandidateTable, lexicon: &Lexicon) -> RetrievalResults {
    retrieve_sources_with(candidates, lexicon, &RetrievalSettings::default())
}

pub fn retrieve_sources_with(
    candidates: &CandidateTable,
    lexicon: &Lexicon,
    settings: &RetrievalSettings,
) -> RetrievalResults {
    let _span = debug_span!(
        "retrieve_sources",
        candidates = candidates.len(),
        lexicon = lexicon.len()
    )
    .entered();

    let index = lexicon.index();
    let tokens: Vec<&str> = candidates.tokens().collect();

    let results: RetrievalResults = tokens
        .par_iter()
        .filter_map(|&token| {
            let found = retrieve_one(token, &index, settings);
            if found.is_uninformative() {
                debug!(token, "dropped uninformative candidate");
                None
            } else {
                Some((found.token.clone(), found))
            }
        })
        .collect();

    info!(
        candidates = candidates.len(),
        kept = results.len(),
        "source retrieval complete"
    );
    results
}

/// Score one candidate against both directions of the index.
pub fn retrieve_one(
    token: &str,
    index: &LexiconIndex,
    settings: &RetrievalSettings,
) -> CandidateWithSources {
    let forward_chars: Vec<char> = token.chars().collect();
    let backward_chars: Vec<char> = forward_chars.iter().rev().copied().collect();

    let forward = best_sources(&forward_chars, &index.forward, settings);
    let backward = best_sources(&backward_chars, &index.backward, settings);
    debug!(
        token,
        forward_len = forward.len(),
        backward_len = backward.len(),
        "scored candidate"
    );

    CandidateWithSources {
        token: token.to_string(),
        forward,
        backward,
    }
}

/// Top-k sources in `index` for `target`. The target is oriented the same
/// way as the index keys (reversed for the backward index); stored words are
/// always the dictionary spelling.
fn best_sources(
    target: &[char],
    index: &SortedIndex,
    settings: &RetrievalSettings,
) -> Vec<ScoredSource> {
    if target.is_empty() {
        return Vec::new();
    }
    let anchor: String = target.iter().take(settings.anchor_len).collect();
    let len = target.len() as f64;

    let mut top = TopK::new(settings.top_k);
    for entry in index.range(&anchor) {
        let key: Vec<char> = entry.key.chars().collect();
        let score = local_alignment(&key, target) as f64 / len;
        top.offer_with(score, || entry.word.clone());
    }
    top.into_sorted_vec()
}
