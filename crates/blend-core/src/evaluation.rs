//! Reciprocal-rank evaluation against known blends.
//!
//! Ground truth is a plain-text file, one answer per line:
//!
//! ```text
//! belieber believe Bieber
//! brunch breakfast lunch
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::retrieval::{RetrievalResults, ScoredSource};

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected 3 fields (blend start end), found {fields}: {content:?}")]
    Malformed {
        line: usize,
        content: String,
        fields: usize,
    },
}

/// A known blend and its two source words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruthAnswer {
    pub blend: String,
    pub start_source: String,
    pub end_source: String,
}

/// Known answers keyed by lowercase blend.
pub type GroundTruth = BTreeMap<String, GroundTruthAnswer>;

pub fn parse_answers(text: &str) -> Result<GroundTruth, AnswerError> {
    let mut answers = GroundTruth::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [blend, start, end] = fields[..] else {
            return Err(AnswerError::Malformed {
                line: i + 1,
                content: line.to_string(),
                fields: fields.len(),
            });
        };
        let blend = blend.to_lowercase();
        answers.insert(
            blend.clone(),
            GroundTruthAnswer {
                blend,
                start_source: start.to_string(),
                end_source: end.to_string(),
            },
        );
    }
    Ok(answers)
}

pub fn load_answers(path: &Path) -> Result<GroundTruth, AnswerError> {
    let text = std::fs::read_to_string(path)?;
    parse_answers(&text)
}

/// Reciprocal rank of `word` in an ascending list: the last entry scores 1,
/// the one before it 1/2, and so on. Absent words score 0.
pub fn reciprocal_rank(list: &[ScoredSource], word: &str) -> f64 {
    let m = list.len();
    list.iter()
        .position(|s| s.word == word)
        .map_or(0.0, |n| 1.0 / (m - n) as f64)
}

/// Per-blend score: the mean of the start source's forward rank and the end
/// source's backward rank. Blends missing from `results` are not scored.
pub fn evaluate(results: &RetrievalResults, answers: &GroundTruth) -> BTreeMap<String, f64> {
    let mut scores = BTreeMap::new();
    for (blend, answer) in answers {
        let Some(found) = results.get(blend) else {
            continue;
        };
        let start = reciprocal_rank(&found.forward, &answer.start_source);
        let end = reciprocal_rank(&found.backward, &answer.end_source);
        debug!(blend = blend.as_str(), start, end, "scored blend");
        scores.insert(blend.clone(), (start + end) / 2.0);
    }
    scores
}

/// Mean over all scored blends, `None` when nothing was scored.
pub fn mean_score(scores: &BTreeMap<String, f64>) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.values().sum::<f64>() / scores.len() as f64)
}
