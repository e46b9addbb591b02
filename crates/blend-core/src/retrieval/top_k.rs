use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

/// Upper bound on the heap space reserved up front; larger capacities grow
/// on demand.
const PREALLOCATE_LIMIT: usize = 64;

/// A dictionary word with its alignment score against one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSource {
    pub score: f64,
    pub word: String,
}

impl ScoredSource {
    pub fn new(score: f64, word: impl Into<String>) -> Self {
        Self {
            score,
            word: word.into(),
        }
    }
}

impl Eq for ScoredSource {}

impl Ord for ScoredSource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for ScoredSource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded collection keeping the `capacity` best-scoring sources.
///
/// Backed by a min-heap so the weakest kept entry is always at the top.
/// Once full, a new source is admitted only if it scores strictly higher
/// than that entry; ties keep whichever arrived first.
#[derive(Debug)]
pub struct TopK {
    capacity: usize,
    heap: BinaryHeap<Reverse<ScoredSource>>,
}

impl TopK {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.min(PREALLOCATE_LIMIT) + 1),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Lowest kept score, if any.
    pub fn min_score(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(s)| s.score)
    }

    pub fn offer(&mut self, score: f64, word: &str) -> bool {
        self.offer_with(score, || word.to_string())
    }

    /// Offer a source whose word is only materialized when admitted.
    pub fn offer_with(&mut self, score: f64, word: impl FnOnce() -> String) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.heap.len() >= self.capacity {
            match self.min_score() {
                Some(min) if score > min => {
                    self.heap.pop();
                }
                _ => return false,
            }
        }
        self.heap.push(Reverse(ScoredSource::new(score, word())));
        true
    }

    /// Kept sources in ascending score order; the best is last.
    pub fn into_sorted_vec(self) -> Vec<ScoredSource> {
        let mut sources: Vec<ScoredSource> =
            self.heap.into_iter().map(|Reverse(s)| s).collect();
        sources.sort();
        sources
    }
}
