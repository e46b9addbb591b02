//! Candidate screening: the fixed sequence of heuristic filters that cuts a
//! noisy token table down to plausible blend candidates.
//!
//! Filters run strictly in order, each over the whole table, because later
//! stages (proper nouns, compounds, typos) depend on the complete output of
//! the earlier ones. After every stage a `StageReport` is handed to the
//! caller's `StageObserver`.

pub mod audit;
mod distance;
pub mod filters;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

use crate::lexicon::Lexicon;
use crate::settings::ScreeningSettings;
use crate::table::CandidateTable;

pub use audit::{StageAudit, TruthAudit};
pub use distance::levenshtein_within;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ShortWords,
    RareCandidates,
    RareDictionary,
    ProperNouns,
    CompoundWords,
    Typos,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::ShortWords,
        Stage::RareCandidates,
        Stage::RareDictionary,
        Stage::ProperNouns,
        Stage::CompoundWords,
        Stage::Typos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::ShortWords => "short_words",
            Stage::RareCandidates => "rare_candidates",
            Stage::RareDictionary => "rare_dictionary",
            Stage::ProperNouns => "proper_nouns",
            Stage::CompoundWords => "compound_words",
            Stage::Typos => "typos",
        }
    }

    /// True for the stage that shrinks the lexicon rather than the candidates.
    pub fn filters_dictionary(self) -> bool {
        self == Stage::RareDictionary
    }
}

/// Sizes on either side of one stage. For `RareDictionary` the sizes are
/// lexicon sizes; for every other stage they are candidate counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub before: usize,
    pub after: usize,
}

/// Progress boundary between filter stages.
pub trait StageObserver {
    fn on_stage(&mut self, report: &StageReport, screening: &Screening);
}

impl<F: FnMut(&StageReport, &Screening)> StageObserver for F {
    fn on_stage(&mut self, report: &StageReport, screening: &Screening) {
        self(report, screening)
    }
}

/// Observer that ignores every report.
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn on_stage(&mut self, _report: &StageReport, _screening: &Screening) {}
}

/// Output of the filter pipeline: the surviving candidates and the filtered
/// dictionary that source retrieval runs against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Screening {
    pub candidates: CandidateTable,
    pub lexicon: Lexicon,
}

/// Count `tokens`, attach corpus frequencies to `dictionary`, and run the
/// full filter pipeline.
pub fn screen_candidates<T, D>(
    tokens: impl IntoIterator<Item = T>,
    dictionary: impl IntoIterator<Item = D>,
    thresholds: &ScreeningSettings,
) -> Screening
where
    T: AsRef<str>,
    D: AsRef<str>,
{
    screen_candidates_observed(tokens, dictionary, thresholds, &mut NoopObserver)
}

pub fn screen_candidates_observed<T, D>(
    tokens: impl IntoIterator<Item = T>,
    dictionary: impl IntoIterator<Item = D>,
    thresholds: &ScreeningSettings,
    observer: &mut dyn StageObserver,
) -> Screening
where
    T: AsRef<str>,
    D: AsRef<str>,
{
    let candidates = CandidateTable::from_tokens(tokens);
    let lexicon = Lexicon::from_table(dictionary, &candidates);
    info!(
        candidates = candidates.len(),
        dictionary = lexicon.len(),
        "corpus counted"
    );
    run_pipeline(
        Screening {
            candidates,
            lexicon,
        },
        thresholds,
        observer,
    )
}

/// Run every filter stage, in order, over an already counted table.
pub fn run_pipeline(
    mut screening: Screening,
    thresholds: &ScreeningSettings,
    observer: &mut dyn StageObserver,
) -> Screening {
    let _span = debug_span!("screen_candidates").entered();
    for stage in Stage::ALL {
        screening = apply_stage(stage, screening, thresholds, observer);
    }
    screening
}

fn apply_stage(
    stage: Stage,
    screening: Screening,
    t: &ScreeningSettings,
    observer: &mut dyn StageObserver,
) -> Screening {
    let _span = debug_span!("stage", stage = stage.name()).entered();
    let Screening {
        candidates,
        lexicon,
    } = screening;
    let before = if stage.filters_dictionary() {
        lexicon.len()
    } else {
        candidates.len()
    };

    let (candidates, lexicon) = match stage {
        Stage::ShortWords => (filters::short_words(candidates, t.min_length), lexicon),
        Stage::RareCandidates => (
            filters::rare_candidates(candidates, t.min_candidate_occurrences),
            lexicon,
        ),
        Stage::RareDictionary => (
            candidates,
            filters::rare_dictionary(lexicon, t.dict_threshold()),
        ),
        Stage::ProperNouns => (
            filters::proper_nouns(candidates, t.proper_noun_cutoff, t.proper_noun_min_total),
            lexicon,
        ),
        Stage::CompoundWords => {
            let candidates = filters::compound_words(candidates, &lexicon, t.compound_min_length);
            (candidates, lexicon)
        }
        Stage::Typos => {
            let candidates = filters::typos(candidates, &lexicon, t.typo_frequency_ratio);
            (candidates, lexicon)
        }
    };

    let screening = Screening {
        candidates,
        lexicon,
    };
    let after = if stage.filters_dictionary() {
        screening.lexicon.len()
    } else {
        screening.candidates.len()
    };
    let report = StageReport {
        stage,
        before,
        after,
    };
    debug!(stage = stage.name(), before, after, "stage complete");
    observer.on_stage(&report, &screening);
    screening
}
