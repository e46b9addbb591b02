use proptest::prelude::*;

use super::filters::*;
use super::*;
use crate::table::CandidateEntry;
use crate::testutil::{belieber_tokens, lexicon_from, lowercase_table};

fn thresholds() -> ScreeningSettings {
    ScreeningSettings {
        min_length: 4,
        min_candidate_occurrences: 2,
        min_dict_occurrences: 1,
        proper_noun_cutoff: 0.8,
        proper_noun_min_total: 10,
        compound_min_length: 6,
        typo_frequency_ratio: 10,
    }
}

fn cased(lower: u64, capitalized: u64, ambiguous: u64) -> CandidateEntry {
    CandidateEntry {
        lower_count: lower,
        capitalized_count: capitalized,
        ambiguous_count: ambiguous,
    }
}

// -- ShortWordFilter --

#[test]
fn test_short_words_drops_below_min() {
    let table = lowercase_table(&[("cat", 5), ("cats", 5), ("a", 1)]);
    let table = short_words(table, 4);
    let tokens: Vec<&str> = table.tokens().collect();
    assert_eq!(tokens, vec!["cats"]);
}

#[test]
fn test_short_words_escape_hatch() {
    let table = lowercase_table(&[("a", 1), ("ab", 1)]);
    assert_eq!(short_words(table.clone(), 1).len(), 2);
    assert_eq!(short_words(table.clone(), 0).len(), 2);
    assert_eq!(short_words(table, 2).len(), 1);
}

#[test]
fn test_short_words_counts_characters() {
    let table = lowercase_table(&[("café", 3)]);
    assert_eq!(short_words(table, 4).len(), 1);
}

// -- FrequencyFilter --

#[test]
fn test_rare_candidates() {
    let table = lowercase_table(&[("rare", 1), ("common", 7)]);
    let table = rare_candidates(table, 2);
    assert!(!table.contains("rare"));
    assert!(table.contains("common"));
}

#[test]
fn test_rare_candidates_zero_disables() {
    let table = lowercase_table(&[("rare", 1), ("never", 0)]);
    assert_eq!(rare_candidates(table, 0).len(), 2);
}

#[test]
fn test_rare_candidates_uses_all_case_counts() {
    let mut table = CandidateTable::new();
    table.insert("mixed", cased(1, 1, 1));
    assert_eq!(rare_candidates(table, 3).len(), 1);
}

#[test]
fn test_rare_dictionary_sentinel() {
    let lexicon = lexicon_from(&[("used", 5), ("unused", 0)]);
    assert_eq!(rare_dictionary(lexicon.clone(), None).len(), 2);
    assert_eq!(rare_dictionary(lexicon.clone(), Some(0)).len(), 2);
    let filtered = rare_dictionary(lexicon, Some(1));
    assert!(filtered.contains("used"));
    assert!(!filtered.contains("unused"));
}

// -- ProperNounFilter --

#[test]
fn test_proper_noun_never_lowercase() {
    // "Monday": 0 lowercase, 40 capitalized mid-sentence
    assert!(is_likely_proper_noun(&cased(0, 40, 0), 0.8, 10));
}

#[test]
fn test_proper_noun_mostly_lowercase_retained() {
    // "phone": 50 lowercase, 2 capitalized
    assert!(!is_likely_proper_noun(&cased(50, 2, 0), 0.8, 10));
}

#[test]
fn test_proper_noun_small_sample_spared() {
    // 1 lowercase, 5 capitalized: ratio 0.83 but only 6 samples
    assert!(!is_likely_proper_noun(&cased(1, 5, 0), 0.8, 10));
    // Ambiguous occurrences count toward the sample size
    assert!(is_likely_proper_noun(&cased(1, 5, 4), 0.8, 10));
}

#[test]
fn test_proper_noun_ratio_must_exceed_cutoff() {
    // 2 lowercase, 8 capitalized: ratio exactly 0.8
    assert!(!is_likely_proper_noun(&cased(2, 8, 0), 0.8, 10));
}

#[test]
fn test_proper_noun_ignores_ambiguous_only() {
    assert!(!is_likely_proper_noun(&cased(0, 0, 30), 0.8, 10));
    assert!(!is_likely_proper_noun(&cased(12, 0, 30), 0.8, 10));
}

#[test]
fn test_proper_nouns_filter() {
    let mut table = CandidateTable::new();
    table.insert("monday", cased(0, 40, 0));
    table.insert("phone", cased(50, 2, 0));
    let table = proper_nouns(table, 0.8, 10);
    assert!(!table.contains("monday"));
    assert!(table.contains("phone"));
}

// -- CompoundWordFilter --

#[test]
fn test_compound_racecar() {
    let lexicon = lexicon_from(&[("race", 10), ("car", 10)]);
    let table = lowercase_table(&[("racecar", 3), ("belieber", 3)]);
    let table = compound_words(table, &lexicon, 6);
    assert!(!table.contains("racecar"));
    assert!(table.contains("belieber"));
}

#[test]
fn test_compound_split_parts() {
    let lexicon = lexicon_from(&[("race", 10), ("car", 10)]);
    let heads = lexicon.index().forward;
    assert_eq!(
        compound_split("racecar", &lexicon, &heads),
        Some(("race", "car"))
    );
    assert_eq!(compound_split("racetrack", &lexicon, &heads), None);
}

#[test]
fn test_compound_tail_must_leave_margin() {
    // "sunshine" = "sun" + "shine": tail of 5 is not shorter than 8 - 3
    let lexicon = lexicon_from(&[("sun", 10), ("shine", 10)]);
    let table = lowercase_table(&[("sunshine", 3)]);
    assert!(compound_words(table, &lexicon, 6).contains("sunshine"));
}

#[test]
fn test_compound_requires_min_length() {
    let lexicon = lexicon_from(&[("bat", 10), ("man", 10), ("batm", 10), ("an", 10)]);
    let table = lowercase_table(&[("batman", 3)]);
    // "batm" + "an" qualifies once the length gate is passed
    assert!(!compound_words(table.clone(), &lexicon, 6).contains("batman"));
    assert!(compound_words(table, &lexicon, 7).contains("batman"));
}

#[test]
fn test_compound_dictionary_word_itself_is_not_compound() {
    let lexicon = lexicon_from(&[("believe", 10)]);
    let table = lowercase_table(&[("believe", 3)]);
    assert!(compound_words(table, &lexicon, 6).contains("believe"));
}

// -- TypoFilter --

#[test]
fn test_typo_budget() {
    assert_eq!(typo_budget(3), 0);
    assert_eq!(typo_budget(4), 0);
    assert_eq!(typo_budget(5), 1);
    assert_eq!(typo_budget(12), 1);
    assert_eq!(typo_budget(13), 2);
}

#[test]
fn test_typo_distance_over_budget_kept() {
    let lexicon = lexicon_from(&[("people", 1000)]);
    let table = lowercase_table(&[("peopel", 3)]);
    assert!(typos(table, &lexicon, 10).contains("peopel"));
}

#[test]
fn test_typo_within_budget_removed() {
    let lexicon = lexicon_from(&[("people", 1000)]);
    let table = lowercase_table(&[("peple", 3)]);
    assert!(!typos(table, &lexicon, 10).contains("peple"));
}

#[test]
fn test_typo_requires_dominant_frequency() {
    let lexicon = lexicon_from(&[("people", 29)]);
    let table = lowercase_table(&[("peple", 3)]);
    assert!(typos(table, &lexicon, 10).contains("peple"));

    let lexicon = lexicon_from(&[("people", 30)]);
    let table = lowercase_table(&[("peple", 3)]);
    assert!(!typos(table, &lexicon, 10).contains("peple"));
}

#[test]
fn test_typo_short_words_skipped() {
    let lexicon = lexicon_from(&[("cats", 1000)]);
    let table = lowercase_table(&[("cata", 1)]);
    assert!(typos(table, &lexicon, 10).contains("cata"));
}

#[test]
fn test_typo_long_words_get_two_edits() {
    let lexicon = lexicon_from(&[("international", 500)]);
    let table = lowercase_table(&[("internasionl", 2), ("internasional", 2)]);
    let table = typos(table, &lexicon, 10);
    // 12 chars: budget 1, distance 2
    assert!(table.contains("internasionl"));
    // 13 chars: budget 2, distance 1
    assert!(!table.contains("internasional"));
}

// -- Pipeline --

#[test]
fn test_pipeline_belieber_survives() {
    let screening = screen_candidates(belieber_tokens(), ["believe", "bieber"], &thresholds());
    assert!(screening.candidates.contains("belieber"));
    // "bieber" is seen once, below the candidate threshold
    assert!(!screening.candidates.contains("bieber"));
    assert_eq!(screening.lexicon.frequency("believe"), Some(2));
    assert_eq!(screening.lexicon.frequency("bieber"), Some(1));
}

#[test]
fn test_pipeline_reports_every_stage_in_order() {
    let mut seen = Vec::new();
    let mut observer = |report: &StageReport, _: &Screening| seen.push(*report);
    screen_candidates_observed(
        belieber_tokens(),
        ["believe", "bieber"],
        &thresholds(),
        &mut observer,
    );
    let stages: Vec<Stage> = seen.iter().map(|r| r.stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());
    for report in &seen {
        assert!(report.after <= report.before);
    }
    assert_eq!(seen[0].before, 3);
}

#[test]
fn test_pipeline_empty_inputs() {
    let empty: [&str; 0] = [];
    let screening = screen_candidates(empty, empty, &thresholds());
    assert!(screening.candidates.is_empty());
    assert!(screening.lexicon.is_empty());
}

#[test]
fn test_pipeline_dictionary_filter_feeds_compound_stage() {
    // "car" is too rare to stay in the dictionary, so "racecar" is no compound.
    let tokens = ["race", "race", "car", "racecar", "racecar"];
    let mut t = thresholds();
    t.min_dict_occurrences = 2;
    let screening = screen_candidates(tokens, ["race", "car"], &t);
    assert!(screening.candidates.contains("racecar"));

    t.min_dict_occurrences = -1;
    let screening = screen_candidates(tokens, ["race", "car"], &t);
    assert!(!screening.candidates.contains("racecar"));
}

// -- Properties --

fn arb_table() -> impl Strategy<Value = CandidateTable> {
    prop::collection::vec(("[a-eA-E]{1,9}", 0u64..5, 0u64..5, 0u64..5), 0..40).prop_map(
        |rows| {
            let mut table = CandidateTable::new();
            for (token, l, u, a) in rows {
                table.insert(token.to_lowercase(), cased(l, u, a));
            }
            table
        },
    )
}

fn arb_lexicon() -> impl Strategy<Value = Lexicon> {
    prop::collection::vec(("[a-e]{1,7}", 0u64..200), 0..30).prop_map(|rows| {
        Lexicon::from_entries(rows.into_iter().map(|(word, frequency)| {
            crate::lexicon::DictionaryEntry { word, frequency }
        }))
    })
}

fn is_subset(after: &CandidateTable, before: &CandidateTable) -> bool {
    after.iter().all(|(t, e)| before.get(t) == Some(e))
}

proptest! {
    #[test]
    fn short_words_idempotent(table in arb_table(), min_len in 0usize..8) {
        let once = short_words(table, min_len);
        let twice = short_words(once.clone(), min_len);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filters_only_shrink(table in arb_table(), lexicon in arb_lexicon()) {
        let t = thresholds();
        let outputs = [
            short_words(table.clone(), t.min_length),
            rare_candidates(table.clone(), t.min_candidate_occurrences),
            proper_nouns(table.clone(), t.proper_noun_cutoff, t.proper_noun_min_total),
            compound_words(table.clone(), &lexicon, t.compound_min_length),
            typos(table.clone(), &lexicon, t.typo_frequency_ratio),
        ];
        for out in &outputs {
            prop_assert!(out.len() <= table.len());
            prop_assert!(is_subset(out, &table));
        }
    }

    #[test]
    fn pipeline_output_subset_of_input(table in arb_table(), lexicon in arb_lexicon()) {
        let input = Screening { candidates: table.clone(), lexicon };
        let out = run_pipeline(input, &thresholds(), &mut NoopObserver);
        prop_assert!(is_subset(&out.candidates, &table));
    }
}
