//! Before/after comparison of two pipeline stages.
//!
//! Given the token sets on either side of a stage, and optionally the set of
//! known blends, reports how many items were cut and how well the cut
//! separated real blends from noise.

use std::collections::BTreeSet;

/// Outcome of comparing two stages.
#[derive(Debug, Clone, PartialEq)]
pub struct StageAudit {
    pub before: usize,
    pub after: usize,
    pub truth: Option<TruthAudit>,
    /// Sample of retained items (only filled without a truth set).
    pub sample_kept: Vec<String>,
    /// Sample of removed items (only filled without a truth set).
    pub sample_cut: Vec<String>,
}

/// Confusion counts against a set of known blends.
#[derive(Debug, Clone, PartialEq)]
pub struct TruthAudit {
    /// Known blends that were present before the stage and removed by it.
    pub positives_cut: usize,
    /// Retained positives / positives present before. `None` without positives.
    pub true_positive_rate: Option<f64>,
    /// Non-blends removed by the stage.
    pub negatives_cut: usize,
    /// Removed negatives / negatives present before. `None` without negatives.
    pub true_negative_rate: Option<f64>,
    pub sample_true_positives: Vec<String>,
    pub sample_false_positives: Vec<String>,
    pub sample_true_negatives: Vec<String>,
    pub sample_false_negatives: Vec<String>,
}

impl StageAudit {
    pub fn items_cut(&self) -> usize {
        self.before.saturating_sub(self.after)
    }

    /// Compare two stages. Samples are the first `sample_size` items in
    /// sorted order, so repeated runs report the same examples.
    pub fn compare<'a>(
        before: impl IntoIterator<Item = &'a str>,
        after: impl IntoIterator<Item = &'a str>,
        truth: Option<&BTreeSet<String>>,
        sample_size: usize,
    ) -> Self {
        let before: BTreeSet<&str> = before.into_iter().collect();
        let after: BTreeSet<&str> = after.into_iter().collect();
        let cut: BTreeSet<&str> = before.difference(&after).copied().collect();

        match truth {
            Some(truth) => {
                let is_true = |s: &str| truth.contains(s);
                let positives = before.iter().filter(|s| is_true(s)).count();
                let negatives = before.len() - positives;
                let retained_positives = after.iter().filter(|s| is_true(s)).count();
                let negatives_cut = cut.iter().filter(|s| !is_true(s)).count();

                let audit = TruthAudit {
                    positives_cut: positives.saturating_sub(retained_positives),
                    true_positive_rate: rate(retained_positives, positives),
                    negatives_cut,
                    true_negative_rate: rate(negatives_cut, negatives),
                    sample_true_positives: sample(
                        after.iter().copied().filter(|s| is_true(s)),
                        sample_size,
                    ),
                    sample_false_positives: sample(
                        after.iter().copied().filter(|s| !is_true(s)),
                        sample_size,
                    ),
                    sample_true_negatives: sample(
                        cut.iter().copied().filter(|s| !is_true(s)),
                        sample_size,
                    ),
                    sample_false_negatives: sample(
                        cut.iter().copied().filter(|s| is_true(s)),
                        sample_size,
                    ),
                };
                Self {
                    before: before.len(),
                    after: after.len(),
                    truth: Some(audit),
                    sample_kept: Vec::new(),
                    sample_cut: Vec::new(),
                }
            }
            None => Self {
                before: before.len(),
                after: after.len(),
                truth: None,
                sample_kept: sample(after.iter().copied(), sample_size),
                sample_cut: sample(cut.iter().copied(), sample_size),
            },
        }
    }
}

fn sample<'a>(items: impl Iterator<Item = &'a str>, n: usize) -> Vec<String> {
    items.take(n).map(str::to_string).collect()
}

fn rate(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_truth_reports_samples() {
        let audit = StageAudit::compare(
            ["alpha", "beta", "gamma", "delta"],
            ["beta", "delta"],
            None,
            1,
        );
        assert_eq!(audit.before, 4);
        assert_eq!(audit.after, 2);
        assert_eq!(audit.items_cut(), 2);
        assert!(audit.truth.is_none());
        assert_eq!(audit.sample_kept, vec!["beta"]);
        assert_eq!(audit.sample_cut, vec!["alpha"]);
    }

    #[test]
    fn with_truth_counts_confusion() {
        let truth: BTreeSet<String> = ["belieber", "brunch"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let audit = StageAudit::compare(
            ["belieber", "brunch", "monday", "racecar", "phone"],
            ["belieber", "phone"],
            Some(&truth),
            10,
        );
        let t = audit.truth.unwrap();
        assert_eq!(t.positives_cut, 1);
        assert_eq!(t.true_positive_rate, Some(0.5));
        assert_eq!(t.negatives_cut, 2);
        assert_eq!(t.true_negative_rate, Some(2.0 / 3.0));
        assert_eq!(t.sample_true_positives, vec!["belieber"]);
        assert_eq!(t.sample_false_positives, vec!["phone"]);
        assert_eq!(t.sample_true_negatives, vec!["monday", "racecar"]);
        assert_eq!(t.sample_false_negatives, vec!["brunch"]);
    }

    #[test]
    fn rates_undefined_without_denominator() {
        let truth = BTreeSet::new();
        let audit = StageAudit::compare(["word"], ["word"], Some(&truth), 5);
        let t = audit.truth.unwrap();
        assert_eq!(t.true_positive_rate, None);
        assert_eq!(t.true_negative_rate, Some(0.0));
    }
}
