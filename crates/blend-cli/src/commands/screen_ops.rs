use std::collections::BTreeSet;
use std::path::Path;

use blend_core::corpus;
use blend_core::evaluation::{self, GroundTruth};
use blend_core::screening::{
    screen_candidates_observed, Screening, StageAudit, StageObserver, StageReport,
};
use blend_core::settings::ScreeningSettings;

use super::config_ops;
use super::retrieve_ops;

/// Number of example tokens printed per audit bucket.
const AUDIT_SAMPLE: usize = 5;

/// Number of dictionary words listed by `info`.
const INFO_TOP_WORDS: usize = 10;

/// Prints one line per stage, plus an audit against known blends when
/// answers are available.
struct ProgressObserver<'a> {
    truth: Option<&'a BTreeSet<String>>,
    previous: BTreeSet<String>,
}

impl<'a> ProgressObserver<'a> {
    fn new(truth: Option<&'a BTreeSet<String>>) -> Self {
        Self {
            truth,
            previous: BTreeSet::new(),
        }
    }

    /// Seed with the counted table, before any filter has run.
    fn starting_from(mut self, tokens: &[String]) -> Self {
        if self.truth.is_some() {
            self.previous = tokens.iter().map(|t| t.to_lowercase()).collect();
        }
        self
    }
}

impl StageObserver for ProgressObserver<'_> {
    fn on_stage(&mut self, report: &StageReport, screening: &Screening) {
        let unit = if report.stage.filters_dictionary() {
            "dictionary words"
        } else {
            "candidates"
        };
        eprintln!(
            "{}: {} -> {} {unit}",
            report.stage.name(),
            report.before,
            report.after
        );

        let Some(truth) = self.truth else {
            return;
        };
        if report.stage.filters_dictionary() {
            return;
        }
        let current: BTreeSet<String> =
            screening.candidates.tokens().map(str::to_string).collect();
        let audit = StageAudit::compare(
            self.previous.iter().map(String::as_str),
            current.iter().map(String::as_str),
            Some(truth),
            AUDIT_SAMPLE,
        );
        print_audit(&audit);
        self.previous = current;
    }
}

fn print_audit(audit: &StageAudit) {
    let Some(t) = &audit.truth else {
        return;
    };
    let pct = |rate: Option<f64>| rate.map_or("n/a".to_string(), |r| format!("{:.1}%", r * 100.0));
    eprintln!(
        "  blends cut: {} (kept {}), others cut: {} ({})",
        t.positives_cut,
        pct(t.true_positive_rate),
        t.negatives_cut,
        pct(t.true_negative_rate)
    );
    if !t.sample_false_negatives.is_empty() {
        eprintln!("  lost blends: {}", t.sample_false_negatives.join(", "));
    }
}

fn load_inputs(corpus_file: &str, dict_file: &str) -> (Vec<String>, Vec<String>) {
    let lines = die!(corpus::read_lines(Path::new(corpus_file)), "Error: {}");
    let tokens = corpus::tokenize(&lines);
    eprintln!("Corpus: {} lines, {} tokens", lines.len(), tokens.len());

    let dictionary = die!(corpus::read_lines(Path::new(dict_file)), "Error: {}");
    eprintln!("Dictionary: {} words", dictionary.len());
    (tokens, dictionary)
}

fn screen_with(
    tokens: &[String],
    dictionary: &[String],
    thresholds: &ScreeningSettings,
    truth: Option<&BTreeSet<String>>,
) -> Screening {
    let mut observer = ProgressObserver::new(truth).starting_from(tokens);
    screen_candidates_observed(tokens, dictionary, thresholds, &mut observer)
}

pub fn screen(corpus_file: &str, dict_file: &str, output_file: &str, settings_file: Option<&str>) {
    let settings = config_ops::load_settings(settings_file);
    let (tokens, dictionary) = load_inputs(corpus_file, dict_file);

    let screening = screen_with(&tokens, &dictionary, &settings.screening, None);
    die!(
        screening.save(Path::new(output_file)),
        "Error writing checkpoint: {}"
    );
    eprintln!(
        "Wrote {output_file} ({} candidates, {} dictionary words)",
        screening.candidates.len(),
        screening.lexicon.len()
    );
}

pub fn run(
    corpus_file: &str,
    dict_file: &str,
    answers_file: Option<&str>,
    json: bool,
    settings_file: Option<&str>,
) {
    let settings = config_ops::load_settings(settings_file);
    let answers: Option<GroundTruth> = answers_file.map(|file| {
        die!(
            evaluation::load_answers(Path::new(file)),
            "Error reading {file}: {}"
        )
    });
    let truth: Option<BTreeSet<String>> = answers.as_ref().map(|a| a.keys().cloned().collect());

    let (tokens, dictionary) = load_inputs(corpus_file, dict_file);
    let screening = screen_with(&tokens, &dictionary, &settings.screening, truth.as_ref());

    retrieve_ops::retrieve_and_report(&screening, &settings.retrieval, answers.as_ref(), json);
}

pub fn info(checkpoint: &str) {
    let screening = die!(
        Screening::open(Path::new(checkpoint)),
        "Error reading {checkpoint}: {}"
    );
    println!("Checkpoint: {checkpoint}");
    println!("  candidates: {}", screening.candidates.len());
    println!("  dictionary words: {}", screening.lexicon.len());
    let occurrences: u64 = screening.candidates.iter().map(|(_, e)| e.total()).sum();
    println!("  candidate occurrences: {occurrences}");

    let mut entries = screening.lexicon.entries();
    // Stable sort keeps alphabetical order among equal frequencies.
    entries.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    if !entries.is_empty() {
        let top: Vec<String> = entries
            .iter()
            .take(INFO_TOP_WORDS)
            .map(|e| format!("{} ({})", e.word, e.frequency))
            .collect();
        println!("  most frequent dictionary words: {}", top.join(", "));
    }
}
