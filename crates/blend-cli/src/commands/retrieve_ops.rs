use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use blend_core::evaluation::{self, GroundTruth};
use blend_core::retrieval::{retrieve_sources_with, RetrievalResults, ScoredSource};
use blend_core::screening::Screening;
use blend_core::settings::RetrievalSettings;

use super::config_ops;

#[derive(Serialize)]
struct Report<'a> {
    results: &'a RetrievalResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<&'a BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mean_score: Option<f64>,
}

pub fn retrieve(
    checkpoint: &str,
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
    let screening = die!(
        Screening::open(Path::new(checkpoint)),
        "Error reading {checkpoint}: {}"
    );
    eprintln!(
        "Loaded {checkpoint} ({} candidates, {} dictionary words)",
        screening.candidates.len(),
        screening.lexicon.len()
    );
    retrieve_and_report(&screening, &settings.retrieval, answers.as_ref(), json);
}

/// Run retrieval on a finished screening and print the results, scored
/// against `answers` when given.
pub fn retrieve_and_report(
    screening: &Screening,
    settings: &RetrievalSettings,
    answers: Option<&GroundTruth>,
    json: bool,
) {
    let results = retrieve_sources_with(&screening.candidates, &screening.lexicon, settings);
    eprintln!(
        "Retrieved sources for {} of {} candidates",
        results.len(),
        screening.candidates.len()
    );

    let scores = answers.map(|a| evaluation::evaluate(&results, a));
    let mean = scores.as_ref().and_then(evaluation::mean_score);

    if json {
        let report = Report {
            results: &results,
            scores: scores.as_ref(),
            mean_score: mean,
        };
        let out = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{out}");
        return;
    }

    print_table(&results);
    if let Some(scores) = &scores {
        print_scores(scores, mean);
    }
}

fn describe(best: Option<&ScoredSource>) -> String {
    best.map_or_else(
        || "-".to_string(),
        |s| format!("{} ({:.3})", s.word, s.score),
    )
}

fn print_table(results: &RetrievalResults) {
    let width = results.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    for (token, found) in results {
        println!(
            "{token:<width$}  start: {:<24}  end: {}",
            describe(found.best_forward()),
            describe(found.best_backward())
        );
    }
}

fn print_scores(scores: &BTreeMap<String, f64>, mean: Option<f64>) {
    println!();
    for (blend, score) in scores {
        println!("{blend}: {score:.3}");
    }
    match mean {
        Some(mean) => println!("Mean reciprocal rank: {mean:.3} over {} blends", scores.len()),
        None => println!("No known blends among the results"),
    }
}
