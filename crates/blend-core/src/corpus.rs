//! Raw tweet text to case-annotated tokens.
//!
//! Case carries meaning downstream: lowercase tokens are common words,
//! Capitalized ones are proper-noun evidence, and ALL CAPS marks tokens whose
//! case could not be trusted (sentence-initial, or oddly mixed). Cleanup
//! therefore rewrites case rather than discarding it.

use std::io;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Read a one-item-per-line file, trimming each line and skipping blanks.
pub fn read_lines(path: &Path) -> Result<Vec<String>, CorpusError> {
    let text = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern must compile"))
}

fn user_reference() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"@USER_\w{8}")
}

fn word_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"\w+")
}

fn sentence_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"(?:^|[.!?])\s*(\w+)")
}

fn hashtag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"#\S*")
}

/// Letters joined by a symbol, e.g. "e@mail" or "and&or". Digits and common
/// punctuation do not count as joining symbols.
fn symbol_joined() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r#"[A-Za-z]+[^A-Za-z0-9\s?!,.\-:;()'"/]+[A-Za-z]+"#)
}

fn non_letter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, r"[^A-Za-z\s]")
}

/// True if `word` contains a unit of one to three characters repeated at
/// least three times in a row ("soooo", "hahaha", "lolololol").
pub fn has_repeated_unit(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    (1..=3).any(|unit| {
        chars.len() >= unit * 3
            && (0..=chars.len() - unit * 3).any(|start| {
                let first = &chars[start..start + unit];
                (1..3).all(|k| &chars[start + k * unit..start + (k + 1) * unit] == first)
            })
    })
}

/// Final case for a cleaned word. Lowercase and simple Capitalized words
/// are kept; any other mixed case is raised to ALL CAPS.
fn resolve_case(word: &str) -> String {
    let has_lower = word.chars().any(char::is_lowercase);
    let has_upper = word.chars().any(char::is_uppercase);
    if !(has_lower && has_upper) {
        return word.to_string();
    }
    let mut rest = word.chars().skip(1);
    if rest.all(|c| !c.is_uppercase()) {
        word.to_string()
    } else {
        word.to_uppercase()
    }
}

/// Clean one line of text into tokens.
pub fn clean_line(line: &str) -> Vec<String> {
    let text = user_reference().replace_all(line, " ");
    let text = word_run().replace_all(&text, |caps: &Captures| {
        if has_repeated_unit(&caps[0]) {
            " ".to_string()
        } else {
            caps[0].to_string()
        }
    });
    // Sentence-initial words go straight to ALL CAPS: their case says
    // nothing about whether they are proper nouns.
    let text = sentence_start().replace_all(&text, |caps: &Captures| {
        format!(" {} ", caps[1].to_uppercase())
    });
    let text = hashtag().replace_all(&text, " ");
    let text = symbol_joined().replace_all(&text, " ");
    let text = non_letter().replace_all(&text, " ");

    text.split_whitespace().map(resolve_case).collect()
}

/// Clean every line and concatenate the tokens.
pub fn tokenize<S: AsRef<str>>(lines: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut lines_seen = 0usize;
    let tokens: Vec<String> = lines
        .into_iter()
        .inspect(|_| lines_seen += 1)
        .flat_map(|line| clean_line(line.as_ref()))
        .collect();
    debug!(lines = lines_seen, tokens = tokens.len(), "corpus tokenized");
    tokens
}
