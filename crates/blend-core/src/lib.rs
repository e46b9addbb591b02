//! Lexical blend detection: finds novel words such as "belieber" in a
//! corpus and guesses the two dictionary words they were formed from.
//!
//! The pipeline has two halves. [`screen_candidates`] counts corpus tokens
//! and runs the heuristic filters that discard proper nouns, compounds and
//! typos. [`retrieve_sources`] then scores dictionary words against each
//! surviving candidate from both ends. [`evaluate`] rates the guesses
//! against known answers.

pub mod checkpoint;
pub mod corpus;
pub mod evaluation;
pub mod lexicon;
pub mod retrieval;
pub mod screening;
pub mod settings;
pub mod table;
#[cfg(test)]
pub(crate) mod testutil;

pub use evaluation::evaluate;
pub use retrieval::{retrieve_sources, CandidateWithSources, RetrievalResults};
pub use screening::{screen_candidates, Screening};
