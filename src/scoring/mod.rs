//! Text-similarity scoring core.
//!
//! - [`normalize`] strips punctuation before comparison
//! - [`lcs_ratio`] is a character-level longest-common-subsequence ratio
//! - [`rouge_scores`] reports ROUGE-1, ROUGE-2 and ROUGE-L F1

mod lcs;
mod normalize;
mod rouge;

pub use lcs::{lcs_length, lcs_ratio};
pub use normalize::normalize;
pub use rouge::{rouge_scores, RougeScores};

use thiserror::Error;

/// Which side of a comparison was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSide {
    Reference,
    Candidate,
}

impl std::fmt::Display for TextSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextSide::Reference => write!(f, "reference"),
            TextSide::Candidate => write!(f, "candidate"),
        }
    }
}

/// Inputs a scorer refuses to score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// LCS ratio is normalized by candidate length
    #[error("candidate text is empty")]
    EmptyCandidate,
    /// A text produced no tokens
    #[error("{0} text has no tokens")]
    EmptyInput(TextSide),
}
