use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{lcs_length, ScoreError, TextSide};

/// F1 values of ROUGE-1, ROUGE-2 and ROUGE-L.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RougeScores {
    pub rouge1_f: f64,
    pub rouge2_f: f64,
    #[serde(rename = "rougeL_f")]
    pub rouge_l_f: f64,
}

/// Computes ROUGE-1/2/L F1 of `candidate` against `reference`.
///
/// Precision is taken over the candidate, recall over the reference.
/// Fails only when one side has no tokens at all; a text too short for
/// bigrams scores 0.0 on ROUGE-2.
pub fn rouge_scores(reference: &str, candidate: &str) -> Result<RougeScores, ScoreError> {
    let ref_tokens = tokenize(reference);
    if ref_tokens.is_empty() {
        return Err(ScoreError::EmptyInput(TextSide::Reference));
    }
    let cand_tokens = tokenize(candidate);
    if cand_tokens.is_empty() {
        return Err(ScoreError::EmptyInput(TextSide::Candidate));
    }

    Ok(RougeScores {
        rouge1_f: rouge_n(&ref_tokens, &cand_tokens, 1),
        rouge2_f: rouge_n(&ref_tokens, &cand_tokens, 2),
        rouge_l_f: rouge_l(&ref_tokens, &cand_tokens),
    })
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for gram in tokens.windows(n) {
            *counts.entry(gram).or_insert(0) += 1;
        }
    }
    counts
}

fn rouge_n(reference: &[String], candidate: &[String], n: usize) -> f64 {
    let ref_counts = ngram_counts(reference, n);
    let cand_counts = ngram_counts(candidate, n);
    let ref_total: usize = ref_counts.values().sum();
    let cand_total: usize = cand_counts.values().sum();
    if ref_total == 0 || cand_total == 0 {
        return 0.0;
    }

    // Clipped overlap: an n-gram counts at most as often as it occurs in the reference.
    let overlap: usize = cand_counts
        .iter()
        .filter_map(|(gram, cand)| ref_counts.get(gram).map(|r| (*cand).min(*r)))
        .sum();

    f1(overlap as f64 / cand_total as f64, overlap as f64 / ref_total as f64)
}

fn rouge_l(reference: &[String], candidate: &[String]) -> f64 {
    let lcs = lcs_length(reference, candidate) as f64;
    f1(lcs / candidate.len() as f64, lcs / reference.len() as f64)
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}
