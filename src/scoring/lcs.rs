use super::ScoreError;

/// Length of the longest common subsequence of two sequences.
///
/// Keeps two rolling rows of the DP table; `row[j]` holds the LCS length
/// of the current reference prefix and the first `j` candidate items.
pub fn lcs_length<T: PartialEq>(reference: &[T], candidate: &[T]) -> usize {
    let mut prev = vec![0usize; candidate.len() + 1];
    let mut row = vec![0usize; candidate.len() + 1];
    for r in reference {
        for (j, c) in candidate.iter().enumerate() {
            row[j + 1] = if r == c {
                prev[j] + 1
            } else {
                row[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    prev[candidate.len()]
}

/// Character-level LCS length divided by the candidate length, rounded
/// to two decimals.
///
/// Not symmetric: pass `(expected, actual)`.
pub fn lcs_ratio(reference: &str, candidate: &str) -> Result<f64, ScoreError> {
    let candidate: Vec<char> = candidate.chars().collect();
    if candidate.is_empty() {
        return Err(ScoreError::EmptyCandidate);
    }
    let reference: Vec<char> = reference.chars().collect();
    let ratio = lcs_length(&reference, &candidate) as f64 / candidate.len() as f64;
    Ok(round2(ratio))
}

/// Rounds to two decimals, half to even on the exact binary value.
///
/// Float formatting works on the exact value, so `0.125` becomes `0.12`
/// while `0.075` (stored just below the tie) becomes `0.07`.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
