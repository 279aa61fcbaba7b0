use std::collections::BTreeMap;
use std::fmt;

use crate::scoring::RougeScores;

/// Metrics a row can be scored with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Lcs,
    Rouge,
}

/// A finalized score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Ratio(f64),
    Rouge(RougeScores),
}

/// One scored dataset row. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRow {
    index: usize,
    input: String,
    expected: String,
    actual: String,
    scores: BTreeMap<Metric, Score>,
}

impl EvaluationRow {
    pub(crate) fn new(index: usize, input: String, expected: String, actual: String) -> Self {
        Self {
            index,
            input,
            expected,
            actual,
            scores: BTreeMap::new(),
        }
    }

    pub(crate) fn with_score(mut self, metric: Metric, score: Score) -> Self {
        self.scores.insert(metric, score);
        self
    }

    /// Index of the source row in the input dataset.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn scores(&self) -> &BTreeMap<Metric, Score> {
        &self.scores
    }

    pub fn lcs(&self) -> Option<f64> {
        match self.scores.get(&Metric::Lcs) {
            Some(Score::Ratio(ratio)) => Some(*ratio),
            _ => None,
        }
    }

    pub fn rouge(&self) -> Option<RougeScores> {
        match self.scores.get(&Metric::Rouge) {
            Some(Score::Rouge(scores)) => Some(*scores),
            _ => None,
        }
    }
}

/// Scored rows in dataset order, plus the indices of rows that were skipped.
#[derive(Debug, Clone, Default)]
pub struct ResultCollection {
    rows: Vec<EvaluationRow>,
    skipped: Vec<usize>,
}

impl ResultCollection {
    pub(crate) fn push(&mut self, row: EvaluationRow) {
        self.rows.push(row);
    }

    pub(crate) fn skip(&mut self, index: usize) {
        self.skipped.push(index);
    }

    pub fn rows(&self) -> &[EvaluationRow] {
        &self.rows
    }

    pub fn skipped(&self) -> &[usize] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvaluationRow> {
        self.rows.iter()
    }

    pub fn summary(&self) -> EvalSummary {
        let lcs: Vec<f64> = self.rows.iter().filter_map(EvaluationRow::lcs).collect();
        let rouge: Vec<RougeScores> = self.rows.iter().filter_map(EvaluationRow::rouge).collect();
        EvalSummary {
            scored: self.rows.len(),
            skipped: self.skipped.len(),
            mean_lcs: mean(&lcs),
            mean_rouge: (!rouge.is_empty()).then(|| RougeScores {
                rouge1_f: mean_of(&rouge, |s| s.rouge1_f),
                rouge2_f: mean_of(&rouge, |s| s.rouge2_f),
                rouge_l_f: mean_of(&rouge, |s| s.rouge_l_f),
            }),
        }
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a EvaluationRow;
    type IntoIter = std::slice::Iter<'a, EvaluationRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

fn mean_of(scores: &[RougeScores], pick: impl Fn(&RougeScores) -> f64) -> f64 {
    scores.iter().map(pick).sum::<f64>() / scores.len() as f64
}

/// Aggregate figures of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalSummary {
    pub scored: usize,
    pub skipped: usize,
    pub mean_lcs: Option<f64>,
    pub mean_rouge: Option<RougeScores>,
}

impl fmt::Display for EvalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows scored, {} skipped", self.scored, self.skipped)?;
        if let Some(lcs) = self.mean_lcs {
            write!(f, ", mean LCS {lcs:.2}")?;
        }
        if let Some(rouge) = &self.mean_rouge {
            write!(
                f,
                ", mean ROUGE-1/2/L {:.4}/{:.4}/{:.4}",
                rouge.rouge1_f, rouge.rouge2_f, rouge.rouge_l_f
            )?;
        }
        Ok(())
    }
}
