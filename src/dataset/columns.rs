use crate::error::EvalError;

pub const INPUT_COLUMN: &str = "입력";
pub const EXPECTED_COLUMN: &str = "예상 답변";
pub const ANSWER_COLUMN: &str = "답변";
pub const SCORE_COLUMN: &str = "점수";
pub const LCS_SCORE_COLUMN: &str = "LCS 점수";
pub const ROUGE_SCORE_COLUMN: &str = "ROUGE 점수";

/// Positions of the known columns in a dataset header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub input: usize,
    pub expected: usize,
    pub answer: Option<usize>,
}

impl Columns {
    /// Locates the columns by name. `입력` and `예상 답변` are required.
    pub fn from_headers<I, S>(headers: I) -> Result<Self, EvalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<S> = headers.into_iter().collect();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| clean_header(h.as_ref()) == name)
        };
        Ok(Self {
            input: position(INPUT_COLUMN)
                .ok_or_else(|| EvalError::MissingColumn(INPUT_COLUMN.to_string()))?,
            expected: position(EXPECTED_COLUMN)
                .ok_or_else(|| EvalError::MissingColumn(EXPECTED_COLUMN.to_string()))?,
            answer: position(ANSWER_COLUMN),
        })
    }

    pub fn has_answer(&self) -> bool {
        self.answer.is_some()
    }
}

fn clean_header(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}
