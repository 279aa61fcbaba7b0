use tokio::time::sleep;

use crate::dataset::{parse_literal, Dataset, DatasetRow, ANSWER_COLUMN};
use crate::error::EvalError;
use crate::responder::Responder;
use crate::scoring::{lcs_ratio, normalize, rouge_scores, ScoreError, TextSide};

use super::config::{BatchConfig, Mode};
use super::observer::EvalObserver;
use super::types::{EvaluationRow, Metric, ResultCollection, Score};

/// Source of the "actual" text for each row.
pub enum AnswerSource {
    /// Use the dataset's `답변` column
    Precomputed,
    /// Ask a responder with the normalized `입력` text
    Remote(Box<dyn Responder>),
}

/// Sequential evaluator that scores every dataset row in order.
pub struct BatchEvaluator {
    source: AnswerSource,
    config: BatchConfig,
}

impl BatchEvaluator {
    pub fn new(source: AnswerSource, config: BatchConfig) -> Self {
        Self { source, config }
    }

    /// Scores the dataset's own answers.
    pub fn precomputed(config: BatchConfig) -> Self {
        Self::new(AnswerSource::Precomputed, config)
    }

    /// Scores answers generated by `responder`.
    pub fn remote(responder: Box<dyn Responder>, config: BatchConfig) -> Self {
        Self::new(AnswerSource::Remote(responder), config)
    }

    pub fn mode(&self) -> Mode {
        match self.source {
            AnswerSource::Precomputed => Mode::Precomputed,
            AnswerSource::Remote(_) => Mode::Remote,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Runs the whole dataset.
    ///
    /// Row-local failures are handed to `observer` and the row is skipped;
    /// only structural errors are returned.
    pub async fn run(
        &self,
        dataset: &Dataset,
        observer: &mut dyn EvalObserver,
    ) -> Result<ResultCollection, EvalError> {
        if self.mode() == Mode::Precomputed && !dataset.columns().has_answer() {
            return Err(EvalError::MissingColumn(ANSWER_COLUMN.to_string()));
        }

        let total = dataset.len();
        log::info!("evaluating {total} rows in {} mode", self.mode());
        let mut results = ResultCollection::default();

        for (position, row) in dataset.rows().iter().enumerate() {
            match self.evaluate_row(row).await {
                Ok(scored) => {
                    observer.on_row_scored(&scored);
                    results.push(scored);
                }
                Err(err) if err.is_row_local() => {
                    observer.on_row_failed(row.index(), &err);
                    results.skip(row.index());
                }
                Err(err) => return Err(err),
            }

            let processed = position + 1;
            if self.mode() == Mode::Remote && self.config.pause_after(processed, total) {
                observer.on_pause(processed, self.config.pause);
                sleep(self.config.pause).await;
            }
        }

        observer.on_finished(&results.summary());
        Ok(results)
    }

    async fn evaluate_row(&self, row: &DatasetRow) -> Result<EvaluationRow, EvalError> {
        match &self.source {
            AnswerSource::Precomputed => evaluate_precomputed(row),
            AnswerSource::Remote(responder) => evaluate_remote(row, responder.as_ref()).await,
        }
    }
}

fn evaluate_precomputed(row: &DatasetRow) -> Result<EvaluationRow, EvalError> {
    let input = parse_literal(row.input()?).map_err(|e| EvalError::literal(row.index(), e))?;
    let expected = row.expected()?;
    let answer = row.answer()?;
    ensure_reference(expected)?;

    let lcs = lcs_ratio(expected, answer)?;
    Ok(EvaluationRow::new(
        row.index(),
        input.to_string(),
        expected.to_string(),
        answer.to_string(),
    )
    .with_score(Metric::Lcs, Score::Ratio(lcs)))
}

async fn evaluate_remote(
    row: &DatasetRow,
    responder: &dyn Responder,
) -> Result<EvaluationRow, EvalError> {
    let input = normalize(row.input()?);
    if input.trim().is_empty() {
        return Err(EvalError::RowParse {
            row: row.index(),
            message: "input is empty after normalization".to_string(),
        });
    }
    let expected = normalize(row.expected()?);
    ensure_reference(&expected)?;

    let actual = responder.respond(&input).await?;
    let lcs = lcs_ratio(&expected, &actual)?;
    let rouge = rouge_scores(&expected, &actual)?;

    Ok(EvaluationRow::new(row.index(), input, expected, actual)
        .with_score(Metric::Lcs, Score::Ratio(lcs))
        .with_score(Metric::Rouge, Score::Rouge(rouge)))
}

fn ensure_reference(expected: &str) -> Result<(), ScoreError> {
    if expected.trim().is_empty() {
        return Err(ScoreError::EmptyInput(TextSide::Reference));
    }
    Ok(())
}
