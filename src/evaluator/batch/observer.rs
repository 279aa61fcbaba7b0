use std::time::Duration;

use crate::error::EvalError;

use super::types::{EvalSummary, EvaluationRow};

/// Receives progress events from [`BatchEvaluator::run`](super::BatchEvaluator::run).
///
/// All methods default to doing nothing.
pub trait EvalObserver: Send {
    fn on_row_scored(&mut self, _row: &EvaluationRow) {}

    /// A row was skipped. `index` is its position in the input dataset.
    fn on_row_failed(&mut self, _index: usize, _err: &EvalError) {}

    fn on_pause(&mut self, _processed: usize, _pause: Duration) {}

    fn on_finished(&mut self, _summary: &EvalSummary) {}
}

/// Operator-facing line for a skipped row.
pub fn failure_message(index: usize, err: &EvalError) -> String {
    format!("{err} in index {index}")
}

/// Reports every event through the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl EvalObserver for LogObserver {
    fn on_row_scored(&mut self, row: &EvaluationRow) {
        log::debug!("row {} scored: {:?}", row.index(), row.scores());
    }

    fn on_row_failed(&mut self, index: usize, err: &EvalError) {
        log::warn!("{}", failure_message(index, err));
    }

    fn on_pause(&mut self, processed: usize, pause: Duration) {
        log::info!("{processed} rows processed, pausing for {pause:?}");
    }

    fn on_finished(&mut self, summary: &EvalSummary) {
        log::info!("evaluation finished: {summary}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_names_the_index_once() {
        let err = EvalError::RowParse {
            row: 7,
            message: "cell is empty".into(),
        };
        let message = failure_message(7, &err);
        assert_eq!(message, "Row parse error: cell is empty in index 7");
        assert_eq!(message.matches("index").count(), 1);
    }
}
