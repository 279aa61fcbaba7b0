//! Dataset evaluation.

pub mod batch;

pub use batch::{
    failure_message, AnswerSource, BatchConfig, BatchEvaluator, EvalObserver, EvalSummary,
    EvaluationRow, LogObserver, Metric, Mode, ResultCollection, Score,
};
