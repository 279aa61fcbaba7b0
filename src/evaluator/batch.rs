#[path = "batch/types.rs"]
mod types;

#[path = "batch/config.rs"]
mod config;

#[path = "batch/observer.rs"]
mod observer;

#[path = "batch/evaluator.rs"]
mod evaluator;

#[cfg(test)]
#[path = "batch/tests.rs"]
mod tests;

pub use config::{BatchConfig, Mode};
pub use evaluator::{AnswerSource, BatchEvaluator};
pub use observer::{failure_message, EvalObserver, LogObserver};
pub use types::{EvalSummary, EvaluationRow, Metric, ResultCollection, Score};
