//! Automatic evaluation of expected/actual text pairs.
//!
//! A dataset row holds a prompt (`입력`), an expected answer (`예상 답변`) and,
//! optionally, an answer that was already produced (`답변`). The batch
//! evaluator either scores the stored answers or asks a chat-completions
//! endpoint for fresh ones, and scores each with an LCS ratio and ROUGE F1.
//!
//! ```rust,ignore
//! use autoeval::dataset::Dataset;
//! use autoeval::evaluator::{BatchConfig, BatchEvaluator, LogObserver};
//!
//! let dataset = Dataset::from_path("sample.csv")?;
//! let evaluator = BatchEvaluator::precomputed(BatchConfig::default());
//! let results = evaluator.run(&dataset, &mut LogObserver).await?;
//! println!("{}", results.summary());
//! ```

pub mod backends;
pub mod dataset;
pub mod error;
pub mod evaluator;
pub mod responder;
pub mod scoring;

pub use error::EvalError;
pub use responder::Responder;
