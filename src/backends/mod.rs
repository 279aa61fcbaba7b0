//! HTTP responders.

pub mod chat_completions;

pub use chat_completions::{ChatCompletions, ChatCompletionsConfig};
