use async_trait::async_trait;

use crate::error::EvalError;

/// Supplies the "actual" text for a prompt.
///
/// Implementations are called once per dataset row, sequentially. Errors
/// are treated as row-local by the batch loop and never retried.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, input: &str) -> Result<String, EvalError>;
}

