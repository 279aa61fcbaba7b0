use autoeval::evaluator::BatchConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchSection {
    pub pause_every: usize,
    pub pause_seconds: u64,
}

impl Default for BatchSection {
    fn default() -> Self {
        let batch = BatchConfig::default();
        Self {
            pause_every: batch.pause_every,
            pause_seconds: batch.pause.as_secs(),
        }
    }
}
