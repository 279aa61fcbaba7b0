use std::fmt;
use std::time::Duration;

const DEFAULT_PAUSE_EVERY: usize = 10;
const DEFAULT_PAUSE_SECS: u64 = 3;

/// Where the "actual" answer of a row comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Read from the `답변` column
    Precomputed,
    /// Generated by a remote responder
    Remote,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Precomputed => write!(f, "precomputed"),
            Mode::Remote => write!(f, "remote"),
        }
    }
}

/// Pacing of the batch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Pause after this many processed rows; 0 disables pausing
    pub pause_every: usize,
    /// Length of each pause
    pub pause: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            pause_every: DEFAULT_PAUSE_EVERY,
            pause: Duration::from_secs(DEFAULT_PAUSE_SECS),
        }
    }
}

impl BatchConfig {
    /// Whether the loop pauses after `processed` rows out of `total`.
    /// No pause follows the final row.
    pub(crate) fn pause_after(&self, processed: usize, total: usize) -> bool {
        self.pause_every > 0 && processed % self.pause_every == 0 && processed < total
    }
}
