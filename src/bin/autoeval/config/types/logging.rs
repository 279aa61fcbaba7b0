use serde::{Deserialize, Serialize};

use super::{DEFAULT_LOG_ROTATE_KEEP, DEFAULT_LOG_ROTATE_SIZE};

/// `[logging]` section. Logs go to a rotating file so they never interleave
/// with the progress bar.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// flexi_logger level string, e.g. `info` or `autoeval=debug`; `RUST_LOG` wins
    pub level: String,
    pub path: Option<String>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
    /// Also print warnings and errors to stderr
    pub duplicate_warnings: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
            duplicate_warnings: false,
        }
    }
}
