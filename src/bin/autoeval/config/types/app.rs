use serde::{Deserialize, Serialize};

use super::{BatchSection, LoggingConfig, ResponderSection};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub responder: ResponderSection,
    pub batch: BatchSection,
    pub logging: LoggingConfig,
}
