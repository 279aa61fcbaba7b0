use serde::{Deserialize, Serialize};

/// Stored responder settings. Unset fields are asked for or defaulted at
/// run time. The API key is never stored here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponderSection {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub timeout_seconds: Option<u64>,
}
