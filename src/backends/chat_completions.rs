//! Responder for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Each call sends the configured system instruction plus one user message
//! and reads back `choices[0].message.content`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::responder::Responder;

const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;
const FREQUENCY_PENALTY_RANGE: std::ops::RangeInclusive<f32> = -2.0..=2.0;

/// Configuration for the chat-completions responder.
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    /// Full URL the request is POSTed to.
    pub endpoint: String,
    /// Model identifier sent in the request body.
    pub model: String,
    /// Instruction sent as the system message of every request.
    pub system: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Penalty for repeated tokens.
    pub frequency_penalty: f32,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Sent as a bearer token when present.
    pub api_key: Option<SecretString>,
}

impl ChatCompletionsConfig {
    pub fn validate(&self) -> Result<Url, EvalError> {
        if self.model.trim().is_empty() {
            return Err(EvalError::InvalidConfig("model name is empty".to_string()));
        }
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(EvalError::InvalidConfig(format!(
                "temperature {} is outside {:?}",
                self.temperature, TEMPERATURE_RANGE
            )));
        }
        if !FREQUENCY_PENALTY_RANGE.contains(&self.frequency_penalty) {
            return Err(EvalError::InvalidConfig(format!(
                "frequency_penalty {} is outside {:?}",
                self.frequency_penalty, FREQUENCY_PENALTY_RANGE
            )));
        }
        let url = Url::parse(self.endpoint.trim()).map_err(|e| {
            EvalError::InvalidConfig(format!("invalid endpoint `{}`: {e}", self.endpoint))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(EvalError::InvalidConfig(format!(
                "unsupported endpoint scheme `{other}`"
            ))),
        }
    }
}

/// Client for a chat-completions endpoint.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct ChatCompletions {
    config: Arc<ChatCompletionsConfig>,
    url: Url,
    client: Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    temperature: f32,
    frequency_penalty: f32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl ChatCompletions {
    pub fn new(config: ChatCompletionsConfig) -> Result<Self, EvalError> {
        let mut builder = Client::builder();
        if let Some(sec) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        Self::with_client(builder.build()?, config)
    }

    /// Creates a responder with a custom HTTP client.
    pub fn with_client(client: Client, config: ChatCompletionsConfig) -> Result<Self, EvalError> {
        let url = config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            url,
            client,
        })
    }

    pub fn config(&self) -> &ChatCompletionsConfig {
        &self.config
    }

    fn request_body<'a>(&'a self, input: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &self.config.system,
                },
                ChatMessage {
                    role: "user",
                    content: input,
                },
            ],
            stream: false,
            temperature: self.config.temperature,
            frequency_penalty: self.config.frequency_penalty,
        }
    }
}

#[async_trait]
impl Responder for ChatCompletions {
    async fn respond(&self, input: &str) -> Result<String, EvalError> {
        let body = self.request_body(input);

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("chat completions request payload: {}", json);
            }
        }

        let mut request = self.client.post(self.url.clone()).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let resp = request.send().await?;
        let status = resp.status();
        log::debug!("chat completions HTTP status: {}", status);
        let raw = resp.text().await?;

        if status != StatusCode::OK {
            return Err(EvalError::ResponderStatus {
                status: status.as_u16(),
                body: raw,
            });
        }
        extract_content(raw)
    }
}

fn extract_content(raw: String) -> Result<String, EvalError> {
    let parsed: ChatCompletionResponse = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            return Err(EvalError::ResponseFormatError {
                message: err.to_string(),
                raw_response: raw,
            })
        }
    };
    match parsed.choices.into_iter().next() {
        Some(ChatChoice {
            message: ChatChoiceMessage {
                content: Some(content),
            },
        }) => Ok(content),
        Some(_) => Err(EvalError::ResponseFormatError {
            message: "first choice has no message content".to_string(),
            raw_response: raw,
        }),
        None => Err(EvalError::ResponseFormatError {
            message: "response has no choices".to_string(),
            raw_response: raw,
        }),
    }
}
