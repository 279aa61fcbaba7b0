use std::path::{Path, PathBuf};
use std::time::Duration;

use autoeval::backends::ChatCompletionsConfig;
use autoeval::dataset::{Columns, TableFormat};
use autoeval::evaluator::{BatchConfig, Mode};
use secrecy::SecretString;

use crate::args::{CliArgs, ModeArg};
use crate::config::{BatchSection, ResponderSection};
use crate::wizard::Prompter;

pub(super) const API_KEY_ENV: &str = "AUTOEVAL_API_KEY";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_SYSTEM_PROMPT: &str = "Answer the user's question accurately and concisely.";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_FREQUENCY_PENALTY: f32 = 0.0;

pub(super) fn resolve_mode(arg: ModeArg, columns: &Columns) -> Mode {
    match arg {
        ModeArg::Precomputed => Mode::Precomputed,
        ModeArg::Remote => Mode::Remote,
        ModeArg::Auto if columns.has_answer() => Mode::Precomputed,
        ModeArg::Auto => Mode::Remote,
    }
}

/// Result file used when `--output` is not given: the input's format.
pub(super) fn default_output(input: &Path) -> PathBuf {
    match TableFormat::from_path(input) {
        TableFormat::Workbook => PathBuf::from("result.xlsx"),
        TableFormat::Csv => PathBuf::from("result.csv"),
    }
}

pub(super) fn resolve_batch(args: &CliArgs, section: &BatchSection) -> BatchConfig {
    BatchConfig {
        pause_every: args.pause_every.unwrap_or(section.pause_every),
        pause: Duration::from_secs(args.pause_seconds.unwrap_or(section.pause_seconds)),
    }
}

/// Builds the responder settings once, before the batch starts.
///
/// Command-line flags win over the config file; whatever is still missing
/// is asked from `prompter`.
pub(super) fn resolve_responder(
    args: &CliArgs,
    section: &ResponderSection,
    api_key_env: Option<String>,
    prompter: &mut dyn Prompter,
) -> anyhow::Result<ChatCompletionsConfig> {
    let endpoint = match args.endpoint.clone().or_else(|| section.endpoint.clone()) {
        Some(endpoint) => endpoint,
        None => prompter.text("Endpoint URL", None)?,
    };
    let system = match args.system.clone().or_else(|| section.system_prompt.clone()) {
        Some(system) => system,
        None => prompter.text("System instruction", Some(DEFAULT_SYSTEM_PROMPT))?,
    };
    let model = match args.model.clone().or_else(|| section.model.clone()) {
        Some(model) => model,
        None => prompter.text("Model", Some(DEFAULT_MODEL))?,
    };
    let temperature = match args.temperature.or(section.temperature) {
        Some(value) => value,
        None => prompter.float("Temperature", DEFAULT_TEMPERATURE)?,
    };
    let frequency_penalty = match args.frequency_penalty.or(section.frequency_penalty) {
        Some(value) => value,
        None => prompter.float("Frequency penalty", DEFAULT_FREQUENCY_PENALTY)?,
    };

    Ok(ChatCompletionsConfig {
        endpoint,
        model,
        system,
        temperature,
        frequency_penalty,
        timeout_seconds: args.timeout.or(section.timeout_seconds),
        api_key: args
            .api_key
            .clone()
            .or(api_key_env)
            .filter(|key| !key.is_empty())
            .map(SecretString::new),
    })
}

/// Stored form of resolved settings, without the API key.
pub(super) fn to_sections(
    responder: &ChatCompletionsConfig,
    batch: &BatchConfig,
) -> (ResponderSection, BatchSection) {
    (
        ResponderSection {
            endpoint: Some(responder.endpoint.clone()),
            model: Some(responder.model.clone()),
            system_prompt: Some(responder.system.clone()),
            temperature: Some(responder.temperature),
            frequency_penalty: Some(responder.frequency_penalty),
            timeout_seconds: responder.timeout_seconds,
        },
        BatchSection {
            pause_every: batch.pause_every,
            pause_seconds: batch.pause.as_secs(),
        },
    )
}
