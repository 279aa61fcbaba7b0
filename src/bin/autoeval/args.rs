use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "autoeval",
    about = "Score expected answers against stored or generated answers"
)]
pub struct CliArgs {
    /// Dataset (.csv or .xlsx) with `입력`, `예상 답변` and optionally `답변` columns
    #[arg(index = 1)]
    pub input: PathBuf,
    /// Result file; defaults to result.xlsx or result.csv after the input format
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
    pub mode: ModeArg,
    #[arg(long)]
    pub endpoint: Option<String>,
    #[arg(long, short = 'm')]
    pub model: Option<String>,
    #[arg(long)]
    pub system: Option<String>,
    #[arg(long)]
    pub temperature: Option<f32>,
    #[arg(long, allow_negative_numbers = true)]
    pub frequency_penalty: Option<f32>,
    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    #[arg(long)]
    pub pause_every: Option<usize>,
    #[arg(long)]
    pub pause_seconds: Option<u64>,
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Log level, overrides the config file
    #[arg(long)]
    pub log_level: Option<String>,
    /// Never prompt; missing settings fall back to defaults
    #[arg(long)]
    pub no_interactive: bool,
    /// Store the resolved responder and batch settings in the config file
    #[arg(long)]
    pub save_config: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    /// Precomputed when the dataset has a `답변` column, remote otherwise
    Auto,
    Precomputed,
    Remote,
}
