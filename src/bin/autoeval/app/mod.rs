mod settings;

use std::io::IsTerminal;

use anyhow::Context;
use autoeval::backends::ChatCompletions;
use autoeval::dataset::{write_results_to_path, Dataset, TableFormat};
use autoeval::evaluator::{BatchEvaluator, Mode};
use clap::Parser;

use crate::args::CliArgs;
use crate::config::{load_config, save_config};
use crate::logging::init_logging;
use crate::progress::ProgressObserver;
use crate::wizard::{DefaultsOnly, Prompter, TerminalPrompter};

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let mut loaded = load_config(args.config.clone())?;
    let _logger = init_logging(
        &loaded.config.logging,
        &loaded.paths,
        args.log_level.as_deref(),
    )?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| settings::default_output(&args.input));
    TableFormat::for_output(&output)?;

    let dataset = Dataset::from_path(&args.input)
        .with_context(|| format!("failed to load dataset {}", args.input.display()))?;
    let mode = settings::resolve_mode(args.mode, dataset.columns());
    let batch = settings::resolve_batch(&args, &loaded.config.batch);

    let evaluator = match mode {
        Mode::Precomputed => BatchEvaluator::precomputed(batch),
        Mode::Remote => {
            let mut prompter: Box<dyn Prompter> =
                if !args.no_interactive && std::io::stdin().is_terminal() {
                    Box::new(TerminalPrompter::default())
                } else {
                    Box::new(DefaultsOnly)
                };
            let responder_cfg = settings::resolve_responder(
                &args,
                &loaded.config.responder,
                std::env::var(settings::API_KEY_ENV).ok(),
                prompter.as_mut(),
            )?;
            if args.save_config {
                let (responder_section, batch_section) =
                    settings::to_sections(&responder_cfg, &batch);
                loaded.config.responder = responder_section;
                loaded.config.batch = batch_section;
                save_config(&loaded.config, &loaded.paths)?;
                println!("Settings saved to {}", loaded.paths.config_file.display());
            }
            BatchEvaluator::remote(Box::new(ChatCompletions::new(responder_cfg)?), batch)
        }
    };

    let mut observer = ProgressObserver::new(dataset.len() as u64);
    let results = evaluator.run(&dataset, &mut observer).await?;

    if results.is_empty() {
        println!("No rows were scored; {} was not written.", output.display());
        return Ok(());
    }
    write_results_to_path(&output, &results, mode)?;
    println!("평가 완료: {}", results.summary());
    println!("Results written to {}", output.display());
    Ok(())
}
