use std::time::Duration;

use autoeval::evaluator::{
    failure_message, EvalObserver, EvalSummary, EvaluationRow, LogObserver,
};
use autoeval::EvalError;
use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Progress bar on stderr; row errors are printed above it as they happen.
pub struct ProgressObserver {
    bar: ProgressBar,
    log: LogObserver,
}

impl ProgressObserver {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self {
            bar,
            log: LogObserver,
        }
    }
}

impl EvalObserver for ProgressObserver {
    fn on_row_scored(&mut self, row: &EvaluationRow) {
        self.log.on_row_scored(row);
        self.bar.set_message(String::new());
        self.bar.inc(1);
    }

    fn on_row_failed(&mut self, index: usize, err: &EvalError) {
        self.log.on_row_failed(index, err);
        self.bar.println(failure_message(index, err));
        self.bar.inc(1);
    }

    fn on_pause(&mut self, processed: usize, pause: Duration) {
        self.log.on_pause(processed, pause);
        self.bar.set_message(format!("pausing {:.1}s", pause.as_secs_f32()));
    }

    fn on_finished(&mut self, summary: &EvalSummary) {
        self.log.on_finished(summary);
        self.bar.finish_with_message(summary.to_string());
    }
}
