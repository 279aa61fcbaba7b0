use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::dataset::Dataset;
use crate::error::EvalError;
use crate::responder::Responder;
use crate::scoring::ScoreError;

/// Answers `question N` with `answer N`, failing for the listed inputs.
#[derive(Default)]
struct ScriptedResponder {
    fail_on: Vec<String>,
    reply_empty: bool,
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn respond(&self, input: &str) -> Result<String, EvalError> {
        self.seen.lock().unwrap().push(input.to_string());
        if self.fail_on.iter().any(|f| f == input) {
            return Err(EvalError::ResponderStatus {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        if self.reply_empty {
            return Ok(String::new());
        }
        Ok(input.replace("question", "answer"))
    }
}

#[derive(Default)]
struct Recorder {
    scored: Vec<usize>,
    failed: Vec<(usize, String)>,
    pauses: Vec<usize>,
    summary: Option<EvalSummary>,
}

impl EvalObserver for Recorder {
    fn on_row_scored(&mut self, row: &EvaluationRow) {
        self.scored.push(row.index());
    }

    fn on_row_failed(&mut self, index: usize, err: &EvalError) {
        self.failed.push((index, err.to_string()));
    }

    fn on_pause(&mut self, processed: usize, _pause: Duration) {
        self.pauses.push(processed);
    }

    fn on_finished(&mut self, summary: &EvalSummary) {
        self.summary = Some(summary.clone());
    }
}

fn remote_dataset(rows: usize) -> Dataset {
    let mut csv = String::from("입력,예상 답변\n");
    for i in 0..rows {
        csv.push_str(&format!("question {i},answer {i}\n"));
    }
    Dataset::from_reader(csv.as_bytes()).unwrap()
}

fn no_pause() -> BatchConfig {
    BatchConfig {
        pause_every: 10,
        pause: Duration::ZERO,
    }
}

#[tokio::test]
async fn responder_failure_skips_only_that_row() {
    let responder = ScriptedResponder {
        fail_on: vec!["question 5".to_string()],
        ..Default::default()
    };
    let evaluator = BatchEvaluator::remote(Box::new(responder), no_pause());
    let mut recorder = Recorder::default();

    let results = evaluator
        .run(&remote_dataset(12), &mut recorder)
        .await
        .unwrap();

    let indices: Vec<usize> = results.iter().map(EvaluationRow::index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 6, 7, 8, 9, 10, 11]);
    assert_eq!(results.skipped(), &[5]);
    assert_eq!(recorder.failed.len(), 1);
    assert_eq!(recorder.failed[0].0, 5);
    assert!(recorder.failed[0].1.contains("500"));
    assert_eq!(recorder.summary.unwrap().scored, 11);
}

#[tokio::test(start_paused = true)]
async fn pauses_after_every_ten_rows() {
    let evaluator = BatchEvaluator::remote(
        Box::new(ScriptedResponder::default()),
        BatchConfig::default(),
    );
    let mut recorder = Recorder::default();
    let start = tokio::time::Instant::now();

    let results = evaluator
        .run(&remote_dataset(25), &mut recorder)
        .await
        .unwrap();

    assert_eq!(recorder.pauses, vec![10, 20]);
    assert!(start.elapsed() >= Duration::from_secs(6));
    let indices: Vec<usize> = results.iter().map(EvaluationRow::index).collect();
    assert_eq!(indices, (0..25).collect::<Vec<_>>());
}

#[tokio::test]
async fn no_pause_after_the_final_row() {
    let evaluator = BatchEvaluator::remote(Box::new(ScriptedResponder::default()), no_pause());
    let mut recorder = Recorder::default();

    evaluator
        .run(&remote_dataset(20), &mut recorder)
        .await
        .unwrap();

    assert_eq!(recorder.pauses, vec![10]);
}

#[tokio::test]
async fn failed_rows_count_towards_the_pause_cadence() {
    let responder = ScriptedResponder {
        fail_on: (0..5).map(|i| format!("question {i}")).collect(),
        ..Default::default()
    };
    let evaluator = BatchEvaluator::remote(Box::new(responder), no_pause());
    let mut recorder = Recorder::default();

    evaluator
        .run(&remote_dataset(11), &mut recorder)
        .await
        .unwrap();

    assert_eq!(recorder.pauses, vec![10]);
    assert_eq!(recorder.scored.len(), 6);
}

#[tokio::test]
async fn remote_mode_scores_lcs_and_rouge() {
    let evaluator = BatchEvaluator::remote(Box::new(ScriptedResponder::default()), no_pause());
    let results = evaluator
        .run(&remote_dataset(1), &mut Recorder::default())
        .await
        .unwrap();

    let row = &results.rows()[0];
    assert_eq!(row.actual(), "answer 0");
    assert_eq!(row.lcs(), Some(1.0));
    let rouge = row.rouge().unwrap();
    assert_eq!(rouge.rouge1_f, 1.0);
    assert_eq!(rouge.rouge2_f, 1.0);
    assert_eq!(rouge.rouge_l_f, 1.0);
}

#[tokio::test]
async fn remote_mode_normalizes_input_and_expected() {
    let csv = "입력,예상 답변\n\"Hello, World!\",\"Hi, there.\"\n";
    let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
    let evaluator = BatchEvaluator::remote(Box::new(ScriptedResponder::default()), no_pause());

    let results = evaluator
        .run(&dataset, &mut Recorder::default())
        .await
        .unwrap();

    let row = &results.rows()[0];
    assert_eq!(row.input(), "Hello World");
    assert_eq!(row.expected(), "Hi there");
}

#[tokio::test]
async fn empty_answer_is_a_scoring_error() {
    let responder = ScriptedResponder {
        reply_empty: true,
        ..Default::default()
    };
    let evaluator = BatchEvaluator::remote(Box::new(responder), no_pause());
    let mut recorder = Recorder::default();

    let results = evaluator
        .run(&remote_dataset(3), &mut recorder)
        .await
        .unwrap();

    assert!(results.is_empty());
    assert_eq!(recorder.failed.len(), 3);
    let expected = EvalError::Scoring(ScoreError::EmptyCandidate).to_string();
    assert!(recorder.failed.iter().all(|(_, msg)| *msg == expected));
}

#[tokio::test]
async fn empty_expected_skips_without_calling_the_responder() {
    let csv = "입력,예상 답변\nquestion 0,\nquestion 1,answer 1\n";
    let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
    let responder = std::sync::Arc::new(ScriptedResponder::default());
    let evaluator = BatchEvaluator::remote(Box::new(SharedResponder(responder.clone())), no_pause());
    let mut recorder = Recorder::default();

    let results = evaluator.run(&dataset, &mut recorder).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(recorder.failed[0].0, 0);
    assert_eq!(*responder.seen.lock().unwrap(), vec!["question 1".to_string()]);
}

struct SharedResponder(std::sync::Arc<ScriptedResponder>);

#[async_trait]
impl Responder for SharedResponder {
    async fn respond(&self, input: &str) -> Result<String, EvalError> {
        self.0.respond(input).await
    }
}

#[tokio::test]
async fn precomputed_mode_scores_stored_answers() {
    let csv = "입력,예상 답변,답변\n\
               'q0',abcd,abcd\n\
               42,abcd,ab\n\
               plain words,abcd,abcd\n\
               \"['a', 'b']\",abcd,abcd\n\
               \"[\"\"a\"\", 1]\",abcd,dcba\n";
    let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
    let evaluator = BatchEvaluator::precomputed(BatchConfig::default());
    let mut recorder = Recorder::default();

    let results = evaluator.run(&dataset, &mut recorder).await.unwrap();

    let inputs: Vec<&str> = results.iter().map(EvaluationRow::input).collect();
    assert_eq!(inputs, vec!["q0", "42", "['a', 'b']", "['a', 1]"]);
    let lcs: Vec<Option<f64>> = results.iter().map(EvaluationRow::lcs).collect();
    assert_eq!(lcs, vec![Some(1.0), Some(1.0), Some(1.0), Some(0.25)]);
    assert!(results.iter().all(|row| row.rouge().is_none()));
    let failed: Vec<usize> = recorder.failed.iter().map(|(i, _)| *i).collect();
    assert_eq!(failed, vec![2]);
    assert!(recorder.pauses.is_empty());
}

#[tokio::test]
async fn precomputed_mode_requires_answer_column() {
    let evaluator = BatchEvaluator::precomputed(BatchConfig::default());
    match evaluator
        .run(&remote_dataset(2), &mut Recorder::default())
        .await
    {
        Err(EvalError::MissingColumn(name)) => assert_eq!(name, "답변"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn precomputed_mode_never_pauses() {
    let mut csv = String::from("입력,예상 답변,답변\n");
    for i in 0..25 {
        csv.push_str(&format!("{i},a,a\n"));
    }
    let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
    let evaluator = BatchEvaluator::precomputed(BatchConfig::default());
    let mut recorder = Recorder::default();

    let results = evaluator.run(&dataset, &mut recorder).await.unwrap();

    assert_eq!(results.len(), 25);
    assert!(recorder.pauses.is_empty());
}

#[test]
fn summary_averages_scores() {
    let mut results = ResultCollection::default();
    results.push(
        EvaluationRow::new(0, "a".into(), "b".into(), "c".into())
            .with_score(Metric::Lcs, Score::Ratio(1.0)),
    );
    results.push(
        EvaluationRow::new(2, "a".into(), "b".into(), "c".into())
            .with_score(Metric::Lcs, Score::Ratio(0.5)),
    );
    results.skip(1);

    let summary = results.summary();
    assert_eq!(summary.scored, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.mean_lcs, Some(0.75));
    assert_eq!(summary.mean_rouge, None);
    assert_eq!(
        summary.to_string(),
        "2 rows scored, 1 skipped, mean LCS 0.75"
    );
}

#[test]
fn pause_cadence() {
    let config = BatchConfig::default();
    assert!(config.pause_after(10, 25));
    assert!(!config.pause_after(9, 25));
    assert!(!config.pause_after(20, 20));

    let disabled = BatchConfig {
        pause_every: 0,
        ..BatchConfig::default()
    };
    assert!(!disabled.pause_after(10, 25));
}
