use std::time::Duration;

use autoeval::backends::{ChatCompletions, ChatCompletionsConfig};
use autoeval::dataset::{write_results_to_path, Dataset};
use autoeval::evaluator::{BatchConfig, BatchEvaluator, LogObserver, Mode};
use mockito::Matcher;
use serde_json::json;

fn completion(content: &str) -> String {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string()
}

#[tokio::test]
async fn scores_generated_answers_and_writes_results() {
    let mut server = mockito::Server::new_async().await;
    let ok = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex(r#""content":"question [02]""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("the cat sat"))
        .expect(2)
        .create_async()
        .await;
    let failing = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Regex(r#""content":"question 1""#.to_string()))
        .with_status(503)
        .with_body("unavailable")
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.csv");
    std::fs::write(
        &input,
        "입력,예상 답변\nquestion 0?,the cat sat.\nquestion 1?,anything\nquestion 2!,a dog ran\n",
    )
    .unwrap();

    let responder = ChatCompletions::new(ChatCompletionsConfig {
        endpoint: format!("{}/v1/chat/completions", server.url()),
        model: "eval-model".to_string(),
        system: "Answer briefly.".to_string(),
        temperature: 0.0,
        frequency_penalty: 0.0,
        timeout_seconds: Some(5),
        api_key: None,
    })
    .unwrap();
    let evaluator = BatchEvaluator::remote(
        Box::new(responder),
        BatchConfig {
            pause_every: 10,
            pause: Duration::ZERO,
        },
    );

    let dataset = Dataset::from_path(&input).unwrap();
    let results = evaluator.run(&dataset, &mut LogObserver).await.unwrap();

    ok.assert_async().await;
    failing.assert_async().await;
    assert_eq!(results.len(), 2);
    assert_eq!(results.skipped(), &[1]);

    let first = &results.rows()[0];
    assert_eq!(first.expected(), "the cat sat");
    assert_eq!(first.lcs(), Some(1.0));
    assert_eq!(first.rouge().unwrap().rouge_l_f, 1.0);
    let second = &results.rows()[1];
    assert_eq!(second.rouge().unwrap().rouge1_f, 0.0);

    let output = dir.path().join("result.csv");
    write_results_to_path(&output, &results, Mode::Remote).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "입력,예상 답변,답변,LCS 점수,ROUGE 점수");
    assert!(lines[1].starts_with("question 0,the cat sat,the cat sat,1.00,"));
    assert!(lines[2].starts_with("question 2,a dog ran,the cat sat,"));
}
