use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use probe_bench::{report, runner::Comparison, summarize};
use probe_client::{ClientError, GenerateOutcome, GenerateRequest, Generator};

/// Generator fake that replays queued outcomes and records call order.
struct ScriptedGenerator {
    outcomes: Mutex<VecDeque<Result<GenerateOutcome, ClientError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    fn new(outcomes: Vec<Result<GenerateOutcome, ClientError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.model.clone(), request.prompt.clone()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted generator ran out of outcomes")
    }
}

fn success(text: &str, secs: f64) -> Result<GenerateOutcome, ClientError> {
    Ok(GenerateOutcome {
        text: text.to_string(),
        elapsed: Duration::from_secs_f64(secs),
    })
}

fn timeout(secs: f64) -> Result<GenerateOutcome, ClientError> {
    Err(ClientError::Timeout {
        elapsed: Duration::from_secs_f64(secs),
    })
}

#[tokio::test]
async fn averages_successes_and_reports_none_for_all_failures() {
    // Model "a": 2/2 at 1.0s and 3.0s. Model "b": 0/2.
    let generator = ScriptedGenerator::new(vec![
        success("one", 1.0),
        success("two", 3.0),
        timeout(60.0),
        timeout(60.0),
    ]);

    let comparison = Comparison::new(
        vec!["a".to_string(), "b".to_string()],
        vec!["p1".to_string(), "p2".to_string()],
    );
    let trials = comparison.run(&generator).await;
    let summaries = summarize(&trials);

    assert_eq!(summaries.len(), 2);

    assert_eq!(summaries[0].model, "a");
    assert_eq!(summaries[0].successes, 2);
    assert_eq!(summaries[0].attempts, 2);
    assert_eq!(summaries[0].average, Some(Duration::from_secs(2)));

    assert_eq!(summaries[1].model, "b");
    assert_eq!(summaries[1].successes, 0);
    assert_eq!(summaries[1].attempts, 2);
    assert_eq!(summaries[1].average, None);
}

#[tokio::test]
async fn trials_execute_strictly_in_list_order() {
    let generator = ScriptedGenerator::new(vec![
        success("", 0.1),
        success("", 0.1),
        success("", 0.1),
        success("", 0.1),
    ]);

    let comparison = Comparison::new(
        vec!["a".to_string(), "b".to_string()],
        vec!["p1".to_string(), "p2".to_string()],
    );
    comparison.run(&generator).await;

    assert_eq!(
        generator.calls(),
        vec![
            ("a".to_string(), "p1".to_string()),
            ("a".to_string(), "p2".to_string()),
            ("b".to_string(), "p1".to_string()),
            ("b".to_string(), "p2".to_string()),
        ]
    );
}

#[tokio::test]
async fn failed_trials_do_not_skew_the_average() {
    // One success at 2.0s plus one slow failure; average must stay 2.0s.
    let generator = ScriptedGenerator::new(vec![success("ok", 2.0), timeout(59.9)]);

    let comparison = Comparison::new(
        vec!["a".to_string()],
        vec!["p1".to_string(), "p2".to_string()],
    );
    let trials = comparison.run(&generator).await;
    let summaries = summarize(&trials);

    assert_eq!(summaries[0].successes, 1);
    assert_eq!(summaries[0].attempts, 2);
    assert_eq!(summaries[0].average, Some(Duration::from_secs(2)));
}

#[tokio::test]
async fn timeout_trials_record_the_elapsed_the_error_carries() {
    let generator = ScriptedGenerator::new(vec![timeout(1.5)]);

    let comparison = Comparison::new(vec!["a".to_string()], vec!["p1".to_string()]);
    let trials = comparison.run(&generator).await;

    assert!(!trials[0].succeeded());
    assert_eq!(trials[0].elapsed, Duration::from_secs_f64(1.5));
}

#[test]
fn summarize_of_no_trials_is_empty() {
    assert!(summarize(&[]).is_empty());
}

#[tokio::test]
async fn report_renders_averages_and_not_available() {
    let generator = ScriptedGenerator::new(vec![
        success("one", 1.0),
        success("two", 3.0),
        timeout(60.0),
        timeout(60.0),
    ]);

    let comparison = Comparison::new(
        vec!["a".to_string(), "b".to_string()],
        vec!["p1".to_string(), "p2".to_string()],
    );
    let trials = comparison.run(&generator).await;
    let rendered = report::render(&summarize(&trials));

    assert!(rendered.contains("PERFORMANCE COMPARISON"));
    assert!(rendered.contains("Model: a"));
    assert!(rendered.contains("Successful requests: 2/2"));
    assert!(rendered.contains("Average response time: 2.00 seconds"));
    assert!(rendered.contains("Model: b"));
    assert!(rendered.contains("Successful requests: 0/2"));
    assert!(rendered.contains("Average response time: N/A (no successful requests)"));
}
