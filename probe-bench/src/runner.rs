// Sequential model comparison.
//
// Every (model, prompt) pair gets one blocking generation call, strictly
// in list order with no overlap, so timings are not polluted by
// contention between requests.

use std::time::{Duration, Instant};

use probe_client::{ClientError, GenerateOptions, GenerateRequest, Generator};
use tracing::{info, warn};

/// A fixed comparison plan: each model runs every prompt once.
#[derive(Debug, Clone)]
pub struct Comparison {
    models: Vec<String>,
    prompts: Vec<String>,
    options: Option<GenerateOptions>,
}

/// One executed (model, prompt) call.
#[derive(Debug)]
pub struct Trial {
    pub model: String,
    pub prompt: String,
    /// Time observed before success or failure. For timeouts this is the
    /// elapsed time the error itself carries.
    pub elapsed: Duration,
    pub result: Result<String, String>,
}

impl Trial {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-model aggregate over a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub model: String,
    pub successes: usize,
    pub attempts: usize,
    /// Mean elapsed time over successful trials only. `None` when the
    /// model had no successes at all.
    pub average: Option<Duration>,
}

impl Comparison {
    pub fn new(models: Vec<String>, prompts: Vec<String>) -> Self {
        Self {
            models,
            prompts,
            options: None,
        }
    }

    /// Apply one option set to every request in the run.
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Execute the plan against `generator`, one request at a time.
    pub async fn run(&self, generator: &dyn Generator) -> Vec<Trial> {
        let mut trials = Vec::with_capacity(self.models.len() * self.prompts.len());

        for model in &self.models {
            for prompt in &self.prompts {
                info!(model = %model, prompt = %prompt, "testing model");

                let mut request = GenerateRequest::new(model.clone(), prompt.clone());
                if let Some(options) = &self.options {
                    request = request.with_options(options.clone());
                }

                let start = Instant::now();
                let trial = match generator.generate(&request).await {
                    Ok(outcome) => {
                        info!(
                            model = %model,
                            elapsed_ms = outcome.elapsed.as_millis() as u64,
                            response_chars = outcome.text.chars().count(),
                            preview = %preview(&outcome.text),
                            "request completed"
                        );
                        Trial {
                            model: model.clone(),
                            prompt: prompt.clone(),
                            elapsed: outcome.elapsed,
                            result: Ok(outcome.text),
                        }
                    }
                    Err(e) => {
                        let elapsed = match &e {
                            ClientError::Timeout { elapsed } => *elapsed,
                            _ => start.elapsed(),
                        };
                        warn!(
                            model = %model,
                            elapsed_ms = elapsed.as_millis() as u64,
                            error = %e,
                            "request failed"
                        );
                        Trial {
                            model: model.clone(),
                            prompt: prompt.clone(),
                            elapsed,
                            result: Err(e.to_string()),
                        }
                    }
                };
                trials.push(trial);
            }
        }

        trials
    }
}

/// Aggregate trials per model, in first-seen order. Failed trials count
/// toward attempts but are excluded from the average entirely.
pub fn summarize(trials: &[Trial]) -> Vec<ModelSummary> {
    let mut summaries: Vec<ModelSummary> = Vec::new();

    for trial in trials {
        if !summaries.iter().any(|s| s.model == trial.model) {
            summaries.push(ModelSummary {
                model: trial.model.clone(),
                successes: 0,
                attempts: 0,
                average: None,
            });
        }
    }

    for summary in &mut summaries {
        let mut total = Duration::ZERO;
        for trial in trials.iter().filter(|t| t.model == summary.model) {
            summary.attempts += 1;
            if trial.succeeded() {
                summary.successes += 1;
                total += trial.elapsed;
            }
        }
        if summary.successes > 0 {
            summary.average = Some(total / summary.successes as u32);
        }
    }

    summaries
}

fn preview(text: &str) -> String {
    const PREVIEW_CHARS: usize = 100;
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
