// Latency comparison CLI for a local Ollama server.
// One request at a time, in list order - timings stay honest.

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use probe_bench::{report, runner::Comparison, summarize};
use probe_client::{GenerateOptions, OllamaClient};

const DEFAULT_MODELS: [&str; 2] = ["deepseek-coder", "deepseek-coder-optimized"];
const DEFAULT_PROMPTS: [&str; 2] = [
    "Write a simple function to add two numbers in Python",
    "Explain what a closure is in JavaScript",
];
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let mut base_url: Option<String> = None;
    let mut models: Vec<String> = Vec::new();
    let mut prompts: Vec<String> = Vec::new();
    let mut timeout_secs = DEFAULT_TIMEOUT_SECS;
    let mut tuned = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("ollama-bench {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--url" | "-u" => {
                if i + 1 < args.len() {
                    base_url = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --url requires an argument");
                    std::process::exit(1);
                }
            }
            "--model" | "-m" => {
                if i + 1 < args.len() {
                    models.push(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --model requires an argument");
                    std::process::exit(1);
                }
            }
            "--prompt" | "-p" => {
                if i + 1 < args.len() {
                    prompts.push(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --prompt requires an argument");
                    std::process::exit(1);
                }
            }
            "--timeout-secs" | "-t" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(secs) => timeout_secs = secs,
                        Err(_) => {
                            eprintln!("Error: --timeout-secs requires a number of seconds");
                            std::process::exit(1);
                        }
                    }
                    i += 2;
                } else {
                    eprintln!("Error: --timeout-secs requires an argument");
                    std::process::exit(1);
                }
            }
            "--tuned" => {
                tuned = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Try 'ollama-bench --help' for more information.");
                std::process::exit(1);
            }
        }
    }

    // Tracing to stderr only - stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("probe_bench=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    if models.is_empty() {
        models = DEFAULT_MODELS.iter().map(|m| m.to_string()).collect();
    }
    if prompts.is_empty() {
        prompts = DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect();
    }

    let base_url = base_url.unwrap_or_else(|| probe_client::DEFAULT_BASE_URL.to_string());
    let client = OllamaClient::with_config(&base_url, Duration::from_secs(timeout_secs));

    info!(
        url = %base_url,
        models = models.len(),
        prompts = prompts.len(),
        "comparing model performance"
    );

    let mut comparison = Comparison::new(models, prompts);
    if tuned {
        comparison = comparison.with_options(GenerateOptions::tuned());
    }

    let trials = comparison.run(&client).await;
    let summaries = summarize(&trials);

    println!("\n{}", report::render(&summaries));

    if !trials.is_empty() && trials.iter().all(|t| !t.succeeded()) {
        std::process::exit(1);
    }

    Ok(())
}

fn print_help() {
    println!("ollama-bench {}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("USAGE:");
    println!("    ollama-bench [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help                 Print help information");
    println!("    -V, --version              Print version information");
    println!("    -u, --url <URL>            Ollama base URL (default: http://localhost:11434)");
    println!("    -m, --model <NAME>         Model to test; repeat for several");
    println!("    -p, --prompt <TEXT>        Prompt to send; repeat for several");
    println!("    -t, --timeout-secs <SECS>  Per-request timeout (default: 60)");
    println!("        --tuned                Send the reduced-context performance options");
    println!();
    println!("DESCRIPTION:");
    println!("    Runs every prompt against every model, one request at a time,");
    println!("    and prints per-model success counts and average latency.");
    println!("    Without arguments it compares deepseek-coder against its");
    println!("    optimized derivation using two fixed prompts.");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG    Set logging level (default: info)");
}
