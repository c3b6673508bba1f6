// Blocking generation with a hard deadline, so a wedged model can't hang
// the terminal.

use std::time::{Duration, Instant};

use anyhow::Result;
use probe_client::{ClientError, GenerateRequest, OllamaClient};

#[tokio::main]
async fn main() -> Result<()> {
    let model = "deepseek-coder";
    let prompt = "Write a simple function to add two numbers in Python";
    let timeout = Duration::from_secs(15);

    println!(
        "Sending request to {} with {}s timeout...",
        model,
        timeout.as_secs()
    );

    let client = OllamaClient::with_config(probe_client::DEFAULT_BASE_URL, timeout);
    let request = GenerateRequest::new(model, prompt);
    let start = Instant::now();

    match client.generate(&request).await {
        Ok(outcome) => {
            println!(
                "Request completed in {:.2} seconds",
                outcome.elapsed.as_secs_f64()
            );
            println!("\nResponse:");
            println!("{}", outcome.text);
        }
        Err(ClientError::Timeout { elapsed }) => {
            println!("Request timed out after {:.2} seconds", elapsed.as_secs_f64());
        }
        Err(e) => {
            println!("Error after {:.2} seconds: {}", start.elapsed().as_secs_f64(), e);
        }
    }

    Ok(())
}
