// Blocking generation with the performance-tuned option set. Useful for
// checking whether a reduced context window and pinned thread count make
// a slow model usable.

use std::time::Duration;

use anyhow::Result;
use probe_client::{ClientError, GenerateOptions, GenerateRequest, OllamaClient};

#[tokio::main]
async fn main() -> Result<()> {
    let model = "deepseek-coder";
    let prompt = "Write a simple function to add two numbers in Python";
    let timeout = Duration::from_secs(60);

    let options = GenerateOptions::tuned();
    println!("Sending request to {} with custom parameters...", model);
    println!("Parameters: {}", serde_json::to_string_pretty(&options)?);

    let client = OllamaClient::with_config(probe_client::DEFAULT_BASE_URL, timeout);
    let request = GenerateRequest::new(model, prompt).with_options(options);

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
            println!("Error: {}", e);
        }
    }

    Ok(())
}
