// Stream a response token by token instead of waiting for the full body.
// Seeing output immediately is the easiest way to tell a slow model from
// a hung one.

use anyhow::Result;
use probe_client::{GenerateRequest, OllamaClient, StdoutSink};

#[tokio::main]
async fn main() -> Result<()> {
    let model = "deepseek-coder-optimized";
    let prompt = "Write a simple function to add two numbers in Python";

    println!("Streaming response from {}...", model);
    println!("Prompt: {}", prompt);
    println!("\nResponse:");

    let client = OllamaClient::new();
    let request = GenerateRequest::new(model, prompt);

    match client.stream_generate(&request, &mut StdoutSink).await {
        Ok(outcome) => {
            println!(
                "\n\nStreaming completed in {:.2} seconds",
                outcome.elapsed.as_secs_f64()
            );
            println!("Total tokens: {}", outcome.fragments);
            println!("Tokens per second: {:.2}", outcome.tokens_per_second());
        }
        Err(e) => {
            println!("\nError: {}", e);
        }
    }

    Ok(())
}
