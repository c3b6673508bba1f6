// Health-check the Ollama API, then verify a named model is registered.

use anyhow::Result;
use probe_client::OllamaClient;

#[tokio::main]
async fn main() -> Result<()> {
    let model = "deepseek-coder";
    let client = OllamaClient::new();

    println!("Checking Ollama API...");
    match client.health().await {
        Ok(()) => {
            println!("Ollama API is responding correctly!");
        }
        Err(e) => {
            println!("Ollama API is not responding: {}", e);
            println!("Please check if Ollama is running.");
            std::process::exit(1);
        }
    }

    println!("\nChecking if {} model exists...", model);
    match client.has_model(model).await {
        Ok(true) => println!("Model '{}' exists in Ollama!", model),
        Ok(false) => println!("Model '{}' not found in Ollama.", model),
        Err(e) => println!("Error checking model existence: {}", e),
    }

    Ok(())
}
