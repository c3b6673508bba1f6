// Register a performance-tuned derivation of a base model.

use anyhow::Result;
use probe_client::{Modelfile, OllamaClient};

#[tokio::main]
async fn main() -> Result<()> {
    let base_model = "deepseek-coder";
    let new_model_name = "deepseek-coder-optimized";

    let modelfile = Modelfile::tuned(base_model);

    println!(
        "Creating optimized model '{}' based on '{}'...",
        new_model_name, base_model
    );
    println!("Modelfile content:");
    println!("{}", modelfile.render());

    let client = OllamaClient::new();
    match client.create_model(new_model_name, &modelfile).await {
        Ok(()) => {
            println!("\nModel '{}' created successfully!", new_model_name);
        }
        Err(e) => {
            println!("Error creating model: {}", e);
        }
    }

    Ok(())
}
