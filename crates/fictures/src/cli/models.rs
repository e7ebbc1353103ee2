//! AI server model listing command handler.

use super::commands::OutputFormat;
use fictures::{FicturesConfig, FicturesResult, JsonError};

/// Print the text models the AI server offers.
pub async fn list_models(config: &FicturesConfig, format: OutputFormat) -> FicturesResult<()> {
    let client = config.ai_server_client()?;
    let models = client.list_models().await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&models)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            println!("Text models at {}:", client.base_url());
            println!("{:-<80}", "");
            for model in &models {
                println!("{:<24} {:<12} {}", model.id(), model.status(), model.name());
                if !model.description().is_empty() {
                    println!("{:<24} {}", "", model.description());
                }
            }
            println!("Total: {} models", models.len());
        }
    }

    Ok(())
}
