//! AI server health command handler.

use super::commands::OutputFormat;
use fictures::{FicturesConfig, FicturesResult, Health, HealthStatus, JsonError};
use tracing::info;

/// Print the AI server's health.
///
/// An unreachable server is reported, not returned as an error.
pub async fn check_health(config: &FicturesConfig, format: OutputFormat) -> FicturesResult<()> {
    let client = config.ai_server_client()?;
    let status = client.health().await?;
    info!(url = %client.base_url(), healthy = status.is_healthy(), "Health check finished");

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&status)
                .map_err(|e| JsonError::new(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Human => match &status {
            HealthStatus::Healthy => println!("{}: healthy", client.base_url()),
            HealthStatus::Degraded { message } => {
                println!("{}: degraded ({})", client.base_url(), message)
            }
            HealthStatus::Unhealthy { message } => {
                println!("{}: unhealthy ({})", client.base_url(), message)
            }
        },
    }

    Ok(())
}
