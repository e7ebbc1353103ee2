//! Fictures CLI binary.
//!
//! This binary provides command-line access to the novel pipeline:
//! - Generate a novel from a premise
//! - Check the AI server's health
//! - List the AI server's text models

use clap::Parser;
use fictures::{FicturesConfig, ObservabilityConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check_health, generate_novel, list_models};

    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = FicturesConfig::load(cli.config.as_deref())?;
    config.validate()?;

    // Initialize tracing
    let mut observability =
        ObservabilityConfig::new("fictures").with_json_logs(*config.json_logs());
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability_with_config(observability)?;

    // Execute the requested command
    match cli.command {
        Commands::Generate(args) => {
            generate_novel(args, &config).await?;
        }

        Commands::Health { format } => {
            check_health(&config, format).await?;
        }

        Commands::Models { format } => {
            list_models(&config, format).await?;
        }
    }

    Ok(())
}
