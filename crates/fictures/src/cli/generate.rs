//! Novel generation command handler.

use super::commands::GenerateArgs;
use fictures::{
    FicturesConfig, FicturesResult, GeneratedNovel, GenerationParameters, JsonError,
    NovelOrchestrator, ProgressEvent, StorageError, StorageErrorKind, load_parameters,
};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Run the whole pipeline and write the novel as JSON.
pub async fn generate_novel(args: GenerateArgs, config: &FicturesConfig) -> FicturesResult<()> {
    let base = match &args.params {
        Some(path) => load_parameters(path)?,
        None => GenerationParameters::default(),
    };
    let params = args.apply_to(base);
    params.validate()?;

    let cancellation = CancellationToken::new();
    let orchestrator = NovelOrchestrator::new(config.novel_generator()?)
        .with_cancellation(cancellation.clone())
        .with_scene_concurrency(*config.scene_concurrency())
        .with_evaluation_failure_policy(*config.evaluation_failure_policy());

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling generation");
            cancellation.cancel();
        }
    });

    let reporter = |event: ProgressEvent| log_event(&event);
    let result = orchestrator.generate_complete_novel(&params, &reporter).await;
    interrupt.abort();

    let novel = match result {
        Ok(novel) => novel,
        Err(e) => {
            reporter(ProgressEvent::Failed {
                message: e.to_string(),
            });
            return Err(e);
        }
    };

    write_novel(&novel, args.output.as_deref())
}

fn log_event(event: &ProgressEvent) {
    match event {
        ProgressEvent::ItemProgress {
            current_item,
            total_items,
            ..
        } => info!(
            event = %event.tag(),
            current = current_item,
            total = total_items,
            "{}",
            event.message()
        ),
        ProgressEvent::Failed { message } => error!(event = %event.tag(), "{}", message),
        _ => info!(event = %event.tag(), "{}", event.message()),
    }
}

fn write_novel(novel: &GeneratedNovel, output: Option<&Path>) -> FicturesResult<()> {
    let json = serde_json::to_string_pretty(novel).map_err(|e| JsonError::new(e.to_string()))?;

    match output {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            })?;
            info!(path = %path.display(), "Novel written");
        }
        None => println!("{}", json),
    }
    Ok(())
}
