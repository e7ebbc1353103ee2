//! Fictures - novel generation on top of the Fictures AI server
//!
//! Fictures turns a one-line premise into a complete novel skeleton: a
//! story, its cast and locations, parts, chapters, scene outlines and scene
//! prose, optionally polished by an evaluate-and-revise pass.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fictures::{FicturesConfig, GenerationParameters, NovelOrchestrator, ProgressEvent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FicturesConfig::load(None)?;
//!     let orchestrator = NovelOrchestrator::new(config.novel_generator()?);
//!
//!     let params = GenerationParameters::builder()
//!         .prompt("A lighthouse keeper finds a message in a bottle")
//!         .build()?;
//!     let reporter = |event: ProgressEvent| println!("{}: {}", event.tag(), event.message());
//!
//!     let novel = orchestrator.generate_complete_novel(&params, &reporter).await?;
//!     println!("{}", novel.story.title);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `fictures_error` - Error types
//! - `fictures_core` - Narrative units, parameters and progress events
//! - `fictures_interface` - Driver, collaborator and reporter traits
//! - `fictures_models` - AI server client
//! - `fictures_pipeline` - Orchestrator and model-backed collaborators
//!
//! This crate re-exports the public surface and adds configuration and
//! logging setup for the `fictures` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{CONFIG_FILE_NAME, ENV_PREFIX, FicturesConfig, load_parameters};
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};

pub use fictures_core::*;
pub use fictures_error::*;
pub use fictures_interface::*;
pub use fictures_models::{AiServerClient, DEFAULT_AI_SERVER_URL, DEFAULT_TEXT_MODEL, TextModel};
pub use fictures_pipeline::{
    EvaluationFailurePolicy, LlmNovelGenerator, NovelOrchestrator, SamplingConfig,
};
