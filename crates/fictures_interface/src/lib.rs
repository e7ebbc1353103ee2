//! Trait definitions for the Fictures novel generation pipeline.
//!
//! This crate defines the seams of the pipeline: the generation
//! collaborators the orchestrator calls ([`NovelGenerator`]), the progress
//! callback it reports through ([`ProgressReporter`]) and the text model
//! backends collaborators talk to ([`FicturesDriver`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod generator;
mod progress;
mod traits;
mod types;

pub use generator::{
    ChapterRequest, CharactersRequest, NovelContext, NovelGenerator, PartRequest,
    SceneContentRequest, SceneEvaluationRequest, SceneSummaryRequest, SettingsRequest,
    StoryRequest, SubProgress,
};
pub use progress::{ChannelReporter, ProgressReporter};
pub use traits::{FicturesDriver, Health};
pub use types::HealthStatus;
