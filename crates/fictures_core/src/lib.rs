//! Core data types for the Fictures novel generation pipeline.
//!
//! This crate provides the data model shared by every other crate: the
//! user-facing [`GenerationParameters`], the narrative entities produced
//! phase by phase, the progress event protocol and the LLM transport types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod entity;
mod message;
mod novel;
mod parameters;
mod progress;
mod request;
mod role;
mod story;

pub use entity::{
    Chapter, ChapterOutline, Character, CharacterProfile, EntityKind, Part, PartOutline, Scene,
    SceneContent, SceneEvaluation, SceneEvaluationResult, SceneOutline, SceneSummary, Setting,
    SettingProfile,
};
pub use message::Message;
pub use novel::{GeneratedNovel, NovelSummary};
pub use parameters::{
    GenerationParameters, GenerationParametersBuilder, ResolvedParameters,
    DEFAULT_CHAPTERS_PER_PART, DEFAULT_CHARACTER_COUNT, DEFAULT_LANGUAGE,
    DEFAULT_MAX_EVALUATION_ITERATIONS, DEFAULT_PARTS_COUNT, DEFAULT_SCENES_PER_CHAPTER,
    DEFAULT_SETTING_COUNT,
};
pub use progress::{Phase, PhaseOutput, ProgressEvent};
pub use request::{FinishReason, GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use story::{Story, StoryIdentity};
