//! Novel generation pipeline for Fictures.
//!
//! [`NovelOrchestrator`] runs the generation phases in dependency order:
//! story, characters, settings, parts, chapters, scene summaries, scene
//! content and (optionally) scene evaluation. Every phase feeds the context
//! accumulated so far into its collaborator calls, stamps synthetic
//! identifiers on what comes back and reports progress as it goes.
//!
//! [`LlmNovelGenerator`] implements the collaborators on top of any
//! [`fictures_interface::FicturesDriver`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accumulator;
mod evaluation;
mod extraction;
mod identity;
mod llm_generator;
mod orchestrator;
mod progress;
mod prompts;

pub use accumulator::NovelAccumulator;
pub use evaluation::{EvaluationFailurePolicy, SceneEvaluationLoop};
pub use extraction::{extract_json, parse_json};
pub use identity::{IdentityAssigner, synthetic_id};
pub use llm_generator::{
    DEFAULT_MAX_TOKENS, DEFAULT_PASSING_SCORE, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
    LlmNovelGenerator, SamplingConfig,
};
pub use orchestrator::NovelOrchestrator;
pub use progress::{PhaseProgress, SubProgressRelay};
