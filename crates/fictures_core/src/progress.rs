//! Progress event protocol.
//!
//! A run reports `{phase}_start`, one `{phase}_progress` per item and
//! `{phase}_complete` for every phase, then a terminal `complete`. Front ends
//! that catch a failed run report `error`.

use crate::{Chapter, Character, NovelSummary, Part, Scene, SceneSummary, Setting, Story};
use serde::{Deserialize, Serialize};

/// Pipeline phases that report progress, in execution order.
///
/// # Examples
///
/// ```
/// use fictures_core::Phase;
///
/// assert_eq!(Phase::SceneSummaries.to_string(), "scene_summaries");
/// assert_eq!(Phase::Characters.label(), "characters");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Phase 1
    Story,
    /// Phase 2
    Characters,
    /// Phase 3
    Settings,
    /// Phase 4
    Parts,
    /// Phase 5
    Chapters,
    /// Phase 6
    SceneSummaries,
    /// Phase 7
    SceneContent,
    /// Phase 8
    SceneEvaluation,
}

impl Phase {
    /// Human-readable name used in progress messages.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Story => "story",
            Phase::Characters => "characters",
            Phase::Settings => "settings",
            Phase::Parts => "parts",
            Phase::Chapters => "chapters",
            Phase::SceneSummaries => "scene summaries",
            Phase::SceneContent => "scene content",
            Phase::SceneEvaluation => "scene evaluation",
        }
    }
}

/// Collection produced by a completed phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum PhaseOutput {
    /// Phase 1 output
    Story(Story),
    /// Phase 2 output
    Characters(Vec<Character>),
    /// Phase 3 output
    Settings(Vec<Setting>),
    /// Phase 4 output
    Parts(Vec<Part>),
    /// Phase 5 output
    Chapters(Vec<Chapter>),
    /// Phase 6 output
    SceneSummaries(Vec<SceneSummary>),
    /// Phase 7 and 8 output
    Scenes(Vec<Scene>),
}

impl PhaseOutput {
    /// Number of items in the collection; a story counts as one.
    pub fn len(&self) -> usize {
        match self {
            PhaseOutput::Story(_) => 1,
            PhaseOutput::Characters(items) => items.len(),
            PhaseOutput::Settings(items) => items.len(),
            PhaseOutput::Parts(items) => items.len(),
            PhaseOutput::Chapters(items) => items.len(),
            PhaseOutput::SceneSummaries(items) => items.len(),
            PhaseOutput::Scenes(items) => items.len(),
        }
    }

    /// True when the collection holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One progress report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A phase is about to begin
    PhaseStarted {
        /// Phase starting
        phase: Phase,
        /// Human-readable message
        message: String,
    },
    /// One item of a multi-item phase finished
    #[serde(rename_all = "camelCase")]
    ItemProgress {
        /// Phase running
        phase: Phase,
        /// Human-readable message
        message: String,
        /// 1-based index of the finished item
        current_item: usize,
        /// Items in the phase
        total_items: usize,
    },
    /// A phase finished
    PhaseCompleted {
        /// Phase finished
        phase: Phase,
        /// Human-readable message
        message: String,
        /// Everything the phase produced
        output: PhaseOutput,
    },
    /// The whole run finished
    Completed {
        /// Human-readable message
        message: String,
        /// Entity counts
        summary: NovelSummary,
    },
    /// The run failed
    Failed {
        /// Error description
        message: String,
    },
}

impl ProgressEvent {
    /// Protocol tag, e.g. `chapters_progress` or `complete`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fictures_core::{Phase, ProgressEvent};
    ///
    /// let event = ProgressEvent::PhaseStarted {
    ///     phase: Phase::Parts,
    ///     message: "Generating parts...".into(),
    /// };
    /// assert_eq!(event.tag(), "parts_start");
    /// ```
    pub fn tag(&self) -> String {
        match self {
            ProgressEvent::PhaseStarted { phase, .. } => format!("{}_start", phase),
            ProgressEvent::ItemProgress { phase, .. } => format!("{}_progress", phase),
            ProgressEvent::PhaseCompleted { phase, .. } => format!("{}_complete", phase),
            ProgressEvent::Completed { .. } => "complete".to_string(),
            ProgressEvent::Failed { .. } => "error".to_string(),
        }
    }

    /// Phase the event belongs to, if any.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ProgressEvent::PhaseStarted { phase, .. }
            | ProgressEvent::ItemProgress { phase, .. }
            | ProgressEvent::PhaseCompleted { phase, .. } => Some(*phase),
            ProgressEvent::Completed { .. } | ProgressEvent::Failed { .. } => None,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        match self {
            ProgressEvent::PhaseStarted { message, .. }
            | ProgressEvent::ItemProgress { message, .. }
            | ProgressEvent::PhaseCompleted { message, .. }
            | ProgressEvent::Completed { message, .. }
            | ProgressEvent::Failed { message } => message,
        }
    }
}
