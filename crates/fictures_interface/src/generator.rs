//! Generation collaborators consumed by the pipeline orchestrator.
//!
//! Each method produces one narrative unit from the context generated so
//! far. Characters and settings are batch calls that report sub-progress;
//! parts, chapters and scene summaries are generated one at a time with
//! every previously generated item of their type as context.
//!
//! Collaborators that make several model calls per request receive the
//! run's cancellation token and stop between calls once it fires.

use async_trait::async_trait;
use fictures_core::{
    Chapter, ChapterOutline, Character, CharacterProfile, Part, PartOutline, ResolvedParameters,
    SceneContent, SceneEvaluationResult, SceneOutline, SceneSummary, Setting, SettingProfile,
    Story, StoryIdentity,
};
use fictures_error::FicturesResult;
use tokio_util::sync::CancellationToken;

/// Sub-progress callback for batch collaborators: `(current, total)`.
pub trait SubProgress: Send + Sync {
    /// Report that item `current` of `total` is done.
    fn report(&self, current: usize, total: usize);
}

impl<F> SubProgress for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn report(&self, current: usize, total: usize) {
        self(current, total)
    }
}

/// Static context shared by every call after the setting phase.
#[derive(Debug, Clone, Copy)]
pub struct NovelContext<'a> {
    /// Resolved run parameters
    pub params: &'a ResolvedParameters,
    /// The story
    pub story: &'a Story,
    /// All characters
    pub characters: &'a [Character],
    /// All settings
    pub settings: &'a [Setting],
}

/// Input for story generation.
#[derive(Debug, Clone, Copy)]
pub struct StoryRequest<'a> {
    /// Resolved run parameters
    pub params: &'a ResolvedParameters,
}

/// Input for character generation.
#[derive(Debug, Clone, Copy)]
pub struct CharactersRequest<'a> {
    /// Resolved run parameters
    pub params: &'a ResolvedParameters,
    /// The story
    pub story: &'a Story,
    /// Characters to produce
    pub count: usize,
    /// Checked before each character is requested
    pub cancellation: &'a CancellationToken,
}

/// Input for setting generation.
#[derive(Debug, Clone, Copy)]
pub struct SettingsRequest<'a> {
    /// Resolved run parameters
    pub params: &'a ResolvedParameters,
    /// The story
    pub story: &'a Story,
    /// Characters already generated
    pub characters: &'a [Character],
    /// Settings to produce
    pub count: usize,
    /// Checked before each setting is requested
    pub cancellation: &'a CancellationToken,
}

/// Input for generating one part.
#[derive(Debug, Clone, Copy)]
pub struct PartRequest<'a> {
    /// Story, cast and settings
    pub context: NovelContext<'a>,
    /// Every part generated so far, in order
    pub previous_parts: &'a [Part],
    /// 1-based number of the part to write
    pub part_number: usize,
    /// Parts in the novel
    pub total_parts: usize,
}

/// Input for generating one chapter.
#[derive(Debug, Clone, Copy)]
pub struct ChapterRequest<'a> {
    /// Story, cast and settings
    pub context: NovelContext<'a>,
    /// Part that owns the chapter
    pub part: &'a Part,
    /// Every chapter generated so far across all parts
    pub previous_chapters: &'a [Chapter],
    /// 1-based number of the chapter within its part
    pub chapter_number: usize,
    /// Chapters in each part
    pub chapters_in_part: usize,
}

/// Input for generating one scene summary.
#[derive(Debug, Clone, Copy)]
pub struct SceneSummaryRequest<'a> {
    /// Story, cast and settings
    pub context: NovelContext<'a>,
    /// Part that owns the chapter
    pub part: &'a Part,
    /// Chapter that owns the scene
    pub chapter: &'a Chapter,
    /// Every scene summary generated so far across the story
    pub previous_scene_summaries: &'a [SceneSummary],
    /// 1-based number of the scene within its chapter
    pub scene_number: usize,
    /// Scenes in each chapter
    pub scenes_in_chapter: usize,
}

/// Input for writing the prose of one scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneContentRequest<'a> {
    /// Story, cast and settings
    pub context: NovelContext<'a>,
    /// Part that owns the chapter
    pub part: &'a Part,
    /// Chapter that owns the scene
    pub chapter: &'a Chapter,
    /// Summary to write prose for
    pub summary: &'a SceneSummary,
}

/// Input for evaluating and possibly revising one scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneEvaluationRequest<'a> {
    /// Current prose
    pub content: &'a str,
    /// Scene being evaluated
    pub summary: &'a SceneSummary,
    /// Story identity with defaults applied
    pub story: &'a StoryIdentity,
    /// Revision budget
    pub max_iterations: u32,
    /// Checked before the assessment and before each revision pass
    pub cancellation: &'a CancellationToken,
}

/// The generation collaborators, one method per narrative unit.
#[async_trait]
pub trait NovelGenerator: Send + Sync {
    /// Generate the story.
    async fn generate_story(&self, request: StoryRequest<'_>) -> FicturesResult<Story>;

    /// Generate `request.count` characters, reporting sub-progress.
    async fn generate_characters(
        &self,
        request: CharactersRequest<'_>,
        progress: &dyn SubProgress,
    ) -> FicturesResult<Vec<CharacterProfile>>;

    /// Generate `request.count` settings, reporting sub-progress.
    async fn generate_settings(
        &self,
        request: SettingsRequest<'_>,
        progress: &dyn SubProgress,
    ) -> FicturesResult<Vec<SettingProfile>>;

    /// Generate the next part.
    async fn generate_part(&self, request: PartRequest<'_>) -> FicturesResult<PartOutline>;

    /// Generate the next chapter.
    async fn generate_chapter(&self, request: ChapterRequest<'_>)
    -> FicturesResult<ChapterOutline>;

    /// Generate the next scene summary.
    async fn generate_scene_summary(
        &self,
        request: SceneSummaryRequest<'_>,
    ) -> FicturesResult<SceneOutline>;

    /// Write prose for one scene summary.
    async fn generate_scene_content(
        &self,
        request: SceneContentRequest<'_>,
    ) -> FicturesResult<SceneContent>;

    /// Evaluate one scene and revise it within the iteration budget.
    async fn evaluate_scene(
        &self,
        request: SceneEvaluationRequest<'_>,
    ) -> FicturesResult<SceneEvaluationResult>;
}
