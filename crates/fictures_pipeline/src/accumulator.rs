//! Context accumulated across phases.

use crate::IdentityAssigner;
use fictures_core::{
    Chapter, Character, GeneratedNovel, Part, ResolvedParameters, Scene, SceneSummary, Setting,
    Story,
};
use fictures_error::{FicturesResult, PipelineError, PipelineErrorKind};
use fictures_interface::NovelContext;

/// Everything generated so far in one run.
///
/// Each phase takes the accumulator by value and returns it extended, so a
/// run can be inspected or resumed between phases.
#[derive(Debug, Clone, PartialEq)]
pub struct NovelAccumulator {
    /// Resolved run parameters
    pub params: ResolvedParameters,
    /// Story from the first phase
    pub story: Story,
    /// Characters, in creation order
    pub characters: Vec<Character>,
    /// Settings, in creation order
    pub settings: Vec<Setting>,
    /// Parts, in creation order
    pub parts: Vec<Part>,
    /// Chapters across all parts, in creation order
    pub chapters: Vec<Chapter>,
    /// Scene summaries across all chapters, in creation order
    pub scene_summaries: Vec<SceneSummary>,
    /// Scenes with prose, in summary order
    pub scenes: Vec<Scene>,
    /// Identifier counters for the run
    pub ids: IdentityAssigner,
}

impl NovelAccumulator {
    /// Start accumulating after the story exists.
    pub fn new(params: ResolvedParameters, story: Story) -> Self {
        Self {
            params,
            story,
            characters: Vec::new(),
            settings: Vec::new(),
            parts: Vec::new(),
            chapters: Vec::new(),
            scene_summaries: Vec::new(),
            scenes: Vec::new(),
            ids: IdentityAssigner::new(),
        }
    }

    /// Story, cast and settings for collaborator requests.
    pub fn context(&self) -> NovelContext<'_> {
        NovelContext {
            params: &self.params,
            story: &self.story,
            characters: &self.characters,
            settings: &self.settings,
        }
    }

    /// Part that owns `chapter`.
    ///
    /// # Errors
    ///
    /// Fails when no part carries the chapter's `part_id`.
    pub fn part_for(&self, chapter: &Chapter) -> FicturesResult<&Part> {
        self.parts
            .iter()
            .find(|part| part.id == chapter.part_id)
            .ok_or_else(|| missing_parent("part", &chapter.part_id, &chapter.id))
    }

    /// Chapter that owns `summary`.
    ///
    /// # Errors
    ///
    /// Fails when no chapter carries the summary's `chapter_id`.
    pub fn chapter_for(&self, summary: &SceneSummary) -> FicturesResult<&Chapter> {
        self.chapters
            .iter()
            .find(|chapter| chapter.id == summary.chapter_id)
            .ok_or_else(|| missing_parent("chapter", &summary.chapter_id, &summary.id))
    }

    /// Assemble the final result.
    pub fn into_novel(self) -> GeneratedNovel {
        GeneratedNovel {
            story: self.story,
            characters: self.characters,
            settings: self.settings,
            parts: self.parts,
            chapters: self.chapters,
            scenes: self.scenes,
        }
    }
}

#[track_caller]
fn missing_parent(
    parent_kind: &str,
    parent_id: &str,
    child_id: &str,
) -> fictures_error::FicturesError {
    tracing::error!(parent_kind, parent_id, child_id, "Owning entity not found");
    PipelineError::new(PipelineErrorKind::MissingParent {
        parent_kind: parent_kind.to_string(),
        parent_id: parent_id.to_string(),
        child_id: child_id.to_string(),
    })
    .into()
}
