//! The aggregate result of a pipeline run.

use crate::{Chapter, Character, Part, Scene, Setting, Story};
use serde::{Deserialize, Serialize};

/// Everything one pipeline run produced, in creation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNovel {
    /// Root story
    pub story: Story,
    /// Cast, `character_1..`
    pub characters: Vec<Character>,
    /// Locations, `setting_1..`
    pub settings: Vec<Setting>,
    /// Parts, `part_1..`
    pub parts: Vec<Part>,
    /// Chapters across all parts, `chapter_1..`
    pub chapters: Vec<Chapter>,
    /// Scenes carrying their final prose, `scene_1..`
    pub scenes: Vec<Scene>,
}

impl GeneratedNovel {
    /// Entity counts for logging and the terminal progress event.
    pub fn summary(&self) -> NovelSummary {
        NovelSummary {
            title: self.story.title.clone(),
            characters: self.characters.len(),
            settings: self.settings.len(),
            parts: self.parts.len(),
            chapters: self.chapters.len(),
            scenes: self.scenes.len(),
            evaluated_scenes: self
                .scenes
                .iter()
                .filter(|scene| scene.evaluation.is_some())
                .count(),
        }
    }
}

/// Entity counts of a finished novel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelSummary {
    /// Story title
    pub title: String,
    /// Number of characters
    pub characters: usize,
    /// Number of settings
    pub settings: usize,
    /// Number of parts
    pub parts: usize,
    /// Number of chapters
    pub chapters: usize,
    /// Number of scenes
    pub scenes: usize,
    /// Scenes that went through evaluation
    pub evaluated_scenes: usize,
}
