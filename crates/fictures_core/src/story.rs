//! The root narrative entity.

use crate::ResolvedParameters;
use serde::{Deserialize, Serialize};

const DEFAULT_STORY_ID: &str = "story";
const DEFAULT_GENRE: &str = "General Fiction";
const DEFAULT_TONE: &str = "hopeful";

/// Story produced by the first phase; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Identifier, when the collaborator supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Working title
    pub title: String,
    /// Genre chosen for the story
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Emotional tone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    /// Moral framework or premise the story explores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moral_framework: Option<String>,
    /// Short synopsis
    #[serde(default)]
    pub summary: String,
}

impl Story {
    /// Fully defaulted identity fields handed to the scene evaluator.
    ///
    /// Genre and tone fall back to the caller's preference, then to fixed
    /// defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use fictures_core::{GenerationParameters, Story};
    ///
    /// let story = Story { title: "Tides".into(), ..Default::default() };
    /// let params = GenerationParameters { tone: Some("bleak".into()), ..Default::default() };
    ///
    /// let identity = story.identity(&params.resolve());
    /// assert_eq!(identity.id(), "story");
    /// assert_eq!(identity.genre(), "General Fiction");
    /// assert_eq!(identity.tone(), "bleak");
    /// ```
    pub fn identity(&self, params: &ResolvedParameters) -> StoryIdentity {
        StoryIdentity {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| DEFAULT_STORY_ID.to_string()),
            title: self.title.clone(),
            genre: self
                .genre
                .clone()
                .or_else(|| params.genre.clone())
                .unwrap_or_else(|| DEFAULT_GENRE.to_string()),
            tone: self
                .tone
                .clone()
                .or_else(|| params.tone.clone())
                .unwrap_or_else(|| DEFAULT_TONE.to_string()),
            moral_framework: self.moral_framework.clone().unwrap_or_default(),
            summary: self.summary.clone(),
        }
    }
}

/// Story identity subset with every field populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct StoryIdentity {
    /// Story identifier
    id: String,
    /// Title
    title: String,
    /// Genre
    genre: String,
    /// Tone
    tone: String,
    /// Moral framework, empty when unknown
    moral_framework: String,
    /// Synopsis
    summary: String,
}
