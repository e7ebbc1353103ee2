//! Narrative entities: the drafts collaborators return and the identified
//! records the pipeline threads through later phases.

use serde::{Deserialize, Serialize};

/// Kinds of entity that receive synthetic identifiers.
///
/// The display form is the identifier prefix.
///
/// # Examples
///
/// ```
/// use fictures_core::EntityKind;
///
/// assert_eq!(EntityKind::Chapter.to_string(), "chapter");
/// assert_eq!(EntityKind::Scene.prefix(), "scene");
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
pub enum EntityKind {
    /// Cast member
    Character,
    /// Location or environment
    Setting,
    /// Top-level division (act)
    Part,
    /// Division within a part
    Chapter,
    /// Scene summary and its prose
    Scene,
}

impl EntityKind {
    /// Identifier prefix for this kind.
    pub fn prefix(&self) -> &str {
        self.as_ref()
    }
}

/// Character as returned by a collaborator, before it has an identifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterProfile {
    /// Name
    pub name: String,
    /// Narrative role (protagonist, mentor, ...)
    pub role: String,
    /// Archetype
    pub archetype: String,
    /// Personality sketch
    pub personality: String,
    /// What drives the character
    pub motivations: Vec<String>,
    /// History before the story begins
    pub backstory: String,
}

/// Setting as returned by a collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingProfile {
    /// Name
    pub name: String,
    /// Description
    pub description: String,
    /// Prevailing mood
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Sights, sounds and smells
    pub sensory_details: Vec<String>,
}

/// Part outline as returned by a collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartOutline {
    /// Title
    pub title: String,
    /// What happens in this part
    pub summary: String,
    /// How characters change over the part
    pub character_arcs: Vec<String>,
}

/// Chapter outline as returned by a collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChapterOutline {
    /// Title
    pub title: String,
    /// What happens in this chapter
    pub summary: String,
    /// Position in the part's arc (setup, rising action, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc_position: Option<String>,
}

/// Scene premise as returned by a collaborator; no prose yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneOutline {
    /// Title
    pub title: String,
    /// What happens in the scene
    pub summary: String,
    /// Setting the scene takes place in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setting_id: Option<String>,
    /// Characters on stage
    pub character_ids: Vec<String>,
    /// What the viewpoint character wants
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// What stands in the way
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict: Option<String>,
    /// How the scene resolves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

/// Prose written for one scene summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SceneContent {
    /// Scene prose
    pub content: String,
}

/// Outcome of evaluating and possibly revising one scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEvaluationResult {
    /// Best version of the prose found
    pub final_content: String,
    /// Quality signal; the scale belongs to the evaluator
    pub score: f64,
    /// Revision passes performed
    pub iterations: u32,
    /// Whether `final_content` differs from the input
    pub improved: bool,
}

/// Character with its synthetic identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Identifier (`character_{n}`)
    pub id: String,
    /// Generated profile
    #[serde(flatten)]
    pub profile: CharacterProfile,
}

/// Setting with its synthetic identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Identifier (`setting_{n}`)
    pub id: String,
    /// Generated profile
    #[serde(flatten)]
    pub profile: SettingProfile,
}

/// Part with its synthetic identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Identifier (`part_{n}`)
    pub id: String,
    /// Generated outline
    #[serde(flatten)]
    pub outline: PartOutline,
}

/// Chapter with its identifier and owning part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    /// Identifier (`chapter_{n}`)
    pub id: String,
    /// Identifier of the owning part
    pub part_id: String,
    /// Generated outline
    #[serde(flatten)]
    pub outline: ChapterOutline,
}

/// Scene summary with its identifier and owning chapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSummary {
    /// Identifier (`scene_{n}`)
    pub id: String,
    /// Identifier of the owning chapter
    pub chapter_id: String,
    /// Generated outline
    #[serde(flatten)]
    pub outline: SceneOutline,
}

/// Evaluation metadata recorded on a scene whose content was evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneEvaluation {
    /// Evaluator score
    pub score: f64,
    /// Revision passes performed
    pub iterations: u32,
    /// Whether the content was rewritten
    pub improved: bool,
}

/// A scene summary extended with prose.
///
/// After evaluation the content is replaced, so exactly one prose string
/// survives per scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Summary carried forward unchanged, including its identifiers
    #[serde(flatten)]
    pub summary: SceneSummary,
    /// Scene prose
    pub content: String,
    /// Present once the scene has been evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<SceneEvaluation>,
}

impl Scene {
    /// Scene identifier.
    pub fn id(&self) -> &str {
        &self.summary.id
    }

    /// Identifier of the owning chapter.
    pub fn chapter_id(&self) -> &str {
        &self.summary.chapter_id
    }
}
