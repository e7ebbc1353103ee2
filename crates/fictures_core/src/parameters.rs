//! User-supplied generation parameters and their resolved form.

use fictures_error::ConfigError;
use serde::{Deserialize, Serialize};

/// Characters generated when no count is given.
pub const DEFAULT_CHARACTER_COUNT: usize = 3;
/// Settings generated when no count is given.
pub const DEFAULT_SETTING_COUNT: usize = 3;
/// Parts generated when no count is given.
pub const DEFAULT_PARTS_COUNT: usize = 1;
/// Chapters per part when no count is given.
pub const DEFAULT_CHAPTERS_PER_PART: usize = 1;
/// Scenes per chapter when no count is given.
pub const DEFAULT_SCENES_PER_CHAPTER: usize = 3;
/// Prose language when none is given.
pub const DEFAULT_LANGUAGE: &str = "English";
/// Evaluate-and-revise budget when none is given.
pub const DEFAULT_MAX_EVALUATION_ITERATIONS: u32 = 2;

const MAX_CHARACTERS: usize = 20;
const MAX_SETTINGS: usize = 20;
const MAX_PARTS: usize = 10;
const MAX_CHAPTERS_PER_PART: usize = 30;
const MAX_SCENES_PER_CHAPTER: usize = 20;
const MAX_EVALUATION_ITERATIONS: u32 = 10;

/// Parameters for one novel generation run, as supplied by the caller.
///
/// Every count is optional; [`GenerationParameters::resolve`] applies the
/// defaults once so that downstream code never has to.
///
/// # Examples
///
/// ```
/// use fictures_core::GenerationParameters;
///
/// let params = GenerationParameters::builder()
///     .prompt("A lighthouse keeper finds a message in a bottle")
///     .parts_count(2usize)
///     .build()
///     .unwrap();
///
/// let resolved = params.resolve();
/// assert_eq!(resolved.parts_count, 2);
/// assert_eq!(resolved.character_count, 3);
/// assert_eq!(resolved.language, "English");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_builder::Builder)]
#[serde(rename_all = "camelCase", default)]
#[builder(setter(into), default)]
pub struct GenerationParameters {
    /// Free-text premise for the novel
    pub prompt: String,
    /// Preferred genre
    #[builder(setter(into, strip_option))]
    pub genre: Option<String>,
    /// Preferred tone
    #[builder(setter(into, strip_option))]
    pub tone: Option<String>,
    /// Target language of the prose
    #[builder(setter(into, strip_option))]
    pub language: Option<String>,
    /// Number of characters
    #[builder(setter(into, strip_option))]
    pub character_count: Option<usize>,
    /// Number of settings
    #[builder(setter(into, strip_option))]
    pub setting_count: Option<usize>,
    /// Number of parts (acts)
    #[builder(setter(into, strip_option))]
    pub parts_count: Option<usize>,
    /// Chapters in every part
    #[builder(setter(into, strip_option))]
    pub chapters_per_part: Option<usize>,
    /// Scenes in every chapter
    #[builder(setter(into, strip_option))]
    pub scenes_per_chapter: Option<usize>,
    /// Skip image generation downstream
    pub skip_images: bool,
    /// Run the evaluate-and-revise phase
    pub enable_scene_evaluation: bool,
    /// Revision budget per scene; only read when evaluation is enabled
    #[builder(setter(into, strip_option))]
    pub max_evaluation_iterations: Option<u32>,
}

impl GenerationParameters {
    /// Creates a parameters builder.
    pub fn builder() -> GenerationParametersBuilder {
        GenerationParametersBuilder::default()
    }

    /// Applies every default, producing the configuration consumed by all phases.
    pub fn resolve(&self) -> ResolvedParameters {
        ResolvedParameters {
            prompt: self.prompt.clone(),
            genre: self.genre.clone(),
            tone: self.tone.clone(),
            language: self
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            character_count: self.character_count.unwrap_or(DEFAULT_CHARACTER_COUNT),
            setting_count: self.setting_count.unwrap_or(DEFAULT_SETTING_COUNT),
            parts_count: self.parts_count.unwrap_or(DEFAULT_PARTS_COUNT),
            chapters_per_part: self.chapters_per_part.unwrap_or(DEFAULT_CHAPTERS_PER_PART),
            scenes_per_chapter: self
                .scenes_per_chapter
                .unwrap_or(DEFAULT_SCENES_PER_CHAPTER),
            skip_images: self.skip_images,
            enable_scene_evaluation: self.enable_scene_evaluation,
            max_evaluation_iterations: self
                .max_evaluation_iterations
                .unwrap_or(DEFAULT_MAX_EVALUATION_ITERATIONS),
        }
    }

    /// Bounds-checks the caller's input.
    ///
    /// The orchestrator assumes validated input and never calls this itself;
    /// front ends call it before starting a run.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first field that is empty or out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.trim().is_empty() {
            return Err(ConfigError::new("prompt must not be empty"));
        }
        check_count("characterCount", self.character_count, MAX_CHARACTERS)?;
        check_count("settingCount", self.setting_count, MAX_SETTINGS)?;
        check_count("partsCount", self.parts_count, MAX_PARTS)?;
        check_count("chaptersPerPart", self.chapters_per_part, MAX_CHAPTERS_PER_PART)?;
        check_count(
            "scenesPerChapter",
            self.scenes_per_chapter,
            MAX_SCENES_PER_CHAPTER,
        )?;
        if let Some(iterations) = self
            .max_evaluation_iterations
            .filter(|iterations| *iterations > MAX_EVALUATION_ITERATIONS)
        {
            return Err(ConfigError::new(format!(
                "maxEvaluationIterations must be at most {}, got {}",
                MAX_EVALUATION_ITERATIONS, iterations
            )));
        }
        Ok(())
    }
}

fn check_count(field: &str, value: Option<usize>, max: usize) -> Result<(), ConfigError> {
    match value {
        Some(count) if count == 0 || count > max => Err(ConfigError::new(format!(
            "{} must be between 1 and {}, got {}",
            field, max, count
        ))),
        _ => Ok(()),
    }
}

/// Generation parameters with every default applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedParameters {
    /// Free-text premise for the novel
    pub prompt: String,
    /// Preferred genre, if the caller named one
    pub genre: Option<String>,
    /// Preferred tone, if the caller named one
    pub tone: Option<String>,
    /// Target language of the prose
    pub language: String,
    /// Number of characters
    pub character_count: usize,
    /// Number of settings
    pub setting_count: usize,
    /// Number of parts
    pub parts_count: usize,
    /// Chapters in every part
    pub chapters_per_part: usize,
    /// Scenes in every chapter
    pub scenes_per_chapter: usize,
    /// Skip image generation downstream
    pub skip_images: bool,
    /// Run the evaluate-and-revise phase
    pub enable_scene_evaluation: bool,
    /// Revision budget per scene
    pub max_evaluation_iterations: u32,
}

impl ResolvedParameters {
    /// Chapters across the whole novel.
    pub fn total_chapters(&self) -> usize {
        self.parts_count * self.chapters_per_part
    }

    /// Scenes across the whole novel.
    pub fn total_scenes(&self) -> usize {
        self.total_chapters() * self.scenes_per_chapter
    }
}
