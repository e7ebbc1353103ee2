//! Generation collaborators backed by a text model.

use crate::orchestrator::ensure_active;
use crate::{extract_json, parse_json, prompts};
use async_trait::async_trait;
use fictures_core::{
    ChapterOutline, CharacterProfile, GenerateRequest, Message, PartOutline, Phase,
    ResolvedParameters, SceneContent, SceneEvaluationResult, SceneOutline, SettingProfile, Story,
};
use fictures_error::{BuilderError, FicturesError, FicturesResult, GenerationError, GenerationErrorKind};
use fictures_interface::{
    ChapterRequest, CharactersRequest, FicturesDriver, NovelGenerator, PartRequest,
    SceneContentRequest, SceneEvaluationRequest, SceneSummaryRequest, SettingsRequest,
    StoryRequest, SubProgress,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Token budget per call when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
/// Sampling temperature when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Nucleus sampling parameter when none is configured.
pub const DEFAULT_TOP_P: f32 = 0.9;
/// Score at or above which a scene is left as is.
pub const DEFAULT_PASSING_SCORE: f64 = 3.0;

/// Sampling settings applied to every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Maximum tokens per call
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling parameter
    pub top_p: f32,
    /// Model override; the driver's default when unset
    pub model: Option<String>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            model: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SceneAssessment {
    score: f64,
    #[serde(default)]
    feedback: String,
}

/// [`NovelGenerator`] that prompts a text model for every narrative unit.
///
/// Structured units are requested as JSON and extracted from the response;
/// scene prose is taken verbatim. Characters and settings are generated one
/// per call so each sees the ones before it.
///
/// Scene evaluation scores the scene, revises it while the score is below
/// the passing score and the iteration budget lasts, and returns the best
/// scoring version.
pub struct LlmNovelGenerator<D> {
    driver: D,
    sampling: SamplingConfig,
    passing_score: f64,
}

impl<D: FicturesDriver> LlmNovelGenerator<D> {
    /// Create a generator with default sampling.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            sampling: SamplingConfig::default(),
            passing_score: DEFAULT_PASSING_SCORE,
        }
    }

    /// Override sampling settings.
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Override the passing score of scene evaluation.
    pub fn with_passing_score(mut self, passing_score: f64) -> Self {
        self.passing_score = passing_score;
        self
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    async fn complete(&self, unit: &str, system: String, prompt: String) -> FicturesResult<String> {
        let request = GenerateRequest::builder()
            .messages(vec![Message::system(system), Message::user(prompt)])
            .max_tokens(Some(self.sampling.max_tokens))
            .temperature(Some(self.sampling.temperature))
            .top_p(Some(self.sampling.top_p))
            .model(self.sampling.model.clone())
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let response = self.driver.generate(&request).await?;
        tracing::debug!(
            unit,
            model = %response.model,
            tokens_used = response.tokens_used,
            finish_reason = %response.finish_reason,
            "Model responded"
        );

        let text = response.text.trim();
        if text.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse {
                unit: unit.to_string(),
            })
            .into());
        }
        Ok(text.to_string())
    }

    async fn complete_json<T: DeserializeOwned>(
        &self,
        unit: &str,
        params: &ResolvedParameters,
        prompt: String,
    ) -> FicturesResult<T> {
        let text = self.complete(unit, prompts::system(params), prompt).await?;
        extract_json(&text)
            .and_then(|json| parse_json(&json))
            .map_err(|e| malformed(unit, e))
    }

    async fn assess(
        &self,
        request: &SceneEvaluationRequest<'_>,
        content: &str,
    ) -> FicturesResult<SceneAssessment> {
        let unit = "scene assessment";
        let text = self
            .complete(unit, prompts::editor(), prompts::assess_scene(request, content))
            .await?;
        extract_json(&text)
            .and_then(|json| parse_json(&json))
            .map_err(|e| malformed(unit, e))
    }
}

fn malformed(unit: &str, error: FicturesError) -> FicturesError {
    GenerationError::new(GenerationErrorKind::MalformedResponse {
        unit: unit.to_string(),
        message: error.to_string(),
    })
    .into()
}

#[async_trait]
impl<D: FicturesDriver> NovelGenerator for LlmNovelGenerator<D> {
    #[tracing::instrument(skip_all, fields(model = self.driver.model_name()))]
    async fn generate_story(&self, request: StoryRequest<'_>) -> FicturesResult<Story> {
        let mut story: Story = self
            .complete_json("story", request.params, prompts::story(request.params))
            .await?;
        // Identifiers are assigned locally.
        story.id = None;
        Ok(story)
    }

    #[tracing::instrument(skip_all, fields(count = request.count))]
    async fn generate_characters(
        &self,
        request: CharactersRequest<'_>,
        progress: &dyn SubProgress,
    ) -> FicturesResult<Vec<CharacterProfile>> {
        let mut profiles = Vec::with_capacity(request.count);
        for number in 1..=request.count {
            ensure_active(request.cancellation, Phase::Characters)?;
            let prompt = prompts::character(request.story, &profiles, number, request.count);
            let profile: CharacterProfile = self
                .complete_json("character", request.params, prompt)
                .await?;
            profiles.push(profile);
            progress.report(number, request.count);
        }
        Ok(profiles)
    }

    #[tracing::instrument(skip_all, fields(count = request.count))]
    async fn generate_settings(
        &self,
        request: SettingsRequest<'_>,
        progress: &dyn SubProgress,
    ) -> FicturesResult<Vec<SettingProfile>> {
        let mut profiles = Vec::with_capacity(request.count);
        for number in 1..=request.count {
            ensure_active(request.cancellation, Phase::Settings)?;
            let prompt = prompts::setting(
                request.story,
                request.characters,
                &profiles,
                number,
                request.count,
            );
            let profile: SettingProfile = self
                .complete_json("setting", request.params, prompt)
                .await?;
            profiles.push(profile);
            progress.report(number, request.count);
        }
        Ok(profiles)
    }

    #[tracing::instrument(skip_all, fields(part_number = request.part_number))]
    async fn generate_part(&self, request: PartRequest<'_>) -> FicturesResult<PartOutline> {
        self.complete_json("part", request.context.params, prompts::part(&request))
            .await
    }

    #[tracing::instrument(skip_all, fields(part_id = %request.part.id, chapter_number = request.chapter_number))]
    async fn generate_chapter(
        &self,
        request: ChapterRequest<'_>,
    ) -> FicturesResult<ChapterOutline> {
        self.complete_json("chapter", request.context.params, prompts::chapter(&request))
            .await
    }

    #[tracing::instrument(skip_all, fields(chapter_id = %request.chapter.id, scene_number = request.scene_number))]
    async fn generate_scene_summary(
        &self,
        request: SceneSummaryRequest<'_>,
    ) -> FicturesResult<SceneOutline> {
        self.complete_json(
            "scene summary",
            request.context.params,
            prompts::scene_summary(&request),
        )
        .await
    }

    #[tracing::instrument(skip_all, fields(scene_id = %request.summary.id))]
    async fn generate_scene_content(
        &self,
        request: SceneContentRequest<'_>,
    ) -> FicturesResult<SceneContent> {
        let content = self
            .complete(
                "scene content",
                prompts::system(request.context.params),
                prompts::scene_content(&request),
            )
            .await?;
        Ok(SceneContent { content })
    }

    #[tracing::instrument(skip_all, fields(scene_id = %request.summary.id, max_iterations = request.max_iterations))]
    async fn evaluate_scene(
        &self,
        request: SceneEvaluationRequest<'_>,
    ) -> FicturesResult<SceneEvaluationResult> {
        ensure_active(request.cancellation, Phase::SceneEvaluation)?;
        let SceneAssessment { score, feedback } = self.assess(&request, request.content).await?;
        let mut best_content = request.content.to_string();
        let mut best_score = score;
        // Revisions always start from the best version and its own critique.
        let mut best_feedback = feedback;
        let mut iterations = 0;

        while best_score < self.passing_score && iterations < request.max_iterations {
            ensure_active(request.cancellation, Phase::SceneEvaluation)?;
            let revised = self
                .complete(
                    "scene revision",
                    prompts::editor(),
                    prompts::revise_scene(&request, &best_content, &best_feedback),
                )
                .await?;
            iterations += 1;
            let assessment = self.assess(&request, &revised).await?;
            tracing::debug!(iteration = iterations, score = assessment.score, "Scene revised");
            if assessment.score > best_score {
                best_score = assessment.score;
                best_content = revised;
                best_feedback = assessment.feedback;
            }
        }

        Ok(SceneEvaluationResult {
            improved: best_content != request.content,
            final_content: best_content,
            score: best_score,
            iterations,
        })
    }
}
