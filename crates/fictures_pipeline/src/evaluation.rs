//! Scene evaluation and replacement.

use fictures_core::{Scene, SceneEvaluation, StoryIdentity};
use fictures_error::FicturesResult;
use fictures_interface::{NovelGenerator, SceneEvaluationRequest};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// What to do when evaluating one scene fails.
///
/// # Examples
///
/// ```
/// use fictures_pipeline::EvaluationFailurePolicy;
///
/// assert_eq!(EvaluationFailurePolicy::default(), EvaluationFailurePolicy::Abort);
/// assert_eq!(EvaluationFailurePolicy::KeepOriginal.to_string(), "keep_original");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EvaluationFailurePolicy {
    /// Fail the whole run
    #[default]
    Abort,
    /// Keep the scene's pre-evaluation content and carry on
    KeepOriginal,
}

/// Runs the evaluation collaborator on scenes and applies its verdict.
///
/// The collaborator's final content always replaces the scene's content.
/// Reported iterations are clamped into `0..=max_iterations` and `improved`
/// is recomputed from the content itself.
pub struct SceneEvaluationLoop<'a, G: ?Sized> {
    generator: &'a G,
    story: &'a StoryIdentity,
    max_iterations: u32,
    cancellation: &'a CancellationToken,
}

impl<'a, G> SceneEvaluationLoop<'a, G>
where
    G: NovelGenerator + ?Sized,
{
    /// Create a loop for one run.
    pub fn new(
        generator: &'a G,
        story: &'a StoryIdentity,
        max_iterations: u32,
        cancellation: &'a CancellationToken,
    ) -> Self {
        Self {
            generator,
            story,
            max_iterations,
            cancellation,
        }
    }

    /// Evaluate one scene, returning it with replaced content and
    /// evaluation metadata.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures unchanged.
    #[tracing::instrument(skip(self, scene), fields(scene_id = %scene.id()))]
    pub async fn evaluate(&self, scene: &Scene) -> FicturesResult<Scene> {
        let result = self
            .generator
            .evaluate_scene(SceneEvaluationRequest {
                content: &scene.content,
                summary: &scene.summary,
                story: self.story,
                max_iterations: self.max_iterations,
                cancellation: self.cancellation,
            })
            .await?;

        let iterations = if result.iterations > self.max_iterations {
            tracing::warn!(
                reported = result.iterations,
                max_iterations = self.max_iterations,
                "Evaluator exceeded its iteration budget, clamping"
            );
            self.max_iterations
        } else {
            result.iterations
        };
        let improved = result.final_content != scene.content;

        tracing::debug!(score = result.score, iterations, improved, "Scene evaluated");

        Ok(Scene {
            summary: scene.summary.clone(),
            content: result.final_content,
            evaluation: Some(SceneEvaluation {
                score: result.score,
                iterations,
                improved,
            }),
        })
    }
}
