//! Multi-phase novel generation.

use crate::{
    EvaluationFailurePolicy, NovelAccumulator, PhaseProgress, SceneEvaluationLoop,
    SubProgressRelay,
};
use fictures_core::{
    GeneratedNovel, GenerationParameters, Phase, PhaseOutput, ProgressEvent, ResolvedParameters,
    Scene, SceneSummary,
};
use fictures_error::{
    FicturesResult, GenerationError, GenerationErrorKind, PipelineError, PipelineErrorKind,
};
use fictures_interface::{
    ChapterRequest, CharactersRequest, NovelGenerator, PartRequest, ProgressReporter,
    SceneContentRequest, SceneSummaryRequest, SettingsRequest, StoryRequest,
};
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

/// Sequences the generation phases and threads context between them.
///
/// Phases run strictly one after another. Parts, chapters and scene
/// summaries are generated one at a time because each sees every earlier
/// item of its kind. Scene content and scene evaluation may run several
/// scenes at once (see [`NovelOrchestrator::with_scene_concurrency`]).
///
/// The orchestrator never retries: the first collaborator error ends the
/// run, after whatever progress events preceded it.
///
/// # Example
///
/// ```rust,ignore
/// use fictures_pipeline::{LlmNovelGenerator, NovelOrchestrator};
///
/// let orchestrator = NovelOrchestrator::new(LlmNovelGenerator::new(driver))
///     .with_scene_concurrency(4);
/// let novel = orchestrator
///     .generate_complete_novel(&params, &|event| println!("{}", event.tag()))
///     .await?;
/// ```
pub struct NovelOrchestrator<G> {
    generator: G,
    cancellation: CancellationToken,
    scene_concurrency: usize,
    evaluation_failure_policy: EvaluationFailurePolicy,
}

impl<G: NovelGenerator> NovelOrchestrator<G> {
    /// Create an orchestrator around a set of collaborators.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            cancellation: CancellationToken::new(),
            scene_concurrency: 1,
            evaluation_failure_policy: EvaluationFailurePolicy::default(),
        }
    }

    /// Stop at the next item boundary once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Write and evaluate up to `limit` scenes at once (minimum 1).
    pub fn with_scene_concurrency(mut self, limit: usize) -> Self {
        self.scene_concurrency = limit.max(1);
        self
    }

    /// Choose how a failed scene evaluation is handled.
    pub fn with_evaluation_failure_policy(mut self, policy: EvaluationFailurePolicy) -> Self {
        self.evaluation_failure_policy = policy;
        self
    }

    /// The collaborators in use.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate a complete novel.
    ///
    /// Defaults are resolved once; every phase then consumes the resolved
    /// parameters. A terminal `complete` event follows the last phase.
    ///
    /// # Errors
    ///
    /// Returns the first collaborator error, a missing-parent error if the
    /// object graph is inconsistent, or a cancellation error.
    #[tracing::instrument(skip(self, params, reporter), fields(prompt_length = params.prompt.len()))]
    pub async fn generate_complete_novel(
        &self,
        params: &GenerationParameters,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<GeneratedNovel> {
        let resolved = params.resolve();
        tracing::info!(
            characters = resolved.character_count,
            settings = resolved.setting_count,
            parts = resolved.parts_count,
            chapters = resolved.total_chapters(),
            scenes = resolved.total_scenes(),
            evaluation = resolved.enable_scene_evaluation,
            "Starting novel generation"
        );

        let acc = self.story_phase(resolved, reporter).await?;
        let acc = self.characters_phase(acc, reporter).await?;
        let acc = self.settings_phase(acc, reporter).await?;
        let acc = self.parts_phase(acc, reporter).await?;
        let acc = self.chapters_phase(acc, reporter).await?;
        let acc = self.scene_summaries_phase(acc, reporter).await?;
        let acc = self.scene_content_phase(acc, reporter).await?;
        let acc = self.scene_evaluation_phase(acc, reporter).await?;

        let novel = acc.into_novel();
        let summary = novel.summary();
        tracing::info!(
            title = %summary.title,
            scenes = summary.scenes,
            evaluated = summary.evaluated_scenes,
            "Novel generation complete"
        );
        reporter.report(ProgressEvent::Completed {
            message: format!("Generated \"{}\"", summary.title),
            summary,
        });
        Ok(novel)
    }

    /// Phase 1: generate the story and open the accumulator.
    #[tracing::instrument(skip_all)]
    pub async fn story_phase(
        &self,
        params: ResolvedParameters,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<NovelAccumulator> {
        self.ensure_active(Phase::Story)?;
        let progress = PhaseProgress::start(reporter, Phase::Story, 0);
        let story = self
            .generator
            .generate_story(StoryRequest { params: &params })
            .await?;
        tracing::debug!(title = %story.title, "Story generated");
        progress.complete(PhaseOutput::Story(story.clone()));
        Ok(NovelAccumulator::new(params, story))
    }

    /// Phase 2: generate the cast as one batch.
    #[tracing::instrument(skip_all, fields(total = acc.params.character_count))]
    pub async fn characters_phase(
        &self,
        mut acc: NovelAccumulator,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<NovelAccumulator> {
        self.ensure_active(Phase::Characters)?;
        let expected = acc.params.character_count;
        let relay = SubProgressRelay::new(
            PhaseProgress::start(reporter, Phase::Characters, expected),
            "character",
        );
        let profiles = self
            .generator
            .generate_characters(
                CharactersRequest {
                    params: &acc.params,
                    story: &acc.story,
                    count: expected,
                    cancellation: &self.cancellation,
                },
                &relay,
            )
            .await?;
        check_batch_size("characters", expected, profiles.len())?;

        let progress = relay.finish();
        for profile in profiles {
            let character = acc.ids.character(profile);
            acc.characters.push(character);
        }
        progress.complete(PhaseOutput::Characters(acc.characters.clone()));
        Ok(acc)
    }

    /// Phase 3: generate the settings as one batch.
    #[tracing::instrument(skip_all, fields(total = acc.params.setting_count))]
    pub async fn settings_phase(
        &self,
        mut acc: NovelAccumulator,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<NovelAccumulator> {
        self.ensure_active(Phase::Settings)?;
        let expected = acc.params.setting_count;
        let relay = SubProgressRelay::new(
            PhaseProgress::start(reporter, Phase::Settings, expected),
            "setting",
        );
        let profiles = self
            .generator
            .generate_settings(
                SettingsRequest {
                    params: &acc.params,
                    story: &acc.story,
                    characters: &acc.characters,
                    count: expected,
                    cancellation: &self.cancellation,
                },
                &relay,
            )
            .await?;
        check_batch_size("settings", expected, profiles.len())?;

        let progress = relay.finish();
        for profile in profiles {
            let setting = acc.ids.setting(profile);
            acc.settings.push(setting);
        }
        progress.complete(PhaseOutput::Settings(acc.settings.clone()));
        Ok(acc)
    }

    /// Phase 4: generate parts one at a time, each seeing all earlier parts.
    #[tracing::instrument(skip_all, fields(total = acc.params.parts_count))]
    pub async fn parts_phase(
        &self,
        mut acc: NovelAccumulator,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<NovelAccumulator> {
        let total = acc.params.parts_count;
        let mut progress = PhaseProgress::start(reporter, Phase::Parts, total);

        for part_number in 1..=total {
            self.ensure_active(Phase::Parts)?;
            let outline = self
                .generator
                .generate_part(PartRequest {
                    context: acc.context(),
                    previous_parts: &acc.parts,
                    part_number,
                    total_parts: total,
                })
                .await?;
            let part = acc.ids.part(outline);
            tracing::debug!(part_id = %part.id, title = %part.outline.title, "Part generated");
            progress.item(format!("Generated {}", part.id));
            acc.parts.push(part);
        }

        progress.complete(PhaseOutput::Parts(acc.parts.clone()));
        Ok(acc)
    }

    /// Phase 5: generate chapters part by part, each seeing every earlier
    /// chapter of the novel.
    #[tracing::instrument(skip_all, fields(total = acc.params.total_chapters()))]
    pub async fn chapters_phase(
        &self,
        mut acc: NovelAccumulator,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<NovelAccumulator> {
        let per_part = acc.params.chapters_per_part;
        let mut progress =
            PhaseProgress::start(reporter, Phase::Chapters, acc.parts.len() * per_part);

        for part_index in 0..acc.parts.len() {
            for chapter_number in 1..=per_part {
                self.ensure_active(Phase::Chapters)?;
                let outline = self
                    .generator
                    .generate_chapter(ChapterRequest {
                        context: acc.context(),
                        part: &acc.parts[part_index],
                        previous_chapters: &acc.chapters,
                        chapter_number,
                        chapters_in_part: per_part,
                    })
                    .await?;
                let chapter = acc.ids.chapter(outline, &acc.parts[part_index]);
                tracing::debug!(
                    chapter_id = %chapter.id,
                    part_id = %chapter.part_id,
                    "Chapter generated"
                );
                progress.item(format!("Generated {}", chapter.id));
                acc.chapters.push(chapter);
            }
        }

        progress.complete(PhaseOutput::Chapters(acc.chapters.clone()));
        Ok(acc)
    }

    /// Phase 6: generate scene summaries chapter by chapter, each seeing
    /// every earlier summary of the novel.
    #[tracing::instrument(skip_all, fields(total = acc.chapters.len() * acc.params.scenes_per_chapter))]
    pub async fn scene_summaries_phase(
        &self,
        mut acc: NovelAccumulator,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<NovelAccumulator> {
        let per_chapter = acc.params.scenes_per_chapter;
        let mut progress = PhaseProgress::start(
            reporter,
            Phase::SceneSummaries,
            acc.chapters.len() * per_chapter,
        );

        for chapter_index in 0..acc.chapters.len() {
            for scene_number in 1..=per_chapter {
                self.ensure_active(Phase::SceneSummaries)?;
                let chapter = &acc.chapters[chapter_index];
                let outline = self
                    .generator
                    .generate_scene_summary(SceneSummaryRequest {
                        context: acc.context(),
                        part: acc.part_for(chapter)?,
                        chapter,
                        previous_scene_summaries: &acc.scene_summaries,
                        scene_number,
                        scenes_in_chapter: per_chapter,
                    })
                    .await?;
                let summary = acc.ids.scene_summary(outline, &acc.chapters[chapter_index]);
                tracing::debug!(
                    scene_id = %summary.id,
                    chapter_id = %summary.chapter_id,
                    "Scene summary generated"
                );
                progress.item(format!("Generated {}", summary.id));
                acc.scene_summaries.push(summary);
            }
        }

        progress.complete(PhaseOutput::SceneSummaries(acc.scene_summaries.clone()));
        Ok(acc)
    }

    /// Phase 7: write prose for every scene summary.
    ///
    /// Progress is reported in completion order; scenes keep summary order.
    #[tracing::instrument(
        skip_all,
        fields(total = acc.scene_summaries.len(), concurrency = self.scene_concurrency)
    )]
    pub async fn scene_content_phase(
        &self,
        mut acc: NovelAccumulator,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<NovelAccumulator> {
        let total = acc.scene_summaries.len();
        let mut progress = PhaseProgress::start(reporter, Phase::SceneContent, total);
        let mut slots: Vec<Option<Scene>> = vec![None; total];

        {
            let acc = &acc;
            let mut pending = stream::iter(acc.scene_summaries.iter().enumerate())
                .map(|(index, summary)| async move {
                    self.write_scene(acc, summary)
                        .await
                        .map(|scene| (index, scene))
                })
                .buffer_unordered(self.scene_concurrency);

            while let Some(written) = pending.next().await {
                let (index, scene) = written?;
                progress.item(format!("Wrote {}", scene.id()));
                slots[index] = Some(scene);
            }
        }

        acc.scenes = slots.into_iter().flatten().collect();
        progress.complete(PhaseOutput::Scenes(acc.scenes.clone()));
        Ok(acc)
    }

    /// Phase 8: evaluate and possibly rewrite every scene.
    ///
    /// A no-op, with no events and no collaborator calls, when evaluation is
    /// disabled.
    #[tracing::instrument(
        skip_all,
        fields(total = acc.scenes.len(), enabled = acc.params.enable_scene_evaluation)
    )]
    pub async fn scene_evaluation_phase(
        &self,
        mut acc: NovelAccumulator,
        reporter: &dyn ProgressReporter,
    ) -> FicturesResult<NovelAccumulator> {
        if !acc.params.enable_scene_evaluation {
            tracing::debug!("Scene evaluation disabled, skipping");
            return Ok(acc);
        }

        let total = acc.scenes.len();
        let mut progress = PhaseProgress::start(reporter, Phase::SceneEvaluation, total);
        let identity = acc.story.identity(&acc.params);
        let evaluator = SceneEvaluationLoop::new(
            &self.generator,
            &identity,
            acc.params.max_evaluation_iterations,
            &self.cancellation,
        );
        let mut slots: Vec<Option<Scene>> = vec![None; total];

        {
            let evaluator = &evaluator;
            let mut pending = stream::iter(acc.scenes.iter().enumerate())
                .map(|(index, scene)| async move {
                    self.ensure_active(Phase::SceneEvaluation)?;
                    match evaluator.evaluate(scene).await {
                        Ok(evaluated) => Ok((index, evaluated)),
                        Err(e) if e.is_cancelled() => Err(e),
                        Err(e) => match self.evaluation_failure_policy {
                            EvaluationFailurePolicy::Abort => Err(e),
                            EvaluationFailurePolicy::KeepOriginal => {
                                tracing::warn!(
                                    scene_id = %scene.id(),
                                    error = %e,
                                    "Scene evaluation failed, keeping original content"
                                );
                                Ok((index, scene.clone()))
                            }
                        },
                    }
                })
                .buffer_unordered(self.scene_concurrency);

            while let Some(evaluated) = pending.next().await {
                let (index, scene) = evaluated?;
                progress.item(format!("Evaluated {}", scene.id()));
                slots[index] = Some(scene);
            }
        }

        acc.scenes = slots.into_iter().flatten().collect();
        progress.complete(PhaseOutput::Scenes(acc.scenes.clone()));
        Ok(acc)
    }

    async fn write_scene(
        &self,
        acc: &NovelAccumulator,
        summary: &SceneSummary,
    ) -> FicturesResult<Scene> {
        self.ensure_active(Phase::SceneContent)?;
        let chapter = acc.chapter_for(summary)?;
        let part = acc.part_for(chapter)?;
        let written = self
            .generator
            .generate_scene_content(SceneContentRequest {
                context: acc.context(),
                part,
                chapter,
                summary,
            })
            .await?;
        tracing::debug!(
            scene_id = %summary.id,
            length = written.content.len(),
            "Scene content generated"
        );
        Ok(Scene {
            summary: summary.clone(),
            content: written.content,
            evaluation: None,
        })
    }

    fn ensure_active(&self, phase: Phase) -> FicturesResult<()> {
        ensure_active(&self.cancellation, phase)
    }
}

/// Fail with a cancellation error naming `phase` once `cancellation` fires.
pub(crate) fn ensure_active(cancellation: &CancellationToken, phase: Phase) -> FicturesResult<()> {
    if cancellation.is_cancelled() {
        tracing::warn!(phase = %phase, "Novel generation cancelled");
        return Err(PipelineError::new(PipelineErrorKind::Cancelled {
            phase: phase.to_string(),
        })
        .into());
    }
    Ok(())
}

fn check_batch_size(unit: &str, expected: usize, actual: usize) -> FicturesResult<()> {
    if expected != actual {
        return Err(GenerationError::new(GenerationErrorKind::CountMismatch {
            unit: unit.to_string(),
            expected,
            actual,
        })
        .into());
    }
    Ok(())
}
