//! Test utilities for pipeline tests.
//!
//! Deterministic collaborators, a recording progress reporter and a
//! scripted driver.

#![allow(dead_code)]

use async_trait::async_trait;
use fictures_core::{
    ChapterOutline, CharacterProfile, GenerateRequest, GenerateResponse, GenerationParameters,
    PartOutline, ProgressEvent, SceneContent, SceneEvaluationResult, SceneOutline,
    SettingProfile, Story,
};
use fictures_error::{
    AiServerError, AiServerErrorKind, FicturesResult, GenerationError, GenerationErrorKind,
};
use fictures_interface::{
    ChapterRequest, CharactersRequest, FicturesDriver, NovelGenerator, PartRequest,
    ProgressReporter, SceneContentRequest, SceneEvaluationRequest, SceneSummaryRequest,
    SettingsRequest, StoryRequest, SubProgress,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Parameters with explicit counts and evaluation switched off.
pub fn params(
    characters: usize,
    settings: usize,
    parts: usize,
    chapters_per_part: usize,
    scenes_per_chapter: usize,
) -> GenerationParameters {
    GenerationParameters::builder()
        .prompt("A lighthouse keeper finds a letter from the future")
        .character_count(characters)
        .setting_count(settings)
        .parts_count(parts)
        .chapters_per_part(chapters_per_part)
        .scenes_per_chapter(scenes_per_chapter)
        .enable_scene_evaluation(false)
        .build()
        .expect("Failed to build test parameters")
}

/// Reporter that keeps every event in arrival order.
#[derive(Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn tags(&self) -> Vec<String> {
        self.events().iter().map(ProgressEvent::tag).collect()
    }

    /// `(current, total)` of every progress event carrying `tag`.
    pub fn progress(&self, tag: &str) -> Vec<(usize, usize)> {
        self.events()
            .into_iter()
            .filter(|event| event.tag() == tag)
            .filter_map(|event| match event {
                ProgressEvent::ItemProgress {
                    current_item,
                    total_items,
                    ..
                } => Some((current_item, total_items)),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// How the mock answers evaluation calls.
#[derive(Debug, Clone)]
pub enum MockEvaluation {
    /// Return the content unchanged with no iterations
    Echo,
    /// Return fixed content for every scene
    Rewrite {
        content: String,
        score: f64,
        iterations: u32,
    },
    /// Fail for the scene with this id, echo the rest
    FailOn(String),
}

/// A chapter call as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterCall {
    pub part_id: String,
    pub chapter_number: usize,
    pub previous_chapter_ids: Vec<String>,
}

/// A scene summary call as the mock saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummaryCall {
    pub part_id: String,
    pub chapter_id: String,
    pub previous_summary_ids: Vec<String>,
}

/// Per-method call counts and recorded requests.
#[derive(Debug, Clone, Default)]
pub struct Calls {
    pub story: usize,
    pub characters: usize,
    pub settings: usize,
    pub parts: usize,
    pub chapters: usize,
    pub scene_summaries: usize,
    pub scene_contents: usize,
    pub evaluations: usize,
    pub previous_part_counts: Vec<usize>,
    pub chapter_calls: Vec<ChapterCall>,
    pub scene_summary_calls: Vec<SceneSummaryCall>,
    pub characters_seen_by_settings: usize,
    pub evaluation_budgets: Vec<u32>,
}

/// Deterministic collaborators.
///
/// Every narrative unit is named after its position so tests can check
/// ordering without inspecting prose.
pub struct MockGenerator {
    evaluation: MockEvaluation,
    fail_chapter_on_call: Option<usize>,
    character_shortfall: usize,
    cancel_on_part: Option<(usize, CancellationToken)>,
    staggered_scenes: bool,
    calls: Arc<Mutex<Calls>>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            evaluation: MockEvaluation::Echo,
            fail_chapter_on_call: None,
            character_shortfall: 0,
            cancel_on_part: None,
            staggered_scenes: false,
            calls: Arc::new(Mutex::new(Calls::default())),
        }
    }
}

impl MockGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evaluation(mut self, evaluation: MockEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Fail the `call`-th chapter request (1-based).
    pub fn with_failing_chapter(mut self, call: usize) -> Self {
        self.fail_chapter_on_call = Some(call);
        self
    }

    /// Return `shortfall` fewer characters than requested.
    pub fn with_character_shortfall(mut self, shortfall: usize) -> Self {
        self.character_shortfall = shortfall;
        self
    }

    /// Cancel `token` while generating part `part_number`.
    pub fn with_cancel_on_part(mut self, part_number: usize, token: CancellationToken) -> Self {
        self.cancel_on_part = Some((part_number, token));
        self
    }

    /// Make later scenes finish before earlier ones.
    pub fn with_staggered_scenes(mut self) -> Self {
        self.staggered_scenes = true;
        self
    }

    /// Shared handle on the recorded calls.
    pub fn calls_handle(&self) -> Arc<Mutex<Calls>> {
        self.calls.clone()
    }

    pub fn calls(&self) -> Calls {
        self.calls.lock().unwrap().clone()
    }
}

pub fn scene_prose(scene_id: &str) -> String {
    format!("Prose for {}", scene_id)
}

fn scene_number(scene_id: &str) -> u64 {
    scene_id
        .trim_start_matches("scene_")
        .parse()
        .unwrap_or_default()
}

#[async_trait]
impl NovelGenerator for MockGenerator {
    async fn generate_story(&self, request: StoryRequest<'_>) -> FicturesResult<Story> {
        self.calls.lock().unwrap().story += 1;
        Ok(Story {
            title: "The Lighthouse Letter".to_string(),
            genre: request.params.genre.clone(),
            summary: request.params.prompt.clone(),
            ..Default::default()
        })
    }

    async fn generate_characters(
        &self,
        request: CharactersRequest<'_>,
        progress: &dyn SubProgress,
    ) -> FicturesResult<Vec<CharacterProfile>> {
        self.calls.lock().unwrap().characters += 1;
        let count = request.count.saturating_sub(self.character_shortfall);
        let mut profiles = Vec::new();
        for number in 1..=count {
            profiles.push(CharacterProfile {
                name: format!("Character {}", number),
                role: if number == 1 { "protagonist" } else { "supporting" }.to_string(),
                ..Default::default()
            });
            progress.report(number, request.count);
        }
        Ok(profiles)
    }

    async fn generate_settings(
        &self,
        request: SettingsRequest<'_>,
        progress: &dyn SubProgress,
    ) -> FicturesResult<Vec<SettingProfile>> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.settings += 1;
            calls.characters_seen_by_settings = request.characters.len();
        }
        // Only the final total is reported; the relay fills the gaps.
        progress.report(request.count, request.count);
        Ok((1..=request.count)
            .map(|number| SettingProfile {
                name: format!("Setting {}", number),
                description: "A windswept headland".to_string(),
                ..Default::default()
            })
            .collect())
    }

    async fn generate_part(&self, request: PartRequest<'_>) -> FicturesResult<PartOutline> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.parts += 1;
            calls.previous_part_counts.push(request.previous_parts.len());
        }
        if let Some((_, token)) = self
            .cancel_on_part
            .as_ref()
            .filter(|(part_number, _)| *part_number == request.part_number)
        {
            token.cancel();
        }
        Ok(PartOutline {
            title: format!("Part {}", request.part_number),
            summary: format!("Part {} of {}", request.part_number, request.total_parts),
            ..Default::default()
        })
    }

    async fn generate_chapter(
        &self,
        request: ChapterRequest<'_>,
    ) -> FicturesResult<ChapterOutline> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.chapters += 1;
            calls.chapter_calls.push(ChapterCall {
                part_id: request.part.id.clone(),
                chapter_number: request.chapter_number,
                previous_chapter_ids: request
                    .previous_chapters
                    .iter()
                    .map(|chapter| chapter.id.clone())
                    .collect(),
            });
            calls.chapters
        };
        if self.fail_chapter_on_call == Some(call) {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResponse {
                unit: "chapter".to_string(),
            })
            .into());
        }
        Ok(ChapterOutline {
            title: format!("Chapter {}", call),
            summary: format!("{} of {}", request.chapter_number, request.part.outline.title),
            ..Default::default()
        })
    }

    async fn generate_scene_summary(
        &self,
        request: SceneSummaryRequest<'_>,
    ) -> FicturesResult<SceneOutline> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.scene_summaries += 1;
            calls.scene_summary_calls.push(SceneSummaryCall {
                part_id: request.part.id.clone(),
                chapter_id: request.chapter.id.clone(),
                previous_summary_ids: request
                    .previous_scene_summaries
                    .iter()
                    .map(|summary| summary.id.clone())
                    .collect(),
            });
            calls.scene_summaries
        };
        Ok(SceneOutline {
            title: format!("Scene {}", call),
            summary: format!("Scene {} of {}", request.scene_number, request.chapter.id),
            character_ids: request
                .context
                .characters
                .iter()
                .map(|character| character.id.clone())
                .collect(),
            ..Default::default()
        })
    }

    async fn generate_scene_content(
        &self,
        request: SceneContentRequest<'_>,
    ) -> FicturesResult<SceneContent> {
        self.calls.lock().unwrap().scene_contents += 1;
        if self.staggered_scenes {
            let delay = 100u64.saturating_sub(scene_number(&request.summary.id) * 10);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(SceneContent {
            content: scene_prose(&request.summary.id),
        })
    }

    async fn evaluate_scene(
        &self,
        request: SceneEvaluationRequest<'_>,
    ) -> FicturesResult<SceneEvaluationResult> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.evaluations += 1;
            calls.evaluation_budgets.push(request.max_iterations);
        }
        match &self.evaluation {
            MockEvaluation::Rewrite {
                content,
                score,
                iterations,
            } => Ok(SceneEvaluationResult {
                final_content: content.clone(),
                score: *score,
                iterations: *iterations,
                improved: true,
            }),
            MockEvaluation::FailOn(scene_id) if *scene_id == request.summary.id => {
                Err(GenerationError::new(GenerationErrorKind::MalformedResponse {
                    unit: "scene assessment".to_string(),
                    message: "no score".to_string(),
                })
                .into())
            }
            MockEvaluation::Echo | MockEvaluation::FailOn(_) => Ok(SceneEvaluationResult {
                final_content: request.content.to_string(),
                score: 4.0,
                iterations: 0,
                improved: false,
            }),
        }
    }
}

/// A single scripted driver response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(AiServerErrorKind),
}

/// Driver that replays scripted responses and records requests.
pub struct MockDriver {
    responses: Mutex<VecDeque<MockResponse>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl MockDriver {
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
            cancel_after: None,
        }
    }

    /// Cancel `token` while answering the `calls`-th request (1-based).
    pub fn with_cancel_after(mut self, calls: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((calls, token));
        self
    }

    /// Shared handle on the recorded requests.
    pub fn requests_handle(&self) -> Arc<Mutex<Vec<GenerateRequest>>> {
        self.requests.clone()
    }

    pub fn new_success(texts: &[&str]) -> Self {
        Self::new_sequence(
            texts
                .iter()
                .map(|text| MockResponse::Success(text.to_string()))
                .collect(),
        )
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Text of the user message of the `index`-th request.
    pub fn prompt(&self, index: usize) -> String {
        self.requests()[index]
            .messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FicturesDriver for MockDriver {
    async fn generate(&self, request: &GenerateRequest) -> FicturesResult<GenerateResponse> {
        let calls = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        if let Some((_, token)) = self
            .cancel_after
            .as_ref()
            .filter(|(cancel_at, _)| *cancel_at == calls)
        {
            token.cancel();
        }
        match self.responses.lock().unwrap().pop_front() {
            Some(MockResponse::Success(text)) => Ok(GenerateResponse {
                text,
                model: "mock-model".to_string(),
                tokens_used: 42,
                finish_reason: Default::default(),
            }),
            Some(MockResponse::Error(kind)) => Err(AiServerError::new(kind).into()),
            None => Err(AiServerError::new(AiServerErrorKind::Request(
                "mock driver exhausted".to_string(),
            ))
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
