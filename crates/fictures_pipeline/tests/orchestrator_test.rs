//! End-to-end orchestrator tests with deterministic collaborators.

mod test_utils;

use fictures_core::{Phase, PhaseOutput, ProgressEvent};
use fictures_error::{FicturesErrorKind, GenerationErrorKind, PipelineErrorKind};
use fictures_pipeline::{
    EvaluationFailurePolicy, LlmNovelGenerator, NovelAccumulator, NovelOrchestrator,
};
use std::collections::HashSet;
use test_utils::{
    MockDriver, MockEvaluation, MockGenerator, RecordingReporter, params, scene_prose,
};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_minimal_novel_shape_and_events() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    let novel = orchestrator
        .generate_complete_novel(&params(2, 2, 1, 1, 3), &reporter)
        .await
        .expect("Generation should succeed");

    let character_ids: Vec<_> = novel.characters.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(character_ids, ["character_1", "character_2"]);
    assert_eq!(novel.settings.len(), 2);
    assert_eq!(novel.parts.len(), 1);
    assert_eq!(novel.parts[0].id, "part_1");
    assert_eq!(novel.chapters.len(), 1);
    assert_eq!(novel.chapters[0].id, "chapter_1");
    assert_eq!(novel.chapters[0].part_id, "part_1");

    let scene_ids: Vec<_> = novel.scenes.iter().map(|s| s.id()).collect();
    assert_eq!(scene_ids, ["scene_1", "scene_2", "scene_3"]);
    assert!(novel.scenes.iter().all(|s| s.chapter_id() == "chapter_1"));

    assert_eq!(
        reporter.tags(),
        [
            "story_start",
            "story_complete",
            "characters_start",
            "characters_progress",
            "characters_progress",
            "characters_complete",
            "settings_start",
            "settings_progress",
            "settings_progress",
            "settings_complete",
            "parts_start",
            "parts_progress",
            "parts_complete",
            "chapters_start",
            "chapters_progress",
            "chapters_complete",
            "scene_summaries_start",
            "scene_summaries_progress",
            "scene_summaries_progress",
            "scene_summaries_progress",
            "scene_summaries_complete",
            "scene_content_start",
            "scene_content_progress",
            "scene_content_progress",
            "scene_content_progress",
            "scene_content_complete",
            "complete",
        ]
    );
}

#[tokio::test]
async fn test_collection_sizes_follow_parameters() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    let novel = orchestrator
        .generate_complete_novel(&params(4, 3, 2, 3, 2), &reporter)
        .await
        .expect("Generation should succeed");

    assert_eq!(novel.characters.len(), 4);
    assert_eq!(novel.settings.len(), 3);
    assert_eq!(novel.parts.len(), 2);
    assert_eq!(novel.chapters.len(), 6);
    assert_eq!(novel.scenes.len(), 12);

    let summary = novel.summary();
    assert_eq!(summary.scenes, 12);
    assert_eq!(summary.evaluated_scenes, 0);
}

#[tokio::test]
async fn test_back_references_resolve_exactly_once() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    let novel = orchestrator
        .generate_complete_novel(&params(2, 2, 3, 2, 2), &reporter)
        .await
        .expect("Generation should succeed");

    for chapter in &novel.chapters {
        let owners = novel.parts.iter().filter(|p| p.id == chapter.part_id).count();
        assert_eq!(owners, 1, "{} should have one owning part", chapter.id);
    }
    for scene in &novel.scenes {
        let owners = novel
            .chapters
            .iter()
            .filter(|c| c.id == scene.chapter_id())
            .count();
        assert_eq!(owners, 1, "{} should have one owning chapter", scene.id());
    }
}

#[tokio::test]
async fn test_identifiers_unique_within_type() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    let novel = orchestrator
        .generate_complete_novel(&params(5, 4, 2, 2, 3), &reporter)
        .await
        .expect("Generation should succeed");

    fn unique<'a>(ids: impl Iterator<Item = &'a str>) -> bool {
        let ids: Vec<_> = ids.collect();
        ids.iter().collect::<HashSet<_>>().len() == ids.len()
    }
    assert!(unique(novel.characters.iter().map(|c| c.id.as_str())));
    assert!(unique(novel.settings.iter().map(|s| s.id.as_str())));
    assert!(unique(novel.parts.iter().map(|p| p.id.as_str())));
    assert!(unique(novel.chapters.iter().map(|c| c.id.as_str())));
    assert!(unique(novel.scenes.iter().map(|s| s.id())));
}

#[tokio::test]
async fn test_progress_counters_run_one_to_total() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    orchestrator
        .generate_complete_novel(&params(3, 4, 2, 2, 2), &reporter)
        .await
        .expect("Generation should succeed");

    for (phase, total) in [
        (Phase::Characters, 3),
        (Phase::Settings, 4),
        (Phase::Parts, 2),
        (Phase::Chapters, 4),
        (Phase::SceneSummaries, 8),
        (Phase::SceneContent, 8),
    ] {
        let expected: Vec<_> = (1..=total).map(|n| (n, total)).collect();
        assert_eq!(
            reporter.progress(&format!("{}_progress", phase)),
            expected,
            "progress of {}",
            phase
        );

        let completed = reporter
            .events()
            .into_iter()
            .find_map(|event| match event {
                ProgressEvent::PhaseCompleted {
                    phase: p, output, ..
                } if p == phase => Some(output),
                _ => None,
            })
            .expect("Phase should complete");
        assert_eq!(completed.len(), total, "collection size of {}", phase);
    }
}

#[tokio::test]
async fn test_phases_do_not_interleave() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new()).with_scene_concurrency(3);
    let reporter = RecordingReporter::new();
    let mut params = params(2, 2, 2, 2, 2);
    params.enable_scene_evaluation = true;

    orchestrator
        .generate_complete_novel(&params, &reporter)
        .await
        .expect("Generation should succeed");

    let phases: Vec<Phase> = reporter
        .events()
        .iter()
        .filter_map(ProgressEvent::phase)
        .collect();
    let mut seen = Vec::new();
    for phase in phases {
        if seen.last() != Some(&phase) {
            assert!(!seen.contains(&phase), "{} events interleaved", phase);
            seen.push(phase);
        }
    }
    assert_eq!(seen.len(), 8);
}

#[tokio::test]
async fn test_chapters_see_previous_chapters_across_parts() {
    let generator = MockGenerator::new();
    let calls = generator.calls_handle();
    let orchestrator = NovelOrchestrator::new(generator);
    let reporter = RecordingReporter::new();

    let novel = orchestrator
        .generate_complete_novel(&params(2, 2, 2, 2, 1), &reporter)
        .await
        .expect("Generation should succeed");

    assert_eq!(novel.chapters[2].id, "chapter_3");
    assert_eq!(novel.chapters[2].part_id, "part_2");
    assert_eq!(novel.chapters[3].id, "chapter_4");
    assert_eq!(novel.chapters[3].part_id, "part_2");

    let calls = calls.lock().unwrap().clone();
    let third = &calls.chapter_calls[2];
    assert_eq!(third.part_id, "part_2");
    assert_eq!(third.chapter_number, 1);
    assert_eq!(third.previous_chapter_ids, ["chapter_1", "chapter_2"]);
    assert_eq!(calls.previous_part_counts, [0, 1]);
}

#[tokio::test]
async fn test_scene_summaries_see_owner_and_history() {
    let generator = MockGenerator::new();
    let calls = generator.calls_handle();
    let orchestrator = NovelOrchestrator::new(generator);
    let reporter = RecordingReporter::new();

    orchestrator
        .generate_complete_novel(&params(2, 2, 2, 1, 2), &reporter)
        .await
        .expect("Generation should succeed");

    let calls = calls.lock().unwrap().clone();
    let last = calls.scene_summary_calls.last().expect("Summaries generated");
    assert_eq!(last.chapter_id, "chapter_2");
    assert_eq!(last.part_id, "part_2");
    assert_eq!(last.previous_summary_ids, ["scene_1", "scene_2", "scene_3"]);
    assert_eq!(calls.characters_seen_by_settings, 2);
}

#[tokio::test]
async fn test_identifier_assignment_is_repeatable() {
    let first = NovelOrchestrator::new(MockGenerator::new())
        .generate_complete_novel(&params(2, 3, 2, 2, 2), &RecordingReporter::new())
        .await
        .expect("First run should succeed");
    let second = NovelOrchestrator::new(MockGenerator::new())
        .generate_complete_novel(&params(2, 3, 2, 2, 2), &RecordingReporter::new())
        .await
        .expect("Second run should succeed");

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_evaluation_disabled_makes_no_calls() {
    let generator = MockGenerator::new().with_evaluation(MockEvaluation::Rewrite {
        content: "X".to_string(),
        score: 4.2,
        iterations: 1,
    });
    let calls = generator.calls_handle();
    let orchestrator = NovelOrchestrator::new(generator);
    let reporter = RecordingReporter::new();

    let novel = orchestrator
        .generate_complete_novel(&params(2, 2, 1, 1, 3), &reporter)
        .await
        .expect("Generation should succeed");

    assert_eq!(calls.lock().unwrap().evaluations, 0);
    for scene in &novel.scenes {
        assert_eq!(scene.content, scene_prose(scene.id()));
        assert!(scene.evaluation.is_none());
    }
    assert!(!reporter.tags().iter().any(|t| t.starts_with("scene_evaluation")));
}

#[tokio::test]
async fn test_evaluation_replaces_content() {
    let generator = MockGenerator::new().with_evaluation(MockEvaluation::Rewrite {
        content: "X".to_string(),
        score: 4.2,
        iterations: 1,
    });
    let calls = generator.calls_handle();
    let orchestrator = NovelOrchestrator::new(generator);
    let reporter = RecordingReporter::new();
    let mut params = params(2, 2, 1, 1, 3);
    params.enable_scene_evaluation = true;
    params.max_evaluation_iterations = Some(3);

    let novel = orchestrator
        .generate_complete_novel(&params, &reporter)
        .await
        .expect("Generation should succeed");

    for scene in &novel.scenes {
        assert_eq!(scene.content, "X");
        let evaluation = scene.evaluation.expect("Scene should be evaluated");
        assert_eq!(evaluation.score, 4.2);
        assert!(evaluation.iterations <= 3);
        assert!(evaluation.improved);
    }
    assert_eq!(calls.lock().unwrap().evaluation_budgets, [3, 3, 3]);
    assert_eq!(
        reporter.progress("scene_evaluation_progress"),
        [(1, 3), (2, 3), (3, 3)]
    );
    assert_eq!(novel.summary().evaluated_scenes, 3);
}

#[tokio::test]
async fn test_evaluation_iterations_clamped_to_budget() {
    let generator = MockGenerator::new().with_evaluation(MockEvaluation::Rewrite {
        content: "X".to_string(),
        score: 2.0,
        iterations: 9,
    });
    let orchestrator = NovelOrchestrator::new(generator);
    let mut params = params(1, 1, 1, 1, 2);
    params.enable_scene_evaluation = true;
    params.max_evaluation_iterations = Some(2);

    let novel = orchestrator
        .generate_complete_novel(&params, &RecordingReporter::new())
        .await
        .expect("Generation should succeed");

    for scene in &novel.scenes {
        assert_eq!(scene.evaluation.map(|e| e.iterations), Some(2));
    }
}

#[tokio::test]
async fn test_chapter_failure_stops_after_partial_progress() {
    let generator = MockGenerator::new().with_failing_chapter(2);
    let calls = generator.calls_handle();
    let orchestrator = NovelOrchestrator::new(generator);
    let reporter = RecordingReporter::new();

    let err = orchestrator
        .generate_complete_novel(&params(2, 2, 1, 3, 1), &reporter)
        .await
        .expect_err("Second chapter should fail the run");

    assert!(matches!(
        err.kind(),
        FicturesErrorKind::Generation(e)
            if matches!(e.kind, GenerationErrorKind::EmptyResponse { .. })
    ));

    let tags = reporter.tags();
    assert_eq!(
        tags.iter().filter(|t| *t == "chapters_progress").count(),
        1
    );
    assert!(!tags.iter().any(|t| t == "chapters_complete"));
    assert!(!tags.iter().any(|t| t.starts_with("scene_")));
    assert_eq!(tags.last().map(String::as_str), Some("chapters_progress"));

    let calls = calls.lock().unwrap().clone();
    assert_eq!(calls.chapters, 2);
    assert_eq!(calls.scene_summaries, 0);
}

#[tokio::test]
async fn test_character_count_mismatch_is_an_error() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new().with_character_shortfall(1));
    let reporter = RecordingReporter::new();

    let err = orchestrator
        .generate_complete_novel(&params(3, 2, 1, 1, 1), &reporter)
        .await
        .expect_err("Short batch should fail");

    match err.kind() {
        FicturesErrorKind::Generation(e) => match &e.kind {
            GenerationErrorKind::CountMismatch {
                expected, actual, ..
            } => {
                assert_eq!(*expected, 3);
                assert_eq!(*actual, 2);
            }
            other => panic!("unexpected generation error: {:?}", other),
        },
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!reporter.tags().iter().any(|t| t == "characters_complete"));
}

#[tokio::test]
async fn test_batch_progress_gaps_are_filled() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    orchestrator
        .generate_complete_novel(&params(1, 4, 1, 1, 1), &reporter)
        .await
        .expect("Generation should succeed");

    assert_eq!(
        reporter.progress("settings_progress"),
        [(1, 4), (2, 4), (3, 4), (4, 4)]
    );
}

#[tokio::test]
async fn test_cancelled_before_start() {
    let token = CancellationToken::new();
    token.cancel();
    let generator = MockGenerator::new();
    let calls = generator.calls_handle();
    let orchestrator = NovelOrchestrator::new(generator).with_cancellation(token);
    let reporter = RecordingReporter::new();

    let err = orchestrator
        .generate_complete_novel(&params(1, 1, 1, 1, 1), &reporter)
        .await
        .expect_err("Cancelled run should fail");

    assert!(err.is_cancelled());
    assert!(reporter.events().is_empty());
    assert_eq!(calls.lock().unwrap().story, 0);
}

#[tokio::test]
async fn test_cancelled_between_parts() {
    let token = CancellationToken::new();
    let generator = MockGenerator::new().with_cancel_on_part(1, token.clone());
    let calls = generator.calls_handle();
    let orchestrator = NovelOrchestrator::new(generator).with_cancellation(token);
    let reporter = RecordingReporter::new();

    let err = orchestrator
        .generate_complete_novel(&params(1, 1, 3, 1, 1), &reporter)
        .await
        .expect_err("Cancelled run should fail");

    match err.kind() {
        FicturesErrorKind::Pipeline(e) => {
            assert!(matches!(&e.kind, PipelineErrorKind::Cancelled { phase } if phase == "parts"))
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(calls.lock().unwrap().parts, 1);
    assert_eq!(reporter.progress("parts_progress"), [(1, 3)]);
}

#[tokio::test]
async fn test_cancelled_inside_character_batch() {
    let token = CancellationToken::new();
    let mut script = vec![r#"{"title": "The Lighthouse Letter", "summary": "s"}"#];
    script.extend([r#"{"name": "Keeper", "role": "protagonist"}"#; 10]);
    // Call 2 is the first character.
    let driver = MockDriver::new_success(&script).with_cancel_after(2, token.clone());
    let requests = driver.requests_handle();
    let orchestrator =
        NovelOrchestrator::new(LlmNovelGenerator::new(driver)).with_cancellation(token);
    let reporter = RecordingReporter::new();

    let err = orchestrator
        .generate_complete_novel(&params(10, 1, 1, 1, 1), &reporter)
        .await
        .expect_err("Cancelled run should fail");

    match err.kind() {
        FicturesErrorKind::Pipeline(e) => assert!(
            matches!(&e.kind, PipelineErrorKind::Cancelled { phase } if phase == "characters")
        ),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(requests.lock().unwrap().len(), 2);
    assert_eq!(reporter.progress("characters_progress"), [(1, 10)]);
    assert!(!reporter.tags().contains(&"characters_complete".to_string()));
}

#[tokio::test]
async fn test_cancellation_during_evaluation_is_not_kept_as_original() {
    let token = CancellationToken::new();
    let script = [
        r#"{"title": "The Lighthouse Letter", "summary": "s"}"#,
        r#"{"name": "Keeper", "role": "protagonist"}"#,
        r#"{"name": "Headland", "description": "Wind and rock"}"#,
        r#"{"title": "Arrival", "summary": "The letter comes"}"#,
        r#"{"title": "Tides", "summary": "The keeper reads"}"#,
        r#"{"title": "The Envelope", "summary": "Postmarked next year"}"#,
        "The lamp turned all night.",
        r#"{"score": 1.0, "feedback": "Nothing happens"}"#,
        "Revised prose.",
        r#"{"score": 4.0, "feedback": "Good"}"#,
    ];
    // Call 8 is the first assessment.
    let driver = MockDriver::new_success(&script).with_cancel_after(8, token.clone());
    let requests = driver.requests_handle();
    let orchestrator = NovelOrchestrator::new(LlmNovelGenerator::new(driver))
        .with_cancellation(token)
        .with_evaluation_failure_policy(EvaluationFailurePolicy::KeepOriginal);
    let reporter = RecordingReporter::new();
    let mut params = params(1, 1, 1, 1, 1);
    params.enable_scene_evaluation = true;
    params.max_evaluation_iterations = Some(3);

    let err = orchestrator
        .generate_complete_novel(&params, &reporter)
        .await
        .expect_err("Cancelled run should fail");

    match err.kind() {
        FicturesErrorKind::Pipeline(e) => assert!(
            matches!(&e.kind, PipelineErrorKind::Cancelled { phase } if phase == "scene_evaluation")
        ),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(requests.lock().unwrap().len(), 8);
    assert!(reporter.progress("scene_evaluation_progress").is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_scenes_keep_summary_order() {
    let orchestrator =
        NovelOrchestrator::new(MockGenerator::new().with_staggered_scenes()).with_scene_concurrency(4);
    let reporter = RecordingReporter::new();

    let novel = orchestrator
        .generate_complete_novel(&params(1, 1, 1, 2, 3), &reporter)
        .await
        .expect("Generation should succeed");

    let scene_ids: Vec<_> = novel.scenes.iter().map(|s| s.id()).collect();
    assert_eq!(
        scene_ids,
        ["scene_1", "scene_2", "scene_3", "scene_4", "scene_5", "scene_6"]
    );
    for scene in &novel.scenes {
        assert_eq!(scene.content, scene_prose(scene.id()));
    }
    let expected: Vec<_> = (1..=6).map(|n| (n, 6)).collect();
    assert_eq!(reporter.progress("scene_content_progress"), expected);

    // Later scenes finish first, so progress follows completion order.
    let first_written = reporter
        .events()
        .into_iter()
        .find(|event| event.tag() == "scene_content_progress")
        .map(|event| event.message().to_string())
        .expect("Progress reported");
    assert!(first_written.contains("scene_4"), "{}", first_written);
}

#[tokio::test]
async fn test_evaluation_failure_aborts_by_default() {
    let generator =
        MockGenerator::new().with_evaluation(MockEvaluation::FailOn("scene_2".to_string()));
    let orchestrator = NovelOrchestrator::new(generator);
    let reporter = RecordingReporter::new();
    let mut params = params(1, 1, 1, 1, 3);
    params.enable_scene_evaluation = true;

    let err = orchestrator
        .generate_complete_novel(&params, &reporter)
        .await
        .expect_err("Failed evaluation should abort");

    assert!(matches!(err.kind(), FicturesErrorKind::Generation(_)));
    assert!(!reporter.tags().iter().any(|t| t == "scene_evaluation_complete"));
}

#[tokio::test]
async fn test_evaluation_failure_keeps_original_when_configured() {
    let generator =
        MockGenerator::new().with_evaluation(MockEvaluation::FailOn("scene_2".to_string()));
    let orchestrator = NovelOrchestrator::new(generator)
        .with_evaluation_failure_policy(EvaluationFailurePolicy::KeepOriginal);
    let reporter = RecordingReporter::new();
    let mut params = params(1, 1, 1, 1, 3);
    params.enable_scene_evaluation = true;

    let novel = orchestrator
        .generate_complete_novel(&params, &reporter)
        .await
        .expect("Generation should succeed");

    assert_eq!(novel.scenes[1].content, scene_prose("scene_2"));
    assert!(novel.scenes[1].evaluation.is_none());
    assert!(novel.scenes[0].evaluation.is_some());
    assert!(novel.scenes[2].evaluation.is_some());
    assert_eq!(novel.summary().evaluated_scenes, 2);
    assert_eq!(reporter.progress("scene_evaluation_progress").len(), 3);
}

#[tokio::test]
async fn test_orphaned_chapter_is_fatal() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    let acc = orchestrator
        .story_phase(params(1, 1, 1, 1, 1).resolve(), &reporter)
        .await
        .expect("Story phase should succeed");
    let acc = orchestrator.parts_phase(acc, &reporter).await.unwrap();
    let mut acc: NovelAccumulator = orchestrator.chapters_phase(acc, &reporter).await.unwrap();
    acc.chapters[0].part_id = "part_9".to_string();

    let err = orchestrator
        .scene_summaries_phase(acc, &reporter)
        .await
        .expect_err("Orphaned chapter should fail");

    match err.kind() {
        FicturesErrorKind::Pipeline(e) => match &e.kind {
            PipelineErrorKind::MissingParent {
                parent_id,
                child_id,
                ..
            } => {
                assert_eq!(parent_id, "part_9");
                assert_eq!(child_id, "chapter_1");
            }
            other => panic!("unexpected pipeline error: {:?}", other),
        },
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_orphaned_scene_summary_is_fatal() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    let acc = orchestrator
        .story_phase(params(1, 1, 1, 1, 2).resolve(), &reporter)
        .await
        .unwrap();
    let acc = orchestrator.parts_phase(acc, &reporter).await.unwrap();
    let acc = orchestrator.chapters_phase(acc, &reporter).await.unwrap();
    let mut acc = orchestrator
        .scene_summaries_phase(acc, &reporter)
        .await
        .unwrap();
    acc.scene_summaries[1].chapter_id = "chapter_7".to_string();

    let err = orchestrator
        .scene_content_phase(acc, &reporter)
        .await
        .expect_err("Orphaned scene should fail");

    assert!(matches!(
        err.kind(),
        FicturesErrorKind::Pipeline(e)
            if matches!(&e.kind, PipelineErrorKind::MissingParent { parent_id, .. } if parent_id == "chapter_7")
    ));
}

#[tokio::test]
async fn test_completed_event_carries_summary() {
    let orchestrator = NovelOrchestrator::new(MockGenerator::new());
    let reporter = RecordingReporter::new();

    orchestrator
        .generate_complete_novel(&params(2, 2, 1, 2, 2), &reporter)
        .await
        .expect("Generation should succeed");

    match reporter.events().last() {
        Some(ProgressEvent::Completed { summary, message }) => {
            assert_eq!(summary.title, "The Lighthouse Letter");
            assert_eq!(summary.chapters, 2);
            assert_eq!(summary.scenes, 4);
            assert!(message.contains("The Lighthouse Letter"));
        }
        other => panic!("unexpected final event: {:?}", other),
    }

    let story_output = reporter.events().into_iter().find_map(|event| match event {
        ProgressEvent::PhaseCompleted {
            output: PhaseOutput::Story(story),
            ..
        } => Some(story),
        _ => None,
    });
    assert_eq!(
        story_output.map(|story| story.title),
        Some("The Lighthouse Letter".to_string())
    );
}
