//! Prompt text for the LLM-backed collaborators.

use fictures_core::{
    Chapter, Character, CharacterProfile, Part, ResolvedParameters, SceneSummary, Setting,
    SettingProfile, Story, StoryIdentity,
};
use fictures_interface::{
    ChapterRequest, NovelContext, PartRequest, SceneContentRequest, SceneEvaluationRequest,
    SceneSummaryRequest,
};

const JSON_ONLY: &str = "Output ONLY valid JSON, with no commentary before or after it.";

pub(crate) fn system(params: &ResolvedParameters) -> String {
    format!(
        "You are a novelist planning and writing a long-form work of fiction in {}. \
         Keep every answer consistent with the story so far.",
        params.language
    )
}

pub(crate) fn editor() -> String {
    "You are a demanding fiction editor. Judge scenes honestly and revise them without \
     changing what happens in them."
        .to_string()
}

pub(crate) fn story(params: &ResolvedParameters) -> String {
    let mut prompt = format!(
        "Create the foundation of a novel from this premise:\n{}\n\n",
        params.prompt
    );
    if let Some(genre) = &params.genre {
        prompt.push_str(&format!("Genre: {}\n", genre));
    }
    if let Some(tone) = &params.tone {
        prompt.push_str(&format!("Tone: {}\n", tone));
    }
    prompt.push_str(&format!(
        "\nRespond with a JSON object with the fields \"title\", \"genre\", \"tone\", \
         \"moralFramework\" and \"summary\". {}",
        JSON_ONLY
    ));
    prompt
}

pub(crate) fn character(
    story: &Story,
    existing: &[CharacterProfile],
    number: usize,
    total: usize,
) -> String {
    let mut prompt = story_header(story);
    if !existing.is_empty() {
        prompt.push_str("\nCharacters already created:\n");
        for profile in existing {
            prompt.push_str(&format!("- {} ({})\n", profile.name, profile.role));
        }
    }
    prompt.push_str(&format!(
        "\nCreate character {} of {}. Make them distinct from the characters above. \
         Respond with a JSON object with the fields \"name\", \"role\", \"archetype\", \
         \"personality\", \"motivations\" (array of strings) and \"backstory\". {}",
        number, total, JSON_ONLY
    ));
    prompt
}

pub(crate) fn setting(
    story: &Story,
    characters: &[Character],
    existing: &[SettingProfile],
    number: usize,
    total: usize,
) -> String {
    let mut prompt = story_header(story);
    push_cast(&mut prompt, characters);
    if !existing.is_empty() {
        prompt.push_str("\nSettings already created:\n");
        for profile in existing {
            prompt.push_str(&format!("- {}\n", profile.name));
        }
    }
    prompt.push_str(&format!(
        "\nCreate setting {} of {}. Respond with a JSON object with the fields \"name\", \
         \"description\", \"mood\" and \"sensoryDetails\" (array of strings). {}",
        number, total, JSON_ONLY
    ));
    prompt
}

pub(crate) fn part(request: &PartRequest<'_>) -> String {
    let mut prompt = context_header(&request.context);
    if !request.previous_parts.is_empty() {
        prompt.push_str("\nParts so far:\n");
        for part in request.previous_parts {
            push_part(&mut prompt, part);
        }
    }
    prompt.push_str(&format!(
        "\nOutline part {} of {}. Do not repeat or contradict earlier parts. Respond with a \
         JSON object with the fields \"title\", \"summary\" and \"characterArcs\" (array of \
         strings). {}",
        request.part_number, request.total_parts, JSON_ONLY
    ));
    prompt
}

pub(crate) fn chapter(request: &ChapterRequest<'_>) -> String {
    let mut prompt = context_header(&request.context);
    prompt.push_str("\nCurrent part:\n");
    push_part(&mut prompt, request.part);
    if !request.previous_chapters.is_empty() {
        prompt.push_str("\nChapters so far:\n");
        for chapter in request.previous_chapters {
            push_chapter(&mut prompt, chapter);
        }
    }
    prompt.push_str(&format!(
        "\nOutline chapter {} of {} in this part. Respond with a JSON object with the fields \
         \"title\", \"summary\" and \"arcPosition\". {}",
        request.chapter_number, request.chapters_in_part, JSON_ONLY
    ));
    prompt
}

pub(crate) fn scene_summary(request: &SceneSummaryRequest<'_>) -> String {
    let mut prompt = context_header(&request.context);
    push_settings(&mut prompt, request.context.settings);
    prompt.push_str("\nCurrent part:\n");
    push_part(&mut prompt, request.part);
    prompt.push_str("\nCurrent chapter:\n");
    push_chapter(&mut prompt, request.chapter);
    if !request.previous_scene_summaries.is_empty() {
        prompt.push_str("\nScenes so far:\n");
        for summary in request.previous_scene_summaries {
            push_scene(&mut prompt, summary);
        }
    }
    prompt.push_str(&format!(
        "\nPlan scene {} of {} in this chapter. Respond with a JSON object with the fields \
         \"title\", \"summary\", \"settingId\", \"characterIds\" (array of ids from the lists \
         above), \"goal\", \"conflict\" and \"outcome\". {}",
        request.scene_number, request.scenes_in_chapter, JSON_ONLY
    ));
    prompt
}

pub(crate) fn scene_content(request: &SceneContentRequest<'_>) -> String {
    let mut prompt = context_header(&request.context);
    push_settings(&mut prompt, request.context.settings);
    prompt.push_str("\nPart:\n");
    push_part(&mut prompt, request.part);
    prompt.push_str("\nChapter:\n");
    push_chapter(&mut prompt, request.chapter);
    prompt.push_str("\nScene plan:\n");
    push_scene(&mut prompt, request.summary);
    let outline = &request.summary.outline;
    for (label, value) in [
        ("Goal", &outline.goal),
        ("Conflict", &outline.conflict),
        ("Outcome", &outline.outcome),
    ] {
        if let Some(value) = value {
            prompt.push_str(&format!("{}: {}\n", label, value));
        }
    }
    prompt.push_str(&format!(
        "\nWrite the full prose of this scene in {}. Output only the scene text.",
        request.context.params.language
    ));
    prompt
}

pub(crate) fn assess_scene(request: &SceneEvaluationRequest<'_>, content: &str) -> String {
    format!(
        "{}\nScene \"{}\": {}\n\nScene text:\n{}\n\nRate the scene from 1 to 4 for prose \
         quality, character consistency and fit with the story's tone. Respond with a JSON \
         object with the fields \"score\" (number) and \"feedback\" (concrete revision \
         advice). {}",
        identity_header(request.story),
        request.summary.outline.title,
        request.summary.outline.summary,
        content,
        JSON_ONLY
    )
}

pub(crate) fn revise_scene(
    request: &SceneEvaluationRequest<'_>,
    content: &str,
    feedback: &str,
) -> String {
    format!(
        "{}\nRevise this scene using the feedback. Keep its events and characters.\n\n\
         Feedback:\n{}\n\nScene text:\n{}\n\nOutput only the revised scene text.",
        identity_header(request.story),
        feedback,
        content
    )
}

fn story_header(story: &Story) -> String {
    let mut header = format!("Story: {}\n", story.title);
    if let Some(genre) = &story.genre {
        header.push_str(&format!("Genre: {}\n", genre));
    }
    if let Some(tone) = &story.tone {
        header.push_str(&format!("Tone: {}\n", tone));
    }
    if let Some(moral) = &story.moral_framework {
        header.push_str(&format!("Moral framework: {}\n", moral));
    }
    header.push_str(&format!("Summary: {}\n", story.summary));
    header
}

fn identity_header(story: &StoryIdentity) -> String {
    format!(
        "Story: {}\nGenre: {}\nTone: {}\nMoral framework: {}\nSummary: {}\n",
        story.title(),
        story.genre(),
        story.tone(),
        story.moral_framework(),
        story.summary()
    )
}

fn context_header(context: &NovelContext<'_>) -> String {
    let mut header = story_header(context.story);
    push_cast(&mut header, context.characters);
    header
}

fn push_cast(prompt: &mut String, characters: &[Character]) {
    if characters.is_empty() {
        return;
    }
    prompt.push_str("\nCharacters:\n");
    for character in characters {
        prompt.push_str(&format!(
            "- [{}] {} ({}): {}\n",
            character.id,
            character.profile.name,
            character.profile.role,
            character.profile.personality
        ));
    }
}

fn push_settings(prompt: &mut String, settings: &[Setting]) {
    if settings.is_empty() {
        return;
    }
    prompt.push_str("\nSettings:\n");
    for setting in settings {
        push_entry(prompt, &setting.id, &setting.profile.name, &setting.profile.description);
    }
}

fn push_part(prompt: &mut String, part: &Part) {
    push_entry(prompt, &part.id, &part.outline.title, &part.outline.summary);
}

fn push_chapter(prompt: &mut String, chapter: &Chapter) {
    push_entry(prompt, &chapter.id, &chapter.outline.title, &chapter.outline.summary);
}

fn push_scene(prompt: &mut String, summary: &SceneSummary) {
    push_entry(prompt, &summary.id, &summary.outline.title, &summary.outline.summary);
}

fn push_entry(prompt: &mut String, id: &str, title: &str, summary: &str) {
    prompt.push_str(&format!("- [{}] {}: {}\n", id, title, summary));
}
