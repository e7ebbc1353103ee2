//! Pulling JSON out of model responses.
//!
//! Models wrap JSON in markdown fences or surround it with chatter. The
//! extractor tries a fenced block first, then the first balanced object or
//! array, whichever starts earlier in the text.

use fictures_error::{BackendError, FicturesResult};

/// Extract a JSON document from a model response.
///
/// # Errors
///
/// Returns an error if the response contains no JSON object or array.
///
/// # Examples
///
/// ```
/// use fictures_pipeline::extract_json;
///
/// let response = "Here is the chapter:\n```json\n{\"title\": \"Arrival\"}\n```";
/// assert_eq!(extract_json(response).unwrap(), "{\"title\": \"Arrival\"}");
///
/// let inline = "Sure! {\"score\": 4.5} Let me know.";
/// assert_eq!(extract_json(inline).unwrap(), "{\"score\": 4.5}");
/// ```
pub fn extract_json(response: &str) -> FicturesResult<String> {
    if let Some(fenced) = fenced_block(response) {
        let fenced = fenced.trim();
        if fenced.starts_with('{') || fenced.starts_with('[') {
            return Ok(fenced.to_string());
        }
    }

    let mut candidates = [('{', '}'), ('[', ']')]
        .into_iter()
        .filter_map(|(open, close)| response.find(open).map(|start| (start, open, close)))
        .collect::<Vec<_>>();
    candidates.sort_by_key(|(start, _, _)| *start);

    for (start, open, close) in candidates {
        if let Some(json) = balanced(&response[start..], open, close) {
            return Ok(json.to_string());
        }
    }

    tracing::error!(response_length = response.len(), "No JSON found in model response");
    Err(BackendError::new(format!(
        "No JSON found in response (length: {})",
        response.len()
    ))
    .into())
}

/// Parse JSON into `T`.
///
/// # Errors
///
/// Returns an error, with a preview of the input, if parsing fails.
///
/// # Examples
///
/// ```
/// use fictures_pipeline::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Verdict {
///     score: f64,
/// }
///
/// let verdict: Verdict = parse_json(r#"{"score": 3.5}"#).unwrap();
/// assert_eq!(verdict.score, 3.5);
/// ```
pub fn parse_json<T>(json: &str) -> FicturesResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json).map_err(|e| {
        let preview = json.chars().take(100).collect::<String>();
        tracing::error!(error = %e, json_preview = %preview, "JSON parsing failed");
        BackendError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}

/// Body of the first markdown code fence. A missing closing fence (a
/// truncated response) yields everything after the opening one.
fn fenced_block(response: &str) -> Option<&str> {
    let start = response.find("```")?;
    let after_fence = &response[start + 3..];
    let body_start = after_fence.find('\n').map(|n| n + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    Some(body.find("```").map(|end| &body[..end]).unwrap_or(body))
}

/// Prefix of `text` (which starts with `open`) up to the matching `close`,
/// ignoring delimiters inside string literals.
fn balanced(text: &str, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
