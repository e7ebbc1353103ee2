//! Conversions between Fictures types and AI server DTOs.

use super::dto::{ErrorBody, ServerHealth, TextGenerationRequest, TextGenerationResponse};
use fictures_core::{FinishReason, GenerateRequest, GenerateResponse, Message, Role};
use fictures_error::{AiServerErrorKind, BuilderError, FicturesResult};
use fictures_interface::HealthStatus;

/// Flatten a conversation into the single prompt the server accepts.
pub fn messages_to_prompt(messages: &[Message]) -> String {
    let mut prompt = String::new();

    for msg in messages {
        let role_prefix = match msg.role {
            Role::System => "System: ",
            Role::User => "User: ",
            Role::Assistant => "Assistant: ",
        };

        prompt.push_str(role_prefix);
        prompt.push_str(&msg.content);
        prompt.push_str("\n\n");
    }

    // Cue the model to answer as the assistant.
    prompt.push_str("Assistant: ");
    prompt
}

/// Build the server request for a generate call.
///
/// # Errors
///
/// Returns an error if the request has no messages.
pub fn to_text_request(req: &GenerateRequest) -> FicturesResult<TextGenerationRequest> {
    if req.messages.is_empty() {
        return Err(BuilderError::from("generate request has no messages").into());
    }

    TextGenerationRequest::builder()
        .prompt(messages_to_prompt(&req.messages))
        .max_tokens(req.max_tokens)
        .temperature(req.temperature)
        .top_p(req.top_p)
        .stop_sequences((!req.stop_sequences.is_empty()).then(|| req.stop_sequences.clone()))
        .build()
        .map_err(|e| BuilderError::from(e.to_string()).into())
}

/// Convert the server response into a Fictures response.
pub fn from_text_response(response: TextGenerationResponse) -> GenerateResponse {
    GenerateResponse {
        finish_reason: FinishReason::from(response.finish_reason().as_str()),
        tokens_used: *response.tokens_used(),
        model: response.model().clone(),
        text: response.text().clone(),
    }
}

/// Classify a non-success status and its body.
pub fn status_error(status_code: u16, body: &str) -> AiServerErrorKind {
    match status_code {
        401 | 403 => AiServerErrorKind::Unauthorized,
        _ => AiServerErrorKind::Status {
            status_code,
            message: error_message(body),
        },
    }
}

/// Map the server's health body to a health status.
pub fn health_status(health: &ServerHealth) -> HealthStatus {
    if health.status() == "healthy" {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded {
            message: format!("AI server reports status '{}'", health.status()),
        }
    }
}

/// `detail` of a FastAPI error body, or the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
