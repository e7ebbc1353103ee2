//! Fictures AI server backend.

mod client;
mod conversion;
mod dto;

pub use client::{AiServerClient, DEFAULT_AI_SERVER_URL, DEFAULT_TEXT_MODEL};
pub use conversion::{
    from_text_response, health_status, messages_to_prompt, status_error, to_text_request,
};
pub use dto::{
    ServerHealth, TextGenerationRequest, TextGenerationRequestBuilder, TextGenerationResponse,
    TextModel,
};
