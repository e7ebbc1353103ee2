//! Fictures AI server data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/text/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct TextGenerationRequest {
    /// Flattened conversation
    prompt: String,
    /// Maximum tokens to generate (1 to 8192)
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 2.0)
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Nucleus sampling parameter (0.0 to 1.0)
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    /// Sequences that end generation
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<Vec<String>>,
}

impl TextGenerationRequest {
    /// Creates a new builder for `TextGenerationRequest`.
    pub fn builder() -> TextGenerationRequestBuilder {
        TextGenerationRequestBuilder::default()
    }
}

/// Body returned by `POST /api/v1/text/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct TextGenerationResponse {
    /// Generated text
    text: String,
    /// Model that served the request
    model: String,
    /// Tokens consumed
    #[serde(default)]
    tokens_used: u32,
    /// Why generation stopped ("stop", "length", ...)
    #[serde(default)]
    finish_reason: String,
}

/// A text model advertised by `GET /api/v1/text/models`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TextModel {
    /// Model identifier
    id: String,
    /// Display name
    #[serde(default)]
    name: String,
    /// Short description
    #[serde(default)]
    description: String,
    /// Availability ("available", ...)
    #[serde(default)]
    status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextModelList {
    #[serde(default)]
    pub(crate) models: Vec<TextModel>,
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ServerHealth {
    /// "healthy" when the server is ready
    status: String,
    /// Server version
    #[serde(default)]
    version: Option<String>,
    /// Per-modality model information
    #[serde(default)]
    models: serde_json::Value,
}

/// FastAPI error body; `detail` is a string or a list of validation errors.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) detail: serde_json::Value,
}
