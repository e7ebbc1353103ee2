//! Request and response types for text generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Text generation request handed to a driver.
///
/// # Examples
///
/// ```
/// use fictures_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .max_tokens(Some(100))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(100));
/// assert!(request.stop_sequences.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 2.0)
    pub temperature: Option<f32>,
    /// Nucleus sampling parameter (0.0 to 1.0)
    pub top_p: Option<f32>,
    /// Sequences that end generation
    #[serde(default)]
    pub stop_sequences: Vec<String>,
    /// Model identifier to use
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Why the model stopped producing tokens.
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
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    /// Natural end or stop sequence
    #[default]
    Stop,
    /// Token budget exhausted
    Length,
    /// Anything the server reports that we do not model
    Other,
}

impl From<&str> for FinishReason {
    fn from(reason: &str) -> Self {
        match reason {
            "stop" | "eos" | "end_turn" => Self::Stop,
            "length" | "max_tokens" => Self::Length,
            _ => Self::Other,
        }
    }
}

/// Generated text returned by a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text
    pub text: String,
    /// Model that produced the text
    pub model: String,
    /// Tokens consumed by the request
    pub tokens_used: u32,
    /// Reason generation ended
    pub finish_reason: FinishReason,
}
