//! Text model backends for Fictures.
//!
//! [`AiServerClient`] talks to the Fictures AI server over HTTP and
//! implements [`fictures_interface::FicturesDriver`] and
//! [`fictures_interface::Health`].
//!
//! # Example
//!
//! ```no_run
//! use fictures_models::AiServerClient;
//! use fictures_interface::Health;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AiServerClient::new("http://localhost:8000")?.with_max_retries(2);
//! println!("{:?}", client.health().await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ai_server;

pub use ai_server::{
    AiServerClient, DEFAULT_AI_SERVER_URL, DEFAULT_TEXT_MODEL, ServerHealth,
    TextGenerationRequest, TextGenerationRequestBuilder, TextGenerationResponse, TextModel,
    from_text_response, health_status, messages_to_prompt, status_error, to_text_request,
};
