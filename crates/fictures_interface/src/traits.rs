//! Trait definitions for text model backends.

use crate::HealthStatus;
use async_trait::async_trait;
use fictures_core::{GenerateRequest, GenerateResponse};
use fictures_error::FicturesResult;

/// Core trait that all text model backends implement.
#[async_trait]
pub trait FicturesDriver: Send + Sync {
    /// Generate text for the given request.
    async fn generate(&self, req: &GenerateRequest) -> FicturesResult<GenerateResponse>;

    /// Provider name (e.g., "fictures-ai-server").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "llama-3.2-3b").
    fn model_name(&self) -> &str;
}

/// Trait for backends that support health checks.
#[async_trait]
pub trait Health: FicturesDriver {
    /// Check if the backend is available and functioning.
    async fn health(&self) -> FicturesResult<HealthStatus>;
}
