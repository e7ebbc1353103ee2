//! HTTP client for the Fictures AI server.

use super::conversion::{from_text_response, health_status, status_error, to_text_request};
use super::dto::{ServerHealth, TextGenerationResponse, TextModel, TextModelList};
use async_trait::async_trait;
use fictures_core::{GenerateRequest, GenerateResponse};
use fictures_error::{AiServerError, AiServerErrorKind, FicturesResult};
use fictures_interface::{FicturesDriver, Health, HealthStatus};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{debug, error, info, instrument, warn};

/// Default server address.
pub const DEFAULT_AI_SERVER_URL: &str = "http://localhost:8000";

/// Model the server advertises by default.
pub const DEFAULT_TEXT_MODEL: &str = "llama-3.2-3b";

const GENERATE_PATH: &str = "/api/v1/text/generate";
const MODELS_PATH: &str = "/api/v1/text/models";
const HEALTH_PATH: &str = "/health";

/// Client for the Fictures AI server's text endpoints.
///
/// Authenticates with the `x-api-key` header. Failed calls with transient
/// causes (timeouts, 429, 5xx) are retried with exponential backoff whose
/// shape depends on the error; `max_retries` caps the attempts and `0`
/// disables retrying.
///
/// # Example
///
/// ```no_run
/// use fictures_models::AiServerClient;
/// use fictures_interface::FicturesDriver;
/// use fictures_core::{GenerateRequest, Message};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AiServerClient::new("http://localhost:8000")?.with_api_key("fs_secret");
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Name three lighthouses.")])
///     .build()?;
/// let response = client.generate(&request).await?;
/// println!("{}", response.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AiServerClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_retries: Option<usize>,
    retry_backoff_ms: Option<u64>,
}

impl AiServerClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s) or the HTTP client cannot
    /// be initialized.
    #[instrument(name = "ai_server_client_new", skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>) -> FicturesResult<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AiServerError::new(AiServerErrorKind::InvalidUrl(base_url)).into());
        }

        let http = Client::builder()
            .user_agent(concat!("fictures/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AiServerError::new(AiServerErrorKind::Request(e.to_string())))?;

        info!(url = %base_url, "Creating AI server client");

        Ok(Self {
            http,
            base_url,
            api_key: None,
            model: DEFAULT_TEXT_MODEL.to_string(),
            max_retries: None,
            retry_backoff_ms: None,
        })
    }

    /// Send `key` in the `x-api-key` header.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Name reported by [`FicturesDriver::model_name`].
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Cap retries per call; `0` disables retrying.
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Override the initial backoff of every retry strategy.
    pub fn with_retry_backoff_ms(mut self, backoff_ms: u64) -> Self {
        self.retry_backoff_ms = Some(backoff_ms);
        self
    }

    /// Server address without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the text models the server advertises.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a model list.
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> FicturesResult<Vec<TextModel>> {
        let list: TextModelList = self.get_json(MODELS_PATH).await?;
        debug!(count = list.models.len(), "Listed text models");
        Ok(list.models)
    }

    /// Fetch the raw health document.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable or answers with a
    /// non-success status.
    #[instrument(skip(self))]
    pub async fn server_health(&self) -> FicturesResult<ServerHealth> {
        self.get_json(HEALTH_PATH).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("x-api-key", key),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> FicturesResult<T> {
        let url = self.url(path);
        let response = self
            .authorize(self.http.get(&url))
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, url = %url, "HTTP request failed");
                AiServerError::new(AiServerErrorKind::Request(e.to_string()))
            })?;
        Ok(decode(response).await?)
    }

    async fn post_once<B, T>(&self, path: &str, body: &B) -> Result<T, AiServerError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self
            .authorize(self.http.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, url = %url, "HTTP request failed");
                AiServerError::new(AiServerErrorKind::Request(e.to_string()))
            })?;
        decode(response).await
    }

    /// POST with error-specific retry.
    async fn post_with_retry<B, T>(&self, path: &str, body: &B) -> Result<T, AiServerError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let first = self.post_once(path, body).await;

        let (initial_ms, max_retries, max_delay_secs) = match &first {
            Ok(_) => return first,
            Err(e) if !e.kind.is_retryable() => {
                warn!(error = %e, "Permanent AI server error, failing immediately");
                return first;
            }
            Err(e) => {
                let (mut init_ms, mut retries, delay_secs) = e.kind.retry_strategy_params();
                if let Some(override_backoff) = self.retry_backoff_ms {
                    init_ms = override_backoff;
                }
                if let Some(cap) = self.max_retries {
                    retries = retries.min(cap);
                }
                if retries == 0 {
                    warn!(error = %e, "AI server call failed and retries are disabled");
                    return first;
                }
                info!(
                    error = %e,
                    initial_backoff_ms = init_ms,
                    max_retries = retries,
                    max_delay_secs = delay_secs,
                    "AI server call failed, will retry with configured strategy"
                );
                (init_ms, retries, delay_secs)
            }
        };

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        Retry::spawn(retry_strategy, || async {
            match self.post_once(path, body).await {
                Ok(value) => Ok(value),
                Err(e) if e.kind.is_retryable() => {
                    warn!(error = %e, "AI server call failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent AI server error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AiServerError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| {
        error!(error = ?e, "Failed to read response");
        AiServerError::new(AiServerErrorKind::Request(format!(
            "Failed to read response: {}",
            e
        )))
    })?;

    if !status.is_success() {
        error!(status = %status, body = %body, "AI server returned an error");
        return Err(AiServerError::new(status_error(status.as_u16(), &body)));
    }

    serde_json::from_str(&body).map_err(|e| {
        error!(error = ?e, body_length = body.len(), "Failed to decode response");
        AiServerError::new(AiServerErrorKind::Decode(e.to_string()))
    })
}

#[async_trait]
impl FicturesDriver for AiServerClient {
    #[instrument(skip(self, request), fields(model = %self.model, messages = request.messages.len()))]
    async fn generate(&self, request: &GenerateRequest) -> FicturesResult<GenerateResponse> {
        let body = to_text_request(request)?;
        debug!(prompt_length = body.prompt().len(), "Sending generate request");

        let response: TextGenerationResponse = self.post_with_retry(GENERATE_PATH, &body).await?;

        debug!(
            response_length = response.text().len(),
            tokens_used = response.tokens_used(),
            finish_reason = %response.finish_reason(),
            "Received response from AI server"
        );
        Ok(from_text_response(response))
    }

    fn provider_name(&self) -> &'static str {
        "fictures-ai-server"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Health for AiServerClient {
    #[instrument(skip(self))]
    async fn health(&self) -> FicturesResult<HealthStatus> {
        match self.server_health().await {
            Ok(health) => Ok(health_status(&health)),
            Err(e) => {
                warn!(error = %e, "AI server health check failed");
                Ok(HealthStatus::Unhealthy {
                    message: e.to_string(),
                })
            }
        }
    }
}
