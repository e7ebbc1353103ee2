//! Runtime configuration for the `fictures` binary.

use config::{Config, Environment, File};
use derive_getters::Getters;
use fictures_core::GenerationParameters;
use fictures_error::{ConfigError, FicturesError, FicturesResult, StorageError, StorageErrorKind};
use fictures_models::{AiServerClient, DEFAULT_AI_SERVER_URL};
use fictures_pipeline::{
    DEFAULT_MAX_TOKENS, DEFAULT_PASSING_SCORE, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
    EvaluationFailurePolicy, LlmNovelGenerator, SamplingConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};

/// Settings file looked up in the working directory (`fictures.toml`).
pub const CONFIG_FILE_NAME: &str = "fictures";

/// Prefix of environment overrides, e.g. `FICTURES_AI_SERVER_URL`.
pub const ENV_PREFIX: &str = "FICTURES";

const MAX_TOKENS_LIMIT: u32 = 8192;
const MAX_PASSING_SCORE: f64 = 4.0;

/// Connection, sampling and pipeline settings.
///
/// Sources in order of precedence (later sources override earlier):
/// 1. Built-in defaults
/// 2. `fictures.toml` in the working directory, or the file given with `--config`
/// 3. `FICTURES_*` environment variables
///
/// ```toml
/// ai_server_url = "http://localhost:8000"
/// api_key = "fs_..."
/// temperature = 0.8
/// scene_concurrency = 3
/// evaluation_failure_policy = "keep_original"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct FicturesConfig {
    /// AI server address
    ai_server_url: String,
    /// Value of the `x-api-key` header
    api_key: Option<String>,
    /// Model label; the server's default model when unset
    model: Option<String>,
    /// Maximum tokens per call
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling parameter
    top_p: f32,
    /// Retries per call for transient server failures
    max_retries: usize,
    /// Scenes written or evaluated at once
    scene_concurrency: usize,
    /// Evaluation score at which a scene is not revised
    passing_score: f64,
    /// What a failed scene evaluation does to the run
    evaluation_failure_policy: EvaluationFailurePolicy,
    /// Emit JSON log lines
    json_logs: bool,
}

impl Default for FicturesConfig {
    fn default() -> Self {
        Self {
            ai_server_url: DEFAULT_AI_SERVER_URL.to_string(),
            api_key: None,
            model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_retries: 3,
            scene_concurrency: 1,
            passing_score: DEFAULT_PASSING_SCORE,
            evaluation_failure_policy: EvaluationFailurePolicy::default(),
            json_logs: false,
        }
    }
}

impl FicturesConfig {
    /// Load configuration from `path`, or from `fictures.toml` when no path
    /// is given, with `FICTURES_*` environment variables on top.
    ///
    /// An explicit `path` must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or a value has the wrong type.
    #[instrument]
    pub fn load(path: Option<&Path>) -> FicturesResult<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`FicturesConfig::load`], reading `FICTURES_*` overrides from
    /// `vars` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or a value has the wrong type.
    pub fn load_with_env(
        path: Option<&Path>,
        vars: HashMap<String, String>,
    ) -> FicturesResult<Self> {
        let environment =
            Environment::with_prefix(ENV_PREFIX).source(Some(vars.into_iter().collect()));
        Self::load_from(path, environment)
    }

    fn load_from(path: Option<&Path>, environment: Environment) -> FicturesResult<Self> {
        let file = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration from file");
                File::from(path)
            }
            None => {
                debug!("Loading optional configuration from working directory");
                File::with_name(CONFIG_FILE_NAME).required(false)
            }
        };

        Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()
            .map_err(|e| {
                FicturesError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FicturesError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.ai_server_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "ai_server_url must be an http(s) URL, got '{}'",
                self.ai_server_url
            )));
        }
        if self.max_tokens == 0 || self.max_tokens > MAX_TOKENS_LIMIT {
            return Err(ConfigError::new(format!(
                "max_tokens must be between 1 and {}, got {}",
                MAX_TOKENS_LIMIT, self.max_tokens
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::new(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ConfigError::new(format!(
                "top_p must be between 0.0 and 1.0, got {}",
                self.top_p
            )));
        }
        if self.scene_concurrency == 0 {
            return Err(ConfigError::new("scene_concurrency must be at least 1"));
        }
        if self.passing_score <= 0.0 || self.passing_score > MAX_PASSING_SCORE {
            return Err(ConfigError::new(format!(
                "passing_score must be above 0 and at most {}, got {}",
                MAX_PASSING_SCORE, self.passing_score
            )));
        }
        Ok(())
    }

    /// Sampling settings for every model call.
    pub fn sampling(&self) -> SamplingConfig {
        SamplingConfig {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            model: self.model.clone(),
        }
    }

    /// Client for the configured AI server.
    ///
    /// # Errors
    ///
    /// Returns an error if `ai_server_url` is not an http(s) URL.
    pub fn ai_server_client(&self) -> FicturesResult<AiServerClient> {
        let mut client =
            AiServerClient::new(&self.ai_server_url)?.with_max_retries(self.max_retries);
        if let Some(key) = &self.api_key {
            client = client.with_api_key(key);
        }
        if let Some(model) = &self.model {
            client = client.with_model(model);
        }
        Ok(client)
    }

    /// Model-backed collaborators talking to the configured AI server.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn novel_generator(&self) -> FicturesResult<LlmNovelGenerator<AiServerClient>> {
        Ok(LlmNovelGenerator::new(self.ai_server_client()?)
            .with_sampling(self.sampling())
            .with_passing_score(self.passing_score))
    }
}

/// Read generation parameters from a TOML file.
///
/// Keys use the camelCase names of [`GenerationParameters`]
/// (`characterCount`, `scenesPerChapter`, ...). Missing keys stay unset.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_parameters(path: impl AsRef<Path>) -> FicturesResult<GenerationParameters> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.as_ref().display(),
            e
        )))
    })?;

    let params: GenerationParameters = toml::from_str(&contents).map_err(|e| {
        ConfigError::new(format!(
            "Failed to parse generation parameters from {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    debug!(prompt_length = params.prompt.len(), "Loaded generation parameters");
    Ok(params)
}
