//! Top-level error wrapper types.

use crate::{
    AiServerError, BackendError, BuilderError, ConfigError, GenerationError, JsonError,
    PipelineError, StorageError,
};

/// Every failure the workspace can report.
///
/// # Examples
///
/// ```
/// use fictures_error::{FicturesError, JsonError};
///
/// let json_err = JsonError::new("expected value at line 1");
/// let err: FicturesError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FicturesErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Generic backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Model output could not become a narrative unit
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Orchestration failure
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// AI server client failure
    #[from(AiServerError)]
    AiServer(AiServerError),
    /// File read or write failure
    #[from(StorageError)]
    Storage(StorageError),
}

/// Fictures error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fictures_error::{FicturesResult, ConfigError};
///
/// fn might_fail() -> FicturesResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fictures Error: {}", _0)]
pub struct FicturesError(Box<FicturesErrorKind>);

impl FicturesError {
    /// Create a new error from a kind.
    pub fn new(kind: FicturesErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FicturesErrorKind {
        &self.0
    }

    /// True when the run stopped because it was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self.kind(),
            FicturesErrorKind::Pipeline(PipelineError {
                kind: crate::PipelineErrorKind::Cancelled { .. },
                ..
            })
        )
    }
}

impl<T> From<T> for FicturesError
where
    T: Into<FicturesErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fictures operations.
pub type FicturesResult<T> = std::result::Result<T, FicturesError>;
