//! Errors raised while turning model output into narrative units.

/// Generation error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Model returned nothing usable
    #[display("Empty response while generating {}", unit)]
    EmptyResponse {
        /// Narrative unit being generated (e.g. "chapter")
        unit: String,
    },
    /// Model output could not be interpreted
    #[display("Malformed {} response: {}", unit, message)]
    MalformedResponse {
        /// Narrative unit being generated
        unit: String,
        /// What was wrong with the output
        message: String,
    },
    /// A batch collaborator returned the wrong number of items
    #[display("Expected {} {} but received {}", expected, unit, actual)]
    CountMismatch {
        /// Narrative unit being generated
        unit: String,
        /// Requested count
        expected: usize,
        /// Returned count
        actual: usize,
    },
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use fictures_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::CountMismatch {
///     unit: "characters".to_string(),
///     expected: 3,
///     actual: 2,
/// });
/// assert!(err.to_string().contains("Expected 3 characters but received 2"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
