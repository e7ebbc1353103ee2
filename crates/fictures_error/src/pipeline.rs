//! Pipeline orchestration error types.

/// Pipeline error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// A child unit referenced a parent that was never generated
    #[display("Missing {} '{}' referenced by '{}'", parent_kind, parent_id, child_id)]
    MissingParent {
        /// Kind of the missing parent ("part", "chapter")
        parent_kind: String,
        /// Identifier the child pointed at
        parent_id: String,
        /// Identifier of the orphaned child
        child_id: String,
    },
    /// Run was cancelled before the named phase finished
    #[display("Generation cancelled during {}", phase)]
    Cancelled {
        /// Phase that was running at cancellation
        phase: String,
    },
}

/// Pipeline error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
