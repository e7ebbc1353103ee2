//! Error types for the Fictures workspace.
//!
//! Every crate in the workspace reports failures through [`FicturesError`].
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use fictures_error::{FicturesResult, PipelineError, PipelineErrorKind};
//!
//! fn find_part() -> FicturesResult<()> {
//!     Err(PipelineError::new(PipelineErrorKind::MissingParent {
//!         parent_kind: "part".to_string(),
//!         parent_id: "part_9".to_string(),
//!         child_id: "chapter_1".to_string(),
//!     }))?
//! }
//!
//! let err = find_part().unwrap_err();
//! assert!(err.to_string().contains("part_9"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ai_server;
mod backend;
mod builder;
mod config;
mod error;
mod generation;
mod json;
mod pipeline;
mod storage;

pub use ai_server::{AiServerError, AiServerErrorKind, RetryableError};
pub use backend::BackendError;
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{FicturesError, FicturesErrorKind, FicturesResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use storage::{StorageError, StorageErrorKind};
