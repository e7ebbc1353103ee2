//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the fictures binary.

mod commands;
mod generate;
mod health;
mod models;

pub use commands::{Cli, Commands};
pub use generate::generate_novel;
pub use health::check_health;
pub use models::list_models;
