//! CLI command handlers for LazyCount.
//!
//! This module provides headless, scriptable access to the counting engine
//! for automation, testing, and lesson authoring.

pub mod common;
pub mod config;
pub mod layout;
pub mod lessons;
pub mod play;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use layout::LayoutArgs;
pub use lessons::LessonsArgs;
pub use play::PlayArgs;
