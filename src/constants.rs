//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and log file settings.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "LazyCount";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "lazycount";

/// Default tracing filter for the command line.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Tracing filter used with `--verbose`.
pub const VERBOSE_LOG_FILTER: &str = "debug";
