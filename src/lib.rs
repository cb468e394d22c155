//! LazyCount Library
//!
//! This library provides the layout and ordered-counting engine behind the
//! LazyCount lessons: item positions for each arrangement, the counting
//! session state machine, lesson progression, spoken feedback, and the
//! terminal lesson player.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod lessons;
pub mod models;
pub mod narration;
pub mod services;
#[cfg(feature = "ratatui")]
pub mod tui;
