//! Counting session phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a counting session.
///
/// ```text
/// MarkStart ──tap──▶ Counting ──last item──▶ Matching ──right numeral──▶ Complete
/// ```
///
/// Only circular arrangements visit `MarkStart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the learner to mark where counting starts
    MarkStart,
    /// Accepting ordered taps
    Counting,
    /// Choosing the numeral that matches the count
    Matching,
    /// Finished; a reset builds a new session
    Complete,
}

impl Phase {
    /// Instruction shown (and spoken) for this phase.
    #[must_use]
    pub const fn instruction(&self, circular: bool) -> &'static str {
        match self {
            Self::MarkStart => "Tap one item to mark where you'll start counting!",
            Self::Counting if circular => "Tap each item going around the circle!",
            Self::Counting => "Tap each item in order to count it!",
            Self::Matching => "Which number shows how many?",
            Self::Complete => "All done!",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MarkStart => "mark start",
            Self::Counting => "counting",
            Self::Matching => "matching",
            Self::Complete => "complete",
        };
        f.write_str(name)
    }
}
