//! In-memory narrators.

use super::{NarrationOptions, Narrator};

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, _text: &str, _options: &NarrationOptions) {}
}

/// Keeps every utterance, newest last.
#[derive(Debug, Clone, Default)]
pub struct RecordingNarrator {
    spoken: Vec<String>,
}

impl RecordingNarrator {
    /// Everything spoken so far.
    #[must_use]
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }
}

impl Narrator for RecordingNarrator {
    fn speak(&mut self, text: &str, _options: &NarrationOptions) {
        self.spoken.push(text.to_string());
    }
}
