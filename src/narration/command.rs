//! Narrator backed by an external speech program (e.g. `espeak-ng`).

use std::process::{Child, Command, Stdio};

use anyhow::Result;
use tracing::{debug, warn};

use super::{NarrationOptions, Narrator};

/// Words per minute at rate 1.0 (espeak's default speed).
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Pitch value at pitch 1.0 (espeak's 0-99 scale).
const BASE_PITCH: f32 = 50.0;

/// Spawns a speech program per utterance and never waits for it.
///
/// The command is a whitespace-separated template. `{wpm}`, `{pitch}` and
/// `{text}` are replaced per utterance; without a `{text}` token the text is
/// appended as the last argument.
///
/// ```text
/// espeak-ng -s {wpm} -p {pitch}
/// say -r {wpm}
/// ```
#[derive(Debug)]
pub struct CommandNarrator {
    template: Vec<String>,
    running: Vec<Child>,
}

impl CommandNarrator {
    /// Parses a command template.
    pub fn new(template: &str) -> Result<Self> {
        let template: Vec<String> = template.split_whitespace().map(String::from).collect();
        if template.is_empty() {
            anyhow::bail!("Speech command is empty");
        }
        Ok(Self {
            template,
            running: Vec::new(),
        })
    }

    /// Expands the template into program arguments for one utterance.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn expand(&self, text: &str, options: &NarrationOptions) -> Vec<String> {
        let wpm = (BASE_WORDS_PER_MINUTE * options.rate).round() as i32;
        let pitch = (BASE_PITCH * options.pitch).round().clamp(0.0, 99.0) as i32;

        let mut has_text = false;
        let mut args: Vec<String> = self
            .template
            .iter()
            .map(|part| {
                if part.contains("{text}") {
                    has_text = true;
                }
                part.replace("{wpm}", &wpm.to_string())
                    .replace("{pitch}", &pitch.to_string())
                    .replace("{text}", text)
            })
            .collect();
        if !has_text {
            args.push(text.to_string());
        }
        args
    }

    /// Drops handles of speech processes that have exited.
    fn reap(&mut self) {
        self.running
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    }
}

impl Narrator for CommandNarrator {
    fn speak(&mut self, text: &str, options: &NarrationOptions) {
        self.reap();

        let args = self.expand(text, options);
        let Some((program, rest)) = args.split_first() else {
            return;
        };

        match Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => {
                debug!(program = %program, text, "speech started");
                self.running.push(child);
            }
            Err(e) => warn!(program = %program, error = %e, "failed to start speech command"),
        }
    }
}
