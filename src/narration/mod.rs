//! Spoken feedback for counting events.
//!
//! The engine never speaks. It emits events, [`phrase`] turns an event into
//! the words spoken to the learner, and a [`Narrator`] delivers them. Speaking
//! is fire-and-forget: a narrator must return immediately and the engine never
//! waits for speech to finish, so a learner can tap faster than narration
//! plays.

pub mod command;
pub mod recording;

use serde::{Deserialize, Serialize};

use crate::models::Phase;
use crate::services::{ProgressEvent, RunEvent, SessionEvent, MILESTONE_COUNT};

pub use command::CommandNarrator;
pub use recording::{RecordingNarrator, SilentNarrator};

/// Voice settings passed with every utterance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrationOptions {
    /// Speaking rate, 1.0 = normal
    pub rate: f32,
    /// Voice pitch, 1.0 = normal
    pub pitch: f32,
}

impl Default for NarrationOptions {
    fn default() -> Self {
        Self {
            rate: 0.8,
            pitch: 1.1,
        }
    }
}

/// Port to a text-to-speech service.
pub trait Narrator {
    /// Speaks `text` without blocking on playback.
    fn speak(&mut self, text: &str, options: &NarrationOptions);
}

/// What a phrase may refer to.
#[derive(Debug, Clone, Copy)]
pub struct NarrationContext<'a> {
    /// Plural name of the counted things
    pub subject: &'a str,
    /// Number of items on the card
    pub target: usize,
    /// Whether the items sit in a circle
    pub circular: bool,
}

/// Words spoken for an event, or `None` for silent events.
#[must_use]
pub fn phrase(event: &RunEvent, ctx: &NarrationContext<'_>) -> Option<String> {
    match event {
        RunEvent::Session(event) => session_phrase(event, ctx),
        RunEvent::Progress(ProgressEvent::CardCompleted { .. }) => None,
        RunEvent::Progress(ProgressEvent::LessonCompleted) => {
            Some("Amazing! You counted them all!".to_string())
        }
    }
}

fn session_phrase(event: &SessionEvent, ctx: &NarrationContext<'_>) -> Option<String> {
    let text = match *event {
        SessionEvent::StartMarked { .. } => {
            "Great! You marked where to start counting with a flag. Now tap each one going around the circle!"
                .to_string()
        }
        SessionEvent::ItemAccepted { count, .. } if count == MILESTONE_COUNT => {
            "Fiiiiive!".to_string()
        }
        SessionEvent::ItemAccepted { count, .. } => count.to_string(),
        SessionEvent::AlreadyCounted { .. } => "You already counted that one!".to_string(),
        SessionEvent::OutOfOrder { .. } if ctx.circular => {
            "Try counting from your flag, going around the circle!".to_string()
        }
        SessionEvent::OutOfOrder { .. } => "Count in order, from the first one!".to_string(),
        SessionEvent::PhaseChanged {
            to: Phase::Matching,
            ..
        } => format!(
            "{} {}! Now point to the number that shows how many.",
            ctx.target, ctx.subject
        ),
        SessionEvent::NumeralAccepted { numeral } => {
            format!("Yes! {numeral}! That's exactly right!")
        }
        SessionEvent::NumeralRejected { .. } => format!(
            "Hmm, that's not quite right. Try counting the {} again.",
            ctx.subject
        ),
        SessionEvent::CountOutAccepted { count } => {
            format!("Yes! You counted out {count} {}! Great job!", ctx.subject)
        }
        SessionEvent::CountOutRejected { count, target } => format!(
            "Hmm, that's {count} {subject}. We need {target} {subject}. Try again!",
            subject = ctx.subject
        ),
        SessionEvent::MilestoneReached { .. }
        | SessionEvent::PhaseChanged { .. }
        | SessionEvent::Ignored { .. } => return None,
    };
    Some(text)
}

/// Narration settings plus the glue that speaks a batch of events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Narration {
    /// Whether anything is spoken at all
    pub enabled: bool,
    /// Voice settings
    pub options: NarrationOptions,
}

impl Narration {
    /// Creates enabled narration with the given voice settings.
    #[must_use]
    pub const fn new(options: NarrationOptions) -> Self {
        Self {
            enabled: true,
            options,
        }
    }

    /// Speaks `text` directly (instructions, intros).
    pub fn say(&self, narrator: &mut dyn Narrator, text: &str) {
        if self.enabled {
            narrator.speak(text, &self.options);
        }
    }

    /// Speaks the phrase of every event that has one; returns what was said.
    pub fn narrate(
        &self,
        narrator: &mut dyn Narrator,
        events: &[RunEvent],
        ctx: &NarrationContext<'_>,
    ) -> Vec<String> {
        let spoken: Vec<String> = events.iter().filter_map(|e| phrase(e, ctx)).collect();
        if self.enabled {
            for text in &spoken {
                narrator.speak(text, &self.options);
            }
        }
        spoken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(circular: bool) -> NarrationContext<'static> {
        NarrationContext {
            subject: "apples",
            target: 8,
            circular,
        }
    }

    fn session(event: SessionEvent) -> RunEvent {
        RunEvent::Session(event)
    }

    #[test]
    fn test_count_phrases() {
        let three = session(SessionEvent::ItemAccepted { id: 2, count: 3 });
        assert_eq!(phrase(&three, &ctx(false)).as_deref(), Some("3"));

        let five = session(SessionEvent::ItemAccepted { id: 4, count: 5 });
        assert_eq!(phrase(&five, &ctx(false)).as_deref(), Some("Fiiiiive!"));
    }

    #[test]
    fn test_out_of_order_hint_depends_on_arrangement() {
        let event = session(SessionEvent::OutOfOrder {
            id: 5,
            expected: Some(3),
        });
        assert!(phrase(&event, &ctx(true)).unwrap().contains("flag"));
        assert!(phrase(&event, &ctx(false)).unwrap().contains("in order"));
    }

    #[test]
    fn test_matching_prompt_names_subject() {
        let event = session(SessionEvent::PhaseChanged {
            from: Phase::Counting,
            to: Phase::Matching,
        });
        assert_eq!(
            phrase(&event, &ctx(true)).as_deref(),
            Some("8 apples! Now point to the number that shows how many.")
        );
    }

    #[test]
    fn test_count_out_check_phrases() {
        let right = session(SessionEvent::CountOutAccepted { count: 6 });
        assert_eq!(
            phrase(&right, &ctx(false)).as_deref(),
            Some("Yes! You counted out 6 apples! Great job!")
        );

        let wrong = session(SessionEvent::CountOutRejected { count: 8, target: 6 });
        assert_eq!(
            phrase(&wrong, &ctx(false)).as_deref(),
            Some("Hmm, that's 8 apples. We need 6 apples. Try again!")
        );
    }

    #[test]
    fn test_silent_events() {
        let milestone = session(SessionEvent::MilestoneReached { count: 5 });
        assert_eq!(phrase(&milestone, &ctx(false)), None);
        let ignored = session(SessionEvent::Ignored {
            phase: Phase::Complete,
        });
        assert_eq!(phrase(&ignored, &ctx(false)), None);
    }

    #[test]
    fn test_narrate_speaks_in_order() {
        let narration = Narration::new(NarrationOptions::default());
        let mut narrator = RecordingNarrator::default();
        let events = [
            session(SessionEvent::ItemAccepted { id: 0, count: 1 }),
            session(SessionEvent::MilestoneReached { count: 5 }),
            session(SessionEvent::AlreadyCounted { id: 0 }),
        ];
        let spoken = narration.narrate(&mut narrator, &events, &ctx(false));
        assert_eq!(spoken, vec!["1", "You already counted that one!"]);
        assert_eq!(narrator.spoken(), spoken.as_slice());
    }

    #[test]
    fn test_disabled_narration_stays_quiet() {
        let narration = Narration::default();
        let mut narrator = RecordingNarrator::default();
        let events = [session(SessionEvent::ItemAccepted { id: 0, count: 1 })];
        let spoken = narration.narrate(&mut narrator, &events, &ctx(false));
        assert_eq!(spoken, vec!["1"]);
        assert!(narrator.spoken().is_empty());
    }
}
