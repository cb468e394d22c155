//! Playing a lesson card by card.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::models::{Card, Item, ItemId, LayoutParams, Lesson, Phase};
use crate::services::layout::layout_items;
use crate::services::numerals::candidates_for;
use crate::services::session::{CountingSession, SessionEvent};

/// Event of a lesson run: a session event or lesson-level progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RunEvent {
    /// Raised by the current card's session
    Session(SessionEvent),
    /// Progress across cards
    Progress(ProgressEvent),
}

/// Lesson-level progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// The current card was completed
    CardCompleted {
        /// Index of the completed card
        card: usize,
        /// Cards completed so far
        completed: usize,
    },
    /// Every card of the lesson is done
    LessonCompleted,
}

/// State of one lesson being played.
#[derive(Debug, Clone)]
pub struct LessonRun {
    lesson: Lesson,
    card_index: usize,
    completed_cards: usize,
    session: CountingSession,
}

impl LessonRun {
    /// Starts `lesson` at its first card.
    pub fn new(lesson: Lesson) -> Result<Self> {
        Self::starting_at(lesson, 0)
    }

    /// Starts `lesson` at `card_index`, counting earlier cards as done.
    pub fn starting_at(lesson: Lesson, card_index: usize) -> Result<Self> {
        let card = lesson.cards.get(card_index).with_context(|| {
            format!(
                "Lesson '{}' has {} cards, no card {}",
                lesson.slug,
                lesson.cards.len(),
                card_index
            )
        })?;
        let session = session_for(&lesson, card)?;
        info!(lesson = %lesson.slug, card = card_index, "lesson started");
        Ok(Self {
            lesson,
            card_index,
            completed_cards: card_index,
            session,
        })
    }

    /// The lesson being played.
    #[must_use]
    pub const fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    /// Index of the current card.
    #[must_use]
    pub const fn card_index(&self) -> usize {
        self.card_index
    }

    /// The current card.
    #[must_use]
    pub fn card(&self) -> &Card {
        &self.lesson.cards[self.card_index]
    }

    /// Counting session of the current card.
    #[must_use]
    pub const fn session(&self) -> &CountingSession {
        &self.session
    }

    /// Number of completed cards.
    #[must_use]
    pub const fn completed_cards(&self) -> usize {
        self.completed_cards
    }

    /// Whether every card has been completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.completed_cards >= self.lesson.cards.len()
    }

    /// Whether there is a card after the current one.
    #[must_use]
    pub fn has_next_card(&self) -> bool {
        self.card_index + 1 < self.lesson.cards.len()
    }

    /// Items of the current card laid out with `params`.
    #[must_use]
    pub fn items(&self, params: &LayoutParams) -> Vec<Item> {
        let card = self.card();
        layout_items(card.item_count(), &card.arrangement, params)
    }

    /// Numerals offered for the current card.
    #[must_use]
    pub fn candidates(&self) -> Vec<usize> {
        candidates_for(self.card())
    }

    /// Taps an item of the current card.
    pub fn tap(&mut self, id: ItemId) -> Vec<RunEvent> {
        self.session.tap(id).into_iter().map(RunEvent::Session).collect()
    }

    /// Chooses a numeral for the current card.
    pub fn select_numeral(&mut self, numeral: usize) -> Vec<RunEvent> {
        let was_complete = self.session.phase() == Phase::Complete;
        let events = self.session.select_numeral(numeral);
        self.with_progress(was_complete, events)
    }

    /// Checks the picks of a count-out card.
    pub fn check(&mut self) -> Vec<RunEvent> {
        let was_complete = self.session.phase() == Phase::Complete;
        let events = self.session.check();
        self.with_progress(was_complete, events)
    }

    /// Wraps session events and appends progress when the card just completed.
    fn with_progress(&mut self, was_complete: bool, events: Vec<SessionEvent>) -> Vec<RunEvent> {
        let mut events: Vec<RunEvent> = events.into_iter().map(RunEvent::Session).collect();

        if !was_complete && self.session.phase() == Phase::Complete {
            self.completed_cards += 1;
            events.push(RunEvent::Progress(ProgressEvent::CardCompleted {
                card: self.card_index,
                completed: self.completed_cards,
            }));
            if self.is_finished() {
                info!(lesson = %self.lesson.slug, "lesson completed");
                events.push(RunEvent::Progress(ProgressEvent::LessonCompleted));
            }
        }

        events
    }

    /// Moves to the next card once the current one is complete.
    ///
    /// Returns `false` when the current card is unfinished or is the last one.
    pub fn advance(&mut self) -> Result<bool> {
        if self.session.phase() != Phase::Complete || !self.has_next_card() {
            return Ok(false);
        }
        let next = self.card_index + 1;
        self.session = session_for(&self.lesson, &self.lesson.cards[next])?;
        self.card_index = next;
        Ok(true)
    }

    /// Replaces the current card's session with a fresh one.
    ///
    /// A card that was already completed stays counted as completed.
    pub fn restart_card(&mut self) -> Result<()> {
        self.session = session_for(&self.lesson, self.card())?;
        Ok(())
    }

    /// Starts the whole lesson over.
    pub fn restart(&mut self) -> Result<()> {
        self.session = session_for(&self.lesson, &self.lesson.cards[0])?;
        self.card_index = 0;
        self.completed_cards = 0;
        Ok(())
    }
}

fn session_for(lesson: &Lesson, card: &Card) -> Result<CountingSession> {
    let session = match card.pool {
        Some(pool) => CountingSession::count_out(card.count, pool, card.arrangement),
        None => CountingSession::new(card.count, card.arrangement),
    };
    Ok(session
        .with_context(|| format!("Lesson '{}' has an invalid card", lesson.slug))?
        .with_retry(lesson.retry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Arrangement, MatchRetry};

    fn two_card_lesson() -> Lesson {
        Lesson {
            slug: "test-lesson".to_string(),
            title: "Test".to_string(),
            intro: "Hello".to_string(),
            celebration: None,
            retry: MatchRetry::Stay,
            cards: vec![
                Card {
                    subject: "rocks".to_string(),
                    emoji: "🪨".to_string(),
                    count: 2,
                    pool: None,
                    arrangement: Arrangement::Line,
                    theme: None,
                    candidates: None,
                },
                Card {
                    subject: "stars".to_string(),
                    emoji: "⭐".to_string(),
                    count: 3,
                    pool: None,
                    arrangement: Arrangement::Circle { radius: 80.0 },
                    theme: None,
                    candidates: Some(vec![2, 3, 4]),
                },
            ],
        }
    }

    fn finish_first_card(run: &mut LessonRun) -> Vec<RunEvent> {
        run.tap(0);
        run.tap(1);
        run.select_numeral(2)
    }

    #[test]
    fn test_starting_at_out_of_range_card() {
        assert!(LessonRun::starting_at(two_card_lesson(), 5).is_err());
    }

    #[test]
    fn test_card_completion_reported() {
        let mut run = LessonRun::new(two_card_lesson()).unwrap();
        let events = finish_first_card(&mut run);
        assert!(events.contains(&RunEvent::Progress(ProgressEvent::CardCompleted {
            card: 0,
            completed: 1
        })));
        assert!(!run.is_finished());
    }

    #[test]
    fn test_advance_requires_complete_card() {
        let mut run = LessonRun::new(two_card_lesson()).unwrap();
        assert!(!run.advance().unwrap());
        finish_first_card(&mut run);
        assert!(run.advance().unwrap());
        assert_eq!(run.card_index(), 1);
        assert_eq!(run.session().phase(), Phase::MarkStart);
        assert_eq!(run.candidates(), vec![2, 3, 4]);
    }

    #[test]
    fn test_lesson_completed_after_last_card() {
        let mut run = LessonRun::new(two_card_lesson()).unwrap();
        finish_first_card(&mut run);
        run.advance().unwrap();
        run.tap(1);
        for id in [1, 2, 0] {
            run.tap(id);
        }
        let events = run.select_numeral(3);
        assert!(events.contains(&RunEvent::Progress(ProgressEvent::LessonCompleted)));
        assert!(run.is_finished());
        assert!(!run.advance().unwrap());
    }

    #[test]
    fn test_repeated_numeral_after_complete_not_double_counted() {
        let mut run = LessonRun::new(two_card_lesson()).unwrap();
        finish_first_card(&mut run);
        run.select_numeral(2);
        assert_eq!(run.completed_cards(), 1);
    }

    #[test]
    fn test_restart() {
        let mut run = LessonRun::new(two_card_lesson()).unwrap();
        finish_first_card(&mut run);
        run.advance().unwrap();
        run.restart().unwrap();
        assert_eq!(run.card_index(), 0);
        assert_eq!(run.completed_cards(), 0);
        assert_eq!(run.session().count(), 0);
    }

    fn count_out_lesson() -> Lesson {
        Lesson {
            slug: "feed".to_string(),
            title: "Feed".to_string(),
            intro: "Hello".to_string(),
            celebration: None,
            retry: MatchRetry::Stay,
            cards: vec![Card {
                subject: "fish".to_string(),
                emoji: "🐟".to_string(),
                count: 3,
                pool: Some(10),
                arrangement: Arrangement::Grid { rows: 2, cols: 5 },
                theme: None,
                candidates: None,
            }],
        }
    }

    #[test]
    fn test_count_out_card_lays_out_pool() {
        let run = LessonRun::new(count_out_lesson()).unwrap();
        assert!(run.session().is_count_out());
        assert_eq!(run.items(&LayoutParams::default()).len(), 10);
    }

    #[test]
    fn test_count_out_check_completes_lesson() {
        let mut run = LessonRun::new(count_out_lesson()).unwrap();
        for id in [9, 0, 4] {
            run.tap(id);
        }
        let events = run.check();
        assert!(events.contains(&RunEvent::Session(SessionEvent::CountOutAccepted { count: 3 })));
        assert!(events.contains(&RunEvent::Progress(ProgressEvent::LessonCompleted)));
        assert!(run.is_finished());

        // Checking again changes nothing
        run.check();
        assert_eq!(run.completed_cards(), 1);
    }

    #[test]
    fn test_items_follow_card() {
        let run = LessonRun::new(two_card_lesson()).unwrap();
        assert_eq!(run.items(&LayoutParams::default()).len(), 2);
    }
}
