//! Counting session state machine.
//!
//! A session owns one round of counting: the target, the arrangement, the
//! marked start (circles only), the ids counted so far and the phase. Every
//! input returns the events it caused; nothing here speaks, sleeps or
//! renders, so a view layer is free to animate or narrate events however it
//! likes.
//!
//! Invalid input is never an error. Out-of-order taps, repeated taps and
//! wrong numerals come back as events the caller turns into feedback.
//!
//! A count-out session runs the other way round: the numeral is known up
//! front, the learner picks items from a larger pool in any order, and
//! [`CountingSession::check`] compares the picked count with the target.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::models::{Arrangement, ItemId, MatchRetry, Phase};
use crate::services::selection::{attempt_select, next_expected_id, Selection};

/// Count that gets its own event (and a stretched "Fiiiiive!").
pub const MILESTONE_COUNT: usize = 5;

/// Something that happened in response to one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The learner marked where circular counting starts
    StartMarked {
        /// Marked item
        id: ItemId,
    },
    /// A tap was counted
    ItemAccepted {
        /// Counted item
        id: ItemId,
        /// Count after this tap (1-based)
        count: usize,
    },
    /// The count reached [`MILESTONE_COUNT`]
    MilestoneReached {
        /// The milestone count
        count: usize,
    },
    /// The tapped item was counted before
    AlreadyCounted {
        /// Tapped item
        id: ItemId,
    },
    /// The tapped item is not next in counting order
    OutOfOrder {
        /// Tapped item
        id: ItemId,
        /// Item that would have been accepted
        expected: Option<ItemId>,
    },
    /// The session moved to another phase
    PhaseChanged {
        /// Previous phase
        from: Phase,
        /// New phase
        to: Phase,
    },
    /// The chosen numeral matches the count
    NumeralAccepted {
        /// Chosen numeral
        numeral: usize,
    },
    /// The chosen numeral does not match the count
    NumeralRejected {
        /// Chosen numeral
        numeral: usize,
    },
    /// A count-out check found exactly the target
    CountOutAccepted {
        /// Items picked
        count: usize,
    },
    /// A count-out check found too few or too many; the picks are cleared
    CountOutRejected {
        /// Items picked
        count: usize,
        /// Items asked for
        target: usize,
    },
    /// Input arrived in a phase that does not take it
    Ignored {
        /// Phase at the time of the input
        phase: Phase,
    },
}

/// One counting round.
///
/// # Invariants
///
/// - `counted_order` holds no duplicates and never exceeds `item_count()`
/// - ordered counting: the phase is `Matching` or `Complete` exactly when
///   every item is counted
/// - for circles, `counted_order[i] == (start_index + i) % target_count`
/// - counting out: the phase is `Complete` only after a check found exactly
///   `target_count` picks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountingSession {
    pub(crate) target_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) pool: Option<usize>,
    pub(crate) arrangement: Arrangement,
    pub(crate) start_index: Option<ItemId>,
    pub(crate) counted_order: Vec<ItemId>,
    pub(crate) phase: Phase,
    pub(crate) retry: MatchRetry,
}

impl CountingSession {
    /// Creates a fresh session for `target_count` items.
    ///
    /// Circles start in `MarkStart`; other arrangements start in `Counting`.
    /// A target of zero has nothing to count and starts in `Matching`.
    pub fn new(target_count: usize, arrangement: Arrangement) -> Result<Self> {
        arrangement
            .validate(target_count)
            .with_context(|| format!("Invalid arrangement for {target_count} items"))?;

        let phase = if target_count == 0 {
            Phase::Matching
        } else if arrangement.is_circular() {
            Phase::MarkStart
        } else {
            Phase::Counting
        };

        Ok(Self {
            target_count,
            pool: None,
            arrangement,
            start_index: None,
            counted_order: Vec::new(),
            phase,
            retry: MatchRetry::default(),
        })
    }

    /// Creates a count-out session: pick `target_count` of `pool` items.
    ///
    /// Picks are unordered and there is no start to mark, even on a circle.
    pub fn count_out(target_count: usize, pool: usize, arrangement: Arrangement) -> Result<Self> {
        if target_count == 0 {
            anyhow::bail!("Counting out needs a target of at least 1");
        }
        if pool < target_count {
            anyhow::bail!("Cannot count out {target_count} from a pool of {pool}");
        }
        arrangement
            .validate(pool)
            .with_context(|| format!("Invalid arrangement for a pool of {pool} items"))?;

        Ok(Self {
            target_count,
            pool: Some(pool),
            arrangement,
            start_index: None,
            counted_order: Vec::new(),
            phase: Phase::Counting,
            retry: MatchRetry::default(),
        })
    }

    /// Sets the behaviour after a wrong numeral.
    #[must_use]
    pub fn with_retry(mut self, retry: MatchRetry) -> Self {
        self.retry = retry;
        self
    }

    /// Number of items to count.
    #[must_use]
    pub const fn target_count(&self) -> usize {
        self.target_count
    }

    /// Number of items on offer: the pool when counting out, else the target.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.pool.unwrap_or(self.target_count)
    }

    /// Whether this is a count-out session.
    #[must_use]
    pub const fn is_count_out(&self) -> bool {
        self.pool.is_some()
    }

    /// Arrangement of the items.
    #[must_use]
    pub const fn arrangement(&self) -> &Arrangement {
        &self.arrangement
    }

    /// Marked start, for circles that have one.
    #[must_use]
    pub const fn start_index(&self) -> Option<ItemId> {
        self.start_index
    }

    /// Ids in the order they were counted.
    #[must_use]
    pub fn counted_order(&self) -> &[ItemId] {
        &self.counted_order
    }

    /// Items counted so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.counted_order.len()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Retry policy after a wrong numeral.
    #[must_use]
    pub const fn retry(&self) -> MatchRetry {
        self.retry
    }

    /// Whether `id` has been counted.
    #[must_use]
    pub fn is_counted(&self, id: ItemId) -> bool {
        self.counted_order.contains(&id)
    }

    /// 1-based position of `id` in the counted order.
    #[must_use]
    pub fn count_position(&self, id: ItemId) -> Option<usize> {
        self.counted_order
            .iter()
            .position(|&counted| counted == id)
            .map(|index| index + 1)
    }

    /// The id the next counting tap must hit.
    #[must_use]
    pub fn next_expected(&self) -> Option<ItemId> {
        next_expected_id(self)
    }

    /// Handles a tap on item `id`.
    ///
    /// In `MarkStart` the tap marks the start and moves to `Counting`; the
    /// marked item still has to be tapped again to be counted. In `Counting`
    /// the tap goes through the ordered selection rules. Other phases ignore
    /// taps.
    pub fn tap(&mut self, id: ItemId) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        match self.phase {
            Phase::MarkStart => {
                if id >= self.target_count {
                    events.push(SessionEvent::Ignored { phase: self.phase });
                } else {
                    self.start_index = Some(id);
                    events.push(SessionEvent::StartMarked { id });
                    self.set_phase(Phase::Counting, &mut events);
                }
            }
            Phase::Counting => match attempt_select(self, id) {
                Selection::Accepted(next) => {
                    self.counted_order = next.counted_order;
                    let count = self.counted_order.len();
                    events.push(SessionEvent::ItemAccepted { id, count });
                    if count == MILESTONE_COUNT {
                        events.push(SessionEvent::MilestoneReached { count });
                    }
                    if !self.is_count_out() && count == self.target_count {
                        self.set_phase(Phase::Matching, &mut events);
                    }
                }
                Selection::RejectedAlreadyCounted => {
                    events.push(SessionEvent::AlreadyCounted { id });
                }
                Selection::RejectedOutOfOrder { expected } => {
                    events.push(SessionEvent::OutOfOrder { id, expected });
                }
            },
            Phase::Matching | Phase::Complete => {
                events.push(SessionEvent::Ignored { phase: self.phase });
            }
        }

        debug!(id, phase = %self.phase, ?events, "tap");
        events
    }

    /// Handles a numeral choice.
    ///
    /// The right numeral completes the session. A wrong one keeps the session
    /// in `Matching`, or with [`MatchRetry::Recount`] clears the count and
    /// returns to `Counting` with the marked start kept.
    pub fn select_numeral(&mut self, numeral: usize) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if self.phase != Phase::Matching {
            events.push(SessionEvent::Ignored { phase: self.phase });
            return events;
        }

        if numeral == self.target_count {
            events.push(SessionEvent::NumeralAccepted { numeral });
            self.set_phase(Phase::Complete, &mut events);
        } else {
            events.push(SessionEvent::NumeralRejected { numeral });
            if self.retry == MatchRetry::Recount && self.target_count > 0 {
                self.counted_order.clear();
                self.set_phase(Phase::Counting, &mut events);
            }
        }

        debug!(numeral, phase = %self.phase, "numeral selected");
        events
    }

    /// Checks the picks of a count-out session.
    ///
    /// Exactly `target_count` picks complete the session. Any other number
    /// clears the picks so the learner can count out again. Ordered sessions
    /// and finished sessions ignore the check.
    pub fn check(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if !self.is_count_out() || self.phase != Phase::Counting {
            events.push(SessionEvent::Ignored { phase: self.phase });
            return events;
        }

        let count = self.counted_order.len();
        if count == self.target_count {
            events.push(SessionEvent::CountOutAccepted { count });
            self.set_phase(Phase::Complete, &mut events);
        } else {
            events.push(SessionEvent::CountOutRejected {
                count,
                target: self.target_count,
            });
            self.counted_order.clear();
        }

        debug!(count, target = self.target_count, phase = %self.phase, "count-out checked");
        events
    }

    fn set_phase(&mut self, to: Phase, events: &mut Vec<SessionEvent>) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            events.push(SessionEvent::PhaseChanged { from, to });
        }
    }
}
