//! Ordered selection: which item a tap may count next.
//!
//! Line, grid and grouped arrangements are pre-ordered by construction, so
//! the next legal id is simply the number of items counted so far. Circles
//! are counted from the marked start and wrap around. Counting out has no
//! order at all: any item of the pool that is not picked yet is accepted.

use crate::models::ItemId;
use crate::services::session::CountingSession;

/// Result of validating one tap against a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The tap was the expected item; holds the session with the item appended
    Accepted(CountingSession),
    /// The item is already in the counted order
    RejectedAlreadyCounted,
    /// The item is not the next one in counting order
    RejectedOutOfOrder {
        /// The id that would have been accepted, if any
        expected: Option<ItemId>,
    },
}

/// Returns the only id that may be counted next.
///
/// `None` when every item is counted, when a circular session has no
/// marked start yet, or when counting out (no single id is expected).
#[must_use]
pub fn next_expected_id(session: &CountingSession) -> Option<ItemId> {
    if session.is_count_out() {
        return None;
    }
    let counted = session.counted_order.len();
    if counted >= session.target_count {
        return None;
    }
    if session.arrangement.is_circular() {
        session
            .start_index
            .map(|start| (start + counted) % session.target_count)
    } else {
        Some(counted)
    }
}

/// Validates a tap without touching the given session.
///
/// Acceptance returns a new session with `tapped` appended; the phase is left
/// to the caller. Rejections carry no session, so a rejected tap can never
/// change the counted order.
#[must_use]
pub fn attempt_select(session: &CountingSession, tapped: ItemId) -> Selection {
    if session.counted_order.contains(&tapped) {
        return Selection::RejectedAlreadyCounted;
    }

    if session.is_count_out() {
        if tapped >= session.item_count() {
            return Selection::RejectedOutOfOrder { expected: None };
        }
        let mut next = session.clone();
        next.counted_order.push(tapped);
        return Selection::Accepted(next);
    }

    match next_expected_id(session) {
        Some(expected) if expected == tapped => {
            let mut next = session.clone();
            next.counted_order.push(tapped);
            Selection::Accepted(next)
        }
        expected => Selection::RejectedOutOfOrder { expected },
    }
}
