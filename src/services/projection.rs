//! Projection of session state onto a single item's visual state.

use serde::Serialize;

use crate::models::{Item, Phase};
use crate::services::session::CountingSession;

/// How one item should look; consumed by any rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VisualState {
    /// Item has been counted (drawn dimmed)
    pub counted: bool,
    /// Item carries the start flag
    pub marked: bool,
    /// Count badge shown next to a counted item (1-based)
    pub badge: Option<usize>,
    /// Item reacts to taps
    pub tappable: bool,
}

/// Projects an item's state from the phase, its position in the counted order
/// (1-based, `None` if not counted) and whether it is the marked start.
#[must_use]
pub fn project(phase: Phase, counted_position: Option<usize>, is_marked: bool) -> VisualState {
    let counted = counted_position.is_some();
    let tappable = match phase {
        Phase::MarkStart => true,
        Phase::Counting => !counted,
        Phase::Matching | Phase::Complete => false,
    };
    VisualState {
        counted,
        marked: is_marked,
        badge: counted_position,
        tappable,
    }
}

/// Projects `item` against a live session.
#[must_use]
pub fn project_item(session: &CountingSession, item: &Item) -> VisualState {
    project(
        session.phase(),
        session.count_position(item.id),
        session.start_index() == Some(item.id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Arrangement, Point};

    #[test]
    fn test_mark_start_everything_tappable() {
        let state = project(Phase::MarkStart, None, false);
        assert!(state.tappable);
        assert!(!state.counted);
    }

    #[test]
    fn test_counted_items_not_tappable() {
        let state = project(Phase::Counting, Some(2), false);
        assert!(!state.tappable);
        assert_eq!(state.badge, Some(2));
    }

    #[test]
    fn test_matching_freezes_items() {
        assert!(!project(Phase::Matching, None, false).tappable);
        assert!(!project(Phase::Complete, Some(1), true).tappable);
    }

    #[test]
    fn test_project_item_against_session() {
        let mut session = CountingSession::new(4, Arrangement::Circle { radius: 60.0 }).unwrap();
        session.tap(2);
        session.tap(2);

        let marked = Item {
            id: 2,
            position: Point::new(0.0, 0.0),
        };
        let state = project_item(&session, &marked);
        assert!(state.marked);
        assert!(state.counted);
        assert_eq!(state.badge, Some(1));

        let other = Item {
            id: 0,
            position: Point::new(0.0, 0.0),
        };
        let state = project_item(&session, &other);
        assert!(!state.marked);
        assert!(state.tappable);
    }
}
