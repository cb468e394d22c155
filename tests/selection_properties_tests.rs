//! Property-based tests for ordered selection and the session phases.

use lazycount::models::{Arrangement, Phase};
use lazycount::services::{attempt_select, CountingSession, Selection, SessionEvent};
use proptest::prelude::*;

// Strategy for a fresh session: line or circle with 1..20 items
fn session_strategy() -> impl Strategy<Value = CountingSession> {
    (1usize..20, any::<bool>()).prop_map(|(count, circular)| {
        let arrangement = if circular {
            Arrangement::Circle { radius: 100.0 }
        } else {
            Arrangement::Line
        };
        CountingSession::new(count, arrangement).unwrap()
    })
}

// A session plus arbitrary taps, some of them past the last item
fn taps_strategy() -> impl Strategy<Value = (CountingSession, Vec<usize>)> {
    session_strategy().prop_flat_map(|session| {
        let upper = session.target_count() + 2;
        (Just(session), prop::collection::vec(0..upper, 0..80))
    })
}

// A circular session with its start marked and `counted` items correctly counted
fn partly_counted_circle() -> impl Strategy<Value = (CountingSession, usize)> {
    (1usize..20).prop_flat_map(|count| (Just(count), 0..count, 0..count)).prop_map(
        |(count, start, counted)| {
            let mut session =
                CountingSession::new(count, Arrangement::Circle { radius: 100.0 }).unwrap();
            session.tap(start);
            for k in 0..counted {
                session.tap((start + k) % count);
            }
            (session, start)
        },
    )
}

// A count-out session (target <= pool) plus taps, some past the pool
fn count_out_strategy() -> impl Strategy<Value = (CountingSession, Vec<usize>)> {
    (1usize..20)
        .prop_flat_map(|pool| (1..=pool, Just(pool)))
        .prop_flat_map(|(target, pool)| {
            let session = CountingSession::count_out(target, pool, Arrangement::Line).unwrap();
            (Just(session), prop::collection::vec(0..pool + 2, 0..40))
        })
}

fn is_rejection(event: &SessionEvent) -> bool {
    matches!(
        event,
        SessionEvent::AlreadyCounted { .. }
            | SessionEvent::OutOfOrder { .. }
            | SessionEvent::Ignored { .. }
    )
}

proptest! {
    #[test]
    fn test_rejected_taps_never_change_the_session((session, taps) in taps_strategy()) {
        let mut session = session;
        for id in taps {
            let before = session.clone();
            let events = session.tap(id);
            if events.iter().any(is_rejection) {
                prop_assert_eq!(&session, &before);
            }
        }
    }

    #[test]
    fn test_counted_order_follows_counting_rule((session, taps) in taps_strategy()) {
        let mut session = session;
        for id in taps {
            session.tap(id);

            let order = session.counted_order();
            let n = session.target_count();
            prop_assert!(order.len() <= n);
            for (k, &counted) in order.iter().enumerate() {
                let expected = match session.start_index() {
                    Some(start) => (start + k) % n,
                    None => k,
                };
                prop_assert_eq!(counted, expected);
            }
        }
    }

    #[test]
    fn test_matching_exactly_when_all_counted((session, taps) in taps_strategy()) {
        let mut session = session;
        for id in taps {
            session.tap(id);
            let all_counted = session.count() == session.target_count();
            prop_assert_eq!(session.phase() == Phase::Matching, all_counted);
            if session.arrangement().is_circular() && session.start_index().is_none() {
                prop_assert_eq!(session.phase(), Phase::MarkStart);
            }
        }
    }

    #[test]
    fn test_attempt_select_only_accepts_expected((session, _start) in partly_counted_circle(), tapped in 0usize..25) {
        let expected = session.next_expected();
        match attempt_select(&session, tapped) {
            Selection::Accepted(next) => {
                prop_assert_eq!(Some(tapped), expected);
                let mut order = session.counted_order().to_vec();
                order.push(tapped);
                prop_assert_eq!(next.counted_order(), order.as_slice());
            }
            Selection::RejectedAlreadyCounted => {
                prop_assert!(session.is_counted(tapped));
            }
            Selection::RejectedOutOfOrder { expected: reported } => {
                prop_assert_eq!(reported, expected);
                prop_assert_ne!(Some(tapped), expected);
            }
        }
    }

    #[test]
    fn test_circle_wraps_through_every_item((session, start) in partly_counted_circle()) {
        let mut session = session;
        let n = session.target_count();
        while session.phase() == Phase::Counting {
            let next = session.next_expected().unwrap();
            session.tap(next);
        }
        prop_assert_eq!(session.phase(), Phase::Matching);
        let expected: Vec<usize> = (0..n).map(|k| (start + k) % n).collect();
        prop_assert_eq!(session.counted_order(), expected.as_slice());
    }

    #[test]
    fn test_count_out_picks_are_distinct_pool_items((session, taps) in count_out_strategy()) {
        let mut session = session;
        for id in taps {
            let before = session.clone();
            let events = session.tap(id);
            if events.iter().any(is_rejection) {
                prop_assert_eq!(&session, &before);
            }

            let order = session.counted_order();
            prop_assert!(order.len() <= session.item_count());
            prop_assert!(order.iter().all(|&picked| picked < session.item_count()));
            let mut unique = order.to_vec();
            unique.sort_unstable();
            unique.dedup();
            prop_assert_eq!(unique.len(), order.len());
            prop_assert_eq!(session.phase(), Phase::Counting);
        }
    }

    #[test]
    fn test_count_out_check_completes_only_on_target((session, taps) in count_out_strategy()) {
        let mut session = session;
        for id in taps {
            session.tap(id);
        }
        let picked = session.count();
        session.check();
        if picked == session.target_count() {
            prop_assert_eq!(session.phase(), Phase::Complete);
        } else {
            prop_assert_eq!(session.phase(), Phase::Counting);
            prop_assert_eq!(session.count(), 0);
        }
    }
}
