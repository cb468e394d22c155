//! Numeral choices offered once counting is done.

use crate::models::Card;

/// Number of numerals offered when a card does not list its own.
pub const DEFAULT_CANDIDATE_COUNT: usize = 4;

/// Four consecutive numerals around `target`: two below, one above.
///
/// Small targets shift the window up so it never goes below zero; the target
/// is always included.
#[must_use]
pub fn numeral_candidates(target: usize) -> Vec<usize> {
    let start = target.saturating_sub(2);
    (start..start + DEFAULT_CANDIDATE_COUNT).collect()
}

/// Numerals offered for a card: its own list if present, sorted and with the
/// card's count guaranteed to be in it.
#[must_use]
pub fn candidates_for(card: &Card) -> Vec<usize> {
    match &card.candidates {
        Some(list) if !list.is_empty() => {
            let mut list = list.clone();
            if !list.contains(&card.count) {
                list.push(card.count);
            }
            list.sort_unstable();
            list.dedup();
            list
        }
        _ => numeral_candidates(card.count),
    }
}
