//! Lesson definitions: a titled sequence of counting cards.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::Arrangement;

/// What happens after a wrong numeral choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRetry {
    /// Stay in matching and let the learner pick again
    #[default]
    Stay,
    /// Clear the count and send the learner back to counting
    Recount,
}

/// One round of a lesson: a set of identical items to count.
///
/// A card with a `pool` is a count-out card: the numeral `count` is shown
/// first and the learner picks that many items out of `pool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Plural name of the counted things (e.g. "apples")
    pub subject: String,
    /// Glyph drawn for every item
    pub emoji: String,
    /// Target count; also the number of items unless `pool` is set
    pub count: usize,
    /// Items on offer when counting out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<usize>,
    /// How the items are placed
    pub arrangement: Arrangement,
    /// Optional theme label (e.g. "Tea Party")
    #[serde(default)]
    pub theme: Option<String>,
    /// Numeral choices offered when matching; derived from the count if absent
    #[serde(default)]
    pub candidates: Option<Vec<usize>>,
}

impl Card {
    /// Whether the learner counts out `count` items from a larger pool.
    #[must_use]
    pub const fn is_count_out(&self) -> bool {
        self.pool.is_some()
    }

    /// Number of items drawn on the card.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.pool.unwrap_or(self.count)
    }

    /// Checks that the card can be played.
    pub fn validate(&self) -> Result<()> {
        if let Some(pool) = self.pool {
            if self.count == 0 {
                anyhow::bail!("A count-out card needs a count of at least 1");
            }
            if pool < self.count {
                anyhow::bail!(
                    "Pool of {pool} {} is smaller than the count {}",
                    self.subject,
                    self.count
                );
            }
        }
        self.arrangement.validate(self.item_count())
    }
}

/// A lesson: a slug, a title and its cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// Stable identifier used on the command line (e.g. "circle-count-8")
    pub slug: String,
    /// Display title
    pub title: String,
    /// Welcome line spoken when the lesson starts
    pub intro: String,
    /// Line spoken when every card is done
    #[serde(default)]
    pub celebration: Option<String>,
    /// Behaviour after a wrong numeral
    #[serde(default)]
    pub retry: MatchRetry,
    /// Rounds, played in order
    pub cards: Vec<Card>,
}

impl Lesson {
    /// Number of cards in the lesson.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Distinct arrangement kinds used by the lesson, in first-seen order.
    #[must_use]
    pub fn arrangement_kinds(&self) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        for card in &self.cards {
            let kind = card.arrangement.kind_name();
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}
