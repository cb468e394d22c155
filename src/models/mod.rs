//! Data models for arrangements, items, phases and lessons.
//!
//! Models carry no behaviour beyond validation and display helpers; the
//! counting rules live in `services`.

pub mod arrangement;
pub mod item;
pub mod lesson;
pub mod phase;

pub use arrangement::{Arrangement, LayoutParams, MAX_ITEMS};
pub use item::{Bounds, Item, ItemId, Point};
pub use lesson::{Card, Lesson, MatchRetry};
pub use phase::Phase;
