//! Counting engine services.
//!
//! Layout generation, ordered selection, the session state machine and lesson
//! sequencing. Everything in this module is synchronous and free of I/O.

pub mod layout;
pub mod lesson_run;
pub mod numerals;
pub mod projection;
pub mod selection;
pub mod session;

pub use layout::{circle_angle, generate_positions, layout_items};
pub use lesson_run::{LessonRun, ProgressEvent, RunEvent};
pub use numerals::{candidates_for, numeral_candidates};
pub use projection::{project, project_item, VisualState};
pub use selection::{attempt_select, next_expected_id, Selection};
pub use session::{CountingSession, SessionEvent, MILESTONE_COUNT};
