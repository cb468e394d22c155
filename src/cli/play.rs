//! Play command: replay scripted taps against a lesson card.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::lessons::LessonCatalog;
use crate::models::{Arrangement, ItemId, Phase};
use crate::narration::{CommandNarrator, NarrationContext, Narrator, SilentNarrator};
use crate::services::{LessonRun, RunEvent};
use clap::Args;
use serde::Serialize;

/// Replay a tap sequence against a lesson card and print the transcript
#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    /// Lesson slug (see `lazycount lessons`)
    #[arg(short, long, value_name = "SLUG")]
    pub lesson: String,

    /// Card index within the lesson
    #[arg(long, default_value_t = 0)]
    pub card: usize,

    /// Item ids to tap, in order (e.g. 3,3,4,5)
    #[arg(short, long, value_delimiter = ',', num_args = 0..)]
    pub taps: Vec<ItemId>,

    /// Numeral to choose once counting is done
    #[arg(short, long)]
    pub numeral: Option<usize>,

    /// Check the picks of a count-out card after the taps
    #[arg(long)]
    pub check: bool,

    /// Speak feedback through the configured speech command
    #[arg(long)]
    pub speak: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Input applied in one step
#[derive(Debug, Clone, Copy)]
enum Input {
    Tap(ItemId),
    Numeral(usize),
    Check,
}

/// One step of the transcript
#[derive(Debug, Serialize)]
struct Step {
    /// "tap", "numeral" or "check"
    input: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<usize>,
    events: Vec<RunEvent>,
    said: Vec<String>,
}

/// JSON response for the play command
#[derive(Debug, Serialize)]
struct PlayResponse {
    lesson: String,
    card: usize,
    subject: String,
    target: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pool: Option<usize>,
    arrangement: Arrangement,
    phase: Phase,
    start_index: Option<ItemId>,
    counted_order: Vec<ItemId>,
    complete: bool,
    steps: Vec<Step>,
}

impl PlayArgs {
    /// Execute the play command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = LessonCatalog::load()
            .map_err(|e| CliError::io(format!("Failed to load lessons: {e:#}")))?;
        let lesson = catalog.get(&self.lesson).ok_or_else(|| {
            CliError::validation(format!(
                "Unknown lesson '{}'. Available: {}",
                self.lesson,
                catalog.slugs().join(", ")
            ))
        })?;

        let mut run = LessonRun::starting_at(lesson.clone(), self.card)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let config = Config::load().unwrap_or_default();
        let narration = config.narration.narration();
        let mut narrator: Box<dyn Narrator> = match (&config.narration.speech_command, self.speak) {
            (Some(command), true) => Box::new(
                CommandNarrator::new(command)
                    .map_err(|e| CliError::validation(format!("Invalid speech command: {e}")))?,
            ),
            _ => Box::new(SilentNarrator),
        };

        let card = run.card().clone();
        let ctx = NarrationContext {
            subject: &card.subject,
            target: card.count,
            circular: card.arrangement.is_circular(),
        };

        let inputs = self
            .taps
            .iter()
            .map(|&id| Input::Tap(id))
            .chain(self.numeral.map(Input::Numeral))
            .chain(self.check.then_some(Input::Check));

        let mut steps = Vec::new();
        for input in inputs {
            let (kind, value, events) = match input {
                Input::Tap(id) => ("tap", Some(id), run.tap(id)),
                Input::Numeral(numeral) => {
                    ("numeral", Some(numeral), run.select_numeral(numeral))
                }
                Input::Check => ("check", None, run.check()),
            };
            let said = narration.narrate(narrator.as_mut(), &events, &ctx);
            steps.push(Step {
                input: kind,
                value,
                events,
                said,
            });
        }

        let session = run.session();
        let response = PlayResponse {
            lesson: lesson.slug.clone(),
            card: run.card_index(),
            subject: card.subject.clone(),
            target: session.target_count(),
            pool: card.pool,
            arrangement: *session.arrangement(),
            phase: session.phase(),
            start_index: session.start_index(),
            counted_order: session.counted_order().to_vec(),
            complete: session.phase() == Phase::Complete,
            steps,
        };

        if self.json {
            print_json(&response)?;
        } else {
            print_transcript(&response);
        }

        if !response.complete {
            return Err(CliError::validation(format!(
                "Card not completed (phase: {}, counted {}/{})",
                response.phase,
                response.counted_order.len(),
                response.target
            )));
        }

        Ok(())
    }
}

fn print_transcript(response: &PlayResponse) {
    match response.pool {
        Some(pool) => println!(
            "{} card {}: count out {} of {} {} ({})",
            response.lesson,
            response.card,
            response.target,
            pool,
            response.subject,
            response.arrangement
        ),
        None => println!(
            "{} card {}: {} {} ({})",
            response.lesson,
            response.card,
            response.target,
            response.subject,
            response.arrangement
        ),
    }
    println!();
    for step in &response.steps {
        let input = match step.value {
            Some(value) => format!("{} {}", step.input, value),
            None => step.input.to_string(),
        };
        let said = if step.said.is_empty() {
            String::new()
        } else {
            format!("  \"{}\"", step.said.join(" / "))
        };
        println!("  {:<12} {}{}", input, describe(&step.events), said);
    }
    println!();
    println!(
        "Phase: {}  Counted: {:?}",
        response.phase, response.counted_order
    );
    if response.complete {
        println!("✓ Card complete");
    }
}

fn describe(events: &[RunEvent]) -> String {
    use crate::services::{ProgressEvent, SessionEvent};

    let parts: Vec<String> = events
        .iter()
        .filter_map(|event| match event {
            RunEvent::Session(SessionEvent::StartMarked { id }) => Some(format!("start marked at {id}")),
            RunEvent::Session(SessionEvent::ItemAccepted { count, .. }) => {
                Some(format!("accepted (count {count})"))
            }
            RunEvent::Session(SessionEvent::AlreadyCounted { .. }) => {
                Some("rejected: already counted".to_string())
            }
            RunEvent::Session(SessionEvent::OutOfOrder { expected, .. }) => Some(match expected {
                Some(expected) => format!("rejected: out of order (expected {expected})"),
                None => "rejected: out of order".to_string(),
            }),
            RunEvent::Session(SessionEvent::PhaseChanged { to, .. }) => Some(format!("→ {to}")),
            RunEvent::Session(SessionEvent::NumeralAccepted { .. }) => Some("correct".to_string()),
            RunEvent::Session(SessionEvent::NumeralRejected { .. }) => {
                Some("not the count".to_string())
            }
            RunEvent::Session(SessionEvent::CountOutAccepted { count }) => {
                Some(format!("counted out {count}"))
            }
            RunEvent::Session(SessionEvent::CountOutRejected { count, target }) => {
                Some(format!("picked {count}, needs {target}"))
            }
            RunEvent::Session(SessionEvent::Ignored { phase }) => Some(format!("ignored ({phase})")),
            RunEvent::Session(SessionEvent::MilestoneReached { .. }) => None,
            RunEvent::Progress(ProgressEvent::CardCompleted { .. }) => None,
            RunEvent::Progress(ProgressEvent::LessonCompleted) => {
                Some("lesson complete".to_string())
            }
        })
        .collect();
    parts.join(", ")
}
