//! Terminal lesson player.
//!
//! This module contains the main TUI loop, `AppState`, key handling,
//! and the widgets that draw a lesson card with Ratatui.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]

pub mod board;
pub mod component;
pub mod lesson_picker;
pub mod numeral_picker;
pub mod status_bar;
pub mod theme;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::info;

use crate::config::Config;
use crate::lessons::LessonCatalog;
use crate::models::{Item, ItemId, LayoutParams, Phase};
use crate::narration::{CommandNarrator, Narration, NarrationContext, Narrator, SilentNarrator};
use crate::services::{LessonRun, ProgressEvent, RunEvent, SessionEvent};

pub use board::{BoardWidget, Direction};
pub use component::{Component, ComponentEvent};
pub use lesson_picker::LessonPicker;
pub use numeral_picker::NumeralPicker;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Tone of the status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    /// Instructions and counts
    #[default]
    Info,
    /// Correct answers and completions
    Success,
    /// Rejected taps and wrong numerals
    Error,
}

/// A lesson being played.
#[derive(Debug, Clone)]
pub struct LessonView {
    /// Lesson progress and the current card's session
    pub run: LessonRun,
    /// Items of the current card, in id order
    pub items: Vec<Item>,
    /// Item under the cursor
    pub cursor: ItemId,
    /// Numeral choices, present while matching
    pub numerals: Option<NumeralPicker>,
}

impl LessonView {
    fn new(run: LessonRun, params: &LayoutParams) -> Self {
        let mut view = Self {
            run,
            items: Vec::new(),
            cursor: 0,
            numerals: None,
        };
        view.reload(params);
        view
    }

    /// Lays out the current card and resets the cursor.
    fn reload(&mut self, params: &LayoutParams) {
        self.items = self.run.items(params);
        self.cursor = 0;
        self.numerals = None;
        self.sync_numerals();
    }

    /// Shows the numeral picker exactly while the session is matching.
    fn sync_numerals(&mut self) {
        if self.run.session().phase() == Phase::Matching {
            if self.numerals.is_none() {
                self.numerals = Some(NumeralPicker::new(self.run.candidates()));
            }
        } else {
            self.numerals = None;
        }
    }

    fn move_cursor(&mut self, direction: Direction) {
        if let Some(next) = board::neighbor(&self.items, self.cursor, direction) {
            self.cursor = next;
        }
    }

    fn cycle_cursor(&mut self, forward: bool) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1) % len
        } else {
            self.cursor.checked_sub(1).unwrap_or(len - 1)
        };
    }

    /// Instruction for the current phase.
    #[must_use]
    pub fn instruction(&self) -> String {
        let card = self.run.card();
        let phase = self.run.session().phase();
        if card.is_count_out() && phase == Phase::Counting {
            return format!(
                "Count out {} {}! Press c when you're done.",
                card.count, card.subject
            );
        }
        phase
            .instruction(card.arrangement.is_circular())
            .to_string()
    }
}

/// What the player is showing.
#[derive(Debug, Clone)]
pub enum Screen {
    /// Choosing a lesson
    Picker(LessonPicker),
    /// Playing a lesson
    Lesson(Box<LessonView>),
}

/// Application state for the lesson player
pub struct AppState {
    /// Loaded configuration
    pub config: Config,
    /// Active color palette
    pub theme: Theme,
    /// Built-in lessons
    pub catalog: LessonCatalog,
    /// Current screen
    pub screen: Screen,
    /// Last feedback shown to the learner
    pub status_message: String,
    /// Tone of `status_message`
    pub status_kind: StatusKind,
    narration: Narration,
    narrator: Box<dyn Narrator>,
}

impl AppState {
    /// Creates the player state, opening `lesson` directly when given.
    pub fn new(config: Config, catalog: LessonCatalog, lesson: Option<&str>) -> Result<Self> {
        let narrator: Box<dyn Narrator> = match &config.narration.speech_command {
            Some(command) => Box::new(CommandNarrator::new(command)?),
            None => Box::new(SilentNarrator),
        };
        Self::with_narrator(config, catalog, lesson, narrator)
    }

    /// Creates the player state with an explicit narrator.
    pub fn with_narrator(
        config: Config,
        catalog: LessonCatalog,
        lesson: Option<&str>,
        narrator: Box<dyn Narrator>,
    ) -> Result<Self> {
        let mut state = Self {
            theme: Theme::from_mode(config.ui.theme_mode),
            narration: config.narration.narration(),
            screen: Screen::Picker(LessonPicker::new(&catalog)),
            catalog,
            config,
            status_message: "Pick a lesson to start counting!".to_string(),
            status_kind: StatusKind::Info,
            narrator,
        };
        if let Some(slug) = lesson {
            state.open_lesson(slug)?;
        }
        Ok(state)
    }

    /// The lesson being played, if any.
    #[must_use]
    pub fn lesson_view(&self) -> Option<&LessonView> {
        match &self.screen {
            Screen::Lesson(view) => Some(&**view),
            Screen::Picker(_) => None,
        }
    }

    /// Starts the lesson with the given slug.
    pub fn open_lesson(&mut self, slug: &str) -> Result<()> {
        let lesson = self.catalog.get(slug).cloned().with_context(|| {
            format!(
                "Unknown lesson '{slug}'. Available: {}",
                self.catalog.slugs().join(", ")
            )
        })?;

        let intro = lesson.intro.clone();
        let run = LessonRun::new(lesson)?;
        let view = LessonView::new(run, &self.config.layout);
        let instruction = view.instruction();
        self.screen = Screen::Lesson(Box::new(view));

        self.narration.say(self.narrator.as_mut(), &intro);
        self.announce(&instruction);
        Ok(())
    }

    /// Returns to the lesson picker.
    pub fn back_to_picker(&mut self) {
        self.screen = Screen::Picker(LessonPicker::new(&self.catalog));
        self.set_status("Pick a lesson to start counting!", StatusKind::Info);
    }

    /// Taps an item of the current card.
    pub fn tap(&mut self, id: ItemId) {
        let Screen::Lesson(view) = &mut self.screen else {
            return;
        };
        let events = view.run.tap(id);
        self.handle_run_events(&events);
    }

    /// Chooses a numeral for the current card.
    pub fn choose_numeral(&mut self, numeral: usize) {
        let Screen::Lesson(view) = &mut self.screen else {
            return;
        };
        let events = view.run.select_numeral(numeral);
        self.handle_run_events(&events);
    }

    /// Checks the picks of a count-out card.
    pub fn check_count(&mut self) {
        let Screen::Lesson(view) = &mut self.screen else {
            return;
        };
        let events = view.run.check();
        self.handle_run_events(&events);
    }

    /// Moves to the next card once the current one is complete.
    pub fn next_card(&mut self) -> Result<()> {
        let Screen::Lesson(view) = &mut self.screen else {
            return Ok(());
        };
        if view.run.session().phase() != Phase::Complete {
            self.set_status("Finish counting this card first!", StatusKind::Info);
            return Ok(());
        }
        if !view.run.advance()? {
            self.set_status(
                "That was the last card. Press Esc to pick another lesson.",
                StatusKind::Info,
            );
            return Ok(());
        }
        view.reload(&self.config.layout);
        let instruction = view.instruction();
        self.announce(&instruction);
        Ok(())
    }

    /// Starts the current card over.
    pub fn restart_card(&mut self) -> Result<()> {
        let Screen::Lesson(view) = &mut self.screen else {
            return Ok(());
        };
        view.run.restart_card()?;
        view.reload(&self.config.layout);
        let instruction = view.instruction();
        self.announce(&instruction);
        Ok(())
    }

    /// Says the current instruction again.
    pub fn repeat_instruction(&mut self) {
        if let Some(instruction) = self.lesson_view().map(LessonView::instruction) {
            self.announce(&instruction);
        }
    }

    fn announce(&mut self, text: &str) {
        self.narration.say(self.narrator.as_mut(), text);
        self.set_status(text, StatusKind::Info);
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status_message = text.into();
        self.status_kind = kind;
    }

    fn handle_run_events(&mut self, events: &[RunEvent]) {
        let Screen::Lesson(view) = &mut self.screen else {
            return;
        };
        view.sync_numerals();

        let card = view.run.card();
        let ctx = NarrationContext {
            subject: &card.subject,
            target: card.count,
            circular: card.arrangement.is_circular(),
        };
        let said = self
            .narration
            .narrate(self.narrator.as_mut(), events, &ctx);

        let mut kind = StatusKind::Info;
        let mut message = said.last().cloned();
        for event in events {
            match event {
                RunEvent::Session(
                    SessionEvent::AlreadyCounted { .. }
                    | SessionEvent::OutOfOrder { .. }
                    | SessionEvent::NumeralRejected { .. }
                    | SessionEvent::CountOutRejected { .. },
                ) => kind = StatusKind::Error,
                RunEvent::Session(
                    SessionEvent::NumeralAccepted { .. } | SessionEvent::CountOutAccepted { .. },
                ) => {
                    kind = StatusKind::Success;
                    if view.run.has_next_card() {
                        message = Some(format!(
                            "{} Press n for the next card.",
                            said.last().map_or("", String::as_str)
                        ));
                    }
                }
                RunEvent::Progress(ProgressEvent::LessonCompleted) => {
                    kind = StatusKind::Success;
                    if let Some(celebration) = view.run.lesson().celebration.clone() {
                        self.narration.say(self.narrator.as_mut(), &celebration);
                        message = Some(celebration);
                    }
                }
                RunEvent::Session(SessionEvent::PhaseChanged {
                    to: Phase::Counting,
                    from: Phase::Matching,
                }) => {
                    // Recount after a wrong numeral
                    view.cursor = view.run.session().start_index().unwrap_or(0);
                }
                _ => {}
            }
        }

        if let Some(message) = message {
            self.set_status(message, kind);
        }
    }
}

/// Handles one key press. Returns `true` when the player should quit.
pub fn handle_key_event(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    let event = match &mut state.screen {
        Screen::Picker(picker) => picker.handle_input(key),
        Screen::Lesson(_) => return handle_lesson_key(state, key),
    };
    match event {
        Some(ComponentEvent::LessonSelected(slug)) => {
            state.open_lesson(&slug)?;
            Ok(false)
        }
        Some(ComponentEvent::Cancelled) => Ok(true),
        _ => Ok(false),
    }
}

fn handle_lesson_key(state: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Esc => {
            state.back_to_picker();
            return Ok(false);
        }
        KeyCode::Char('r') => {
            state.restart_card()?;
            return Ok(false);
        }
        KeyCode::Char('n') => {
            state.next_card()?;
            return Ok(false);
        }
        KeyCode::Char('s') => {
            state.repeat_instruction();
            return Ok(false);
        }
        KeyCode::Char('c') => {
            state.check_count();
            return Ok(false);
        }
        _ => {}
    }

    let Screen::Lesson(view) = &mut state.screen else {
        return Ok(false);
    };

    if let Some(picker) = view.numerals.as_mut() {
        if let Some(ComponentEvent::NumeralSelected(numeral)) = picker.handle_input(key) {
            state.choose_numeral(numeral);
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') => view.move_cursor(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => view.move_cursor(Direction::Right),
        KeyCode::Up | KeyCode::Char('k') => view.move_cursor(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => view.move_cursor(Direction::Down),
        KeyCode::Tab => view.cycle_cursor(true),
        KeyCode::BackTab => view.cycle_cursor(false),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let id = view.cursor;
            state.tap(id);
        }
        _ => {}
    }
    Ok(false)
}

/// Setup terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            // Resize events just fall through to the next draw
            if let Event::Key(key) = event::read()? {
                if handle_key_event(state, key)? {
                    break;
                }
            }
        }
    }
    info!("lesson player closed");
    Ok(())
}

fn render(f: &mut Frame, state: &AppState) {
    let theme = &state.theme;
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        f.area(),
    );

    match &state.screen {
        Screen::Picker(picker) => {
            let chunks = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(4)])
                .split(f.area());
            picker.render(f, chunks[0], theme);
            StatusBar::render(f, chunks[1], state, theme);
        }
        Screen::Lesson(view) => render_lesson(f, state, view),
    }
}

fn render_lesson(f: &mut Frame, state: &AppState, view: &LessonView) {
    let theme = &state.theme;
    let picker_height = if view.numerals.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3),             // Title bar
            Constraint::Min(8),                // Board
            Constraint::Length(picker_height), // Numerals
            Constraint::Length(4),             // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state, view);
    BoardWidget::render(f, chunks[1], &view.run, &view.items, view.cursor, theme);
    if let Some(picker) = &view.numerals {
        picker.render(f, chunks[2], theme);
    }
    StatusBar::render(f, chunks[3], state, theme);
}

fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState, view: &LessonView) {
    let run = &view.run;
    let session = run.session();
    let title = format!(
        " {} - card {}/{} - {} - counted {}/{}",
        run.lesson().title,
        run.card_index() + 1,
        run.lesson().card_count(),
        session.phase(),
        session.count(),
        session.target_count()
    );

    let title_widget = Paragraph::new(title)
        .style(
            Style::default()
                .fg(state.theme.primary)
                .bg(state.theme.background),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(state.theme.background)),
        );
    f.render_widget(title_widget, area);
}
