//! Lesson picker shown at startup and after leaving a lesson.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::lessons::LessonCatalog;

use super::component::{Component, ComponentEvent};
use super::Theme;

/// One row of the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonEntry {
    /// Lesson slug
    pub slug: String,
    /// Display title
    pub title: String,
    /// Number of cards
    pub cards: usize,
    /// Arrangement kinds used, e.g. "circle/line"
    pub arrangements: String,
}

/// Lesson picker state
#[derive(Debug, Clone)]
pub struct LessonPicker {
    entries: Vec<LessonEntry>,
    selected: usize,
    closed: bool,
}

impl LessonPicker {
    /// Creates a picker listing every lesson in the catalog.
    #[must_use]
    pub fn new(catalog: &LessonCatalog) -> Self {
        let entries = catalog
            .lessons()
            .iter()
            .map(|lesson| LessonEntry {
                slug: lesson.slug.clone(),
                title: lesson.title.clone(),
                cards: lesson.card_count(),
                arrangements: lesson.arrangement_kinds().join("/"),
            })
            .collect();
        Self {
            entries,
            selected: 0,
            closed: false,
        }
    }

    /// Currently highlighted entry.
    #[must_use]
    pub fn selected(&self) -> Option<&LessonEntry> {
        self.entries.get(self.selected)
    }

    /// Move selection up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        if !self.entries.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.entries.len() - 1);
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }
}

impl Component for LessonPicker {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self
                .selected()
                .map(|entry| ComponentEvent::LessonSelected(entry.slug.clone())),
            KeyCode::Esc | KeyCode::Char('q') => {
                self.closed = true;
                Some(ComponentEvent::Cancelled)
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let area = centered_rect(70, 70, area);

        f.render_widget(Clear, area);
        f.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Lesson list
                Constraint::Length(3), // Help text
            ])
            .split(area);

        let list_items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.title.clone(), Style::default().fg(theme.text)),
                    Span::styled(
                        format!("  {} card(s), {}", entry.cards, entry.arrangements),
                        Style::default().fg(theme.text_muted),
                    ),
                ]))
            })
            .collect();

        let list = List::new(list_items)
            .block(
                Block::default()
                    .title(format!(" Lessons ({}) ", self.entries.len()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.background)),
            )
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected.min(self.entries.len().saturating_sub(1))));
        f.render_stateful_widget(list, chunks[0], &mut list_state);

        let help = Paragraph::new("^|v: Navigate | Enter: Start lesson | q: Quit")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .style(Style::default().bg(theme.background)),
            )
            .style(Style::default().fg(theme.text_muted));
        f.render_widget(help, chunks[1]);
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}

/// Helper to create a centered rectangle
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
