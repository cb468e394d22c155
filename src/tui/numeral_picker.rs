//! Numeral choices offered once every item has been counted.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::component::{Component, ComponentEvent};
use super::Theme;

/// Row of numeral cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralPicker {
    candidates: Vec<usize>,
    selected: usize,
}

impl NumeralPicker {
    /// Creates a picker over `candidates`, highlighting the first.
    #[must_use]
    pub const fn new(candidates: Vec<usize>) -> Self {
        Self {
            candidates,
            selected: 0,
        }
    }

    /// Numerals on offer, in display order.
    #[must_use]
    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    /// Highlighted numeral.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.candidates.get(self.selected).copied()
    }

    fn move_by(&mut self, forward: bool) {
        let len = self.candidates.len();
        if len == 0 {
            return;
        }
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            self.selected.checked_sub(1).unwrap_or(len - 1)
        };
    }
}

impl Component for NumeralPicker {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
                self.move_by(false);
                None
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
                self.move_by(true);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.selected().map(ComponentEvent::NumeralSelected)
            }
            // Typed digits choose directly, even numerals not on display
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let numeral = c.to_digit(10)? as usize;
                if let Some(pos) = self.candidates.iter().position(|&n| n == numeral) {
                    self.selected = pos;
                }
                Some(ComponentEvent::NumeralSelected(numeral))
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let mut spans = Vec::with_capacity(self.candidates.len() * 2);
        for (index, numeral) in self.candidates.iter().enumerate() {
            let style = if index == self.selected {
                Style::default()
                    .fg(theme.background)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            spans.push(Span::styled(format!(" {numeral} "), style));
            spans.push(Span::raw("   "));
        }

        let picker = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(" How many? ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .style(Style::default().bg(theme.background)),
            );
        f.render_widget(picker, area);
    }
}
