//! Status bar widget for feedback messages and key help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::models::Phase;

use super::{AppState, Screen, StatusKind, Theme};

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with the last message and contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let color = match state.status_kind {
            StatusKind::Info => theme.text,
            StatusKind::Success => theme.success,
            StatusKind::Error => theme.error,
        };

        let mut lines = vec![Line::from(Span::styled(
            state.status_message.as_str(),
            Style::default().fg(color),
        ))];

        if state.config.ui.show_help {
            lines.push(Self::help_line(Self::hints(state), theme));
        }

        let status = Paragraph::new(lines)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Key hints for the current screen and phase
    #[must_use]
    pub fn hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
        let Screen::Lesson(view) = &state.screen else {
            return &[("^/v", "Choose"), ("Enter", "Start"), ("q", "Quit")];
        };
        let session = view.run.session();
        if session.is_count_out() && session.phase() == Phase::Counting {
            return &[
                ("Arrows", "Move"),
                ("Enter", "Pick"),
                ("c", "Check"),
                ("s", "Say again"),
                ("r", "Restart"),
                ("Esc", "Lessons"),
            ];
        }
        match session.phase() {
            Phase::MarkStart | Phase::Counting => &[
                ("Arrows", "Move"),
                ("Enter", "Tap"),
                ("s", "Say again"),
                ("r", "Restart"),
                ("Esc", "Lessons"),
            ],
            Phase::Matching => &[
                ("</>", "Choose"),
                ("Enter/0-9", "Answer"),
                ("s", "Say again"),
                ("Esc", "Lessons"),
            ],
            Phase::Complete => &[
                ("n", "Next card"),
                ("r", "Count again"),
                ("Esc", "Lessons"),
                ("q", "Quit"),
            ],
        }
    }

    fn help_line(hints: &[(&'static str, &'static str)], theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }
}
