//! Board widget: draws a card's items at their canvas positions.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::models::{Bounds, Item, Point};
use crate::services::{project_item, LessonRun, VisualState};

use super::Theme;

/// Horizontal padding inside the border, in cells
const PAD_X: u16 = 4;
/// Vertical padding inside the border, in cells
const PAD_Y: u16 = 1;
/// Terminal cells are about twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// Cursor movement on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards smaller y
    Up,
    /// Towards larger y
    Down,
    /// Towards smaller x
    Left,
    /// Towards larger x
    Right,
}

impl Direction {
    const fn vector(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Nearest item from `from` in `direction`, favouring items straight ahead.
#[must_use]
pub fn neighbor(items: &[Item], from: usize, direction: Direction) -> Option<usize> {
    let origin = items.get(from)?.position;
    let (dx, dy) = direction.vector();

    items
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != from)
        .filter_map(|(index, item)| {
            let ox = item.position.x - origin.x;
            let oy = item.position.y - origin.y;
            let along = ox * dx + oy * dy;
            if along <= 0.5 {
                return None;
            }
            let across = (ox * dy - oy * dx).abs();
            Some((index, along + 2.0 * across))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// Maps canvas positions to terminal cells inside `inner`, keeping the
/// arrangement's shape and centering it.
#[must_use]
pub fn cell_positions(points: &[Point], inner: Rect) -> Vec<(u16, u16)> {
    let Some(bounds) = Bounds::of(points) else {
        return Vec::new();
    };

    let usable_w = f64::from(inner.width.saturating_sub(2 * PAD_X));
    let usable_h = f64::from(inner.height.saturating_sub(2 * PAD_Y));

    let scale_x = if bounds.width() > 0.0 {
        usable_w / bounds.width()
    } else {
        f64::INFINITY
    };
    let scale_y = if bounds.height() > 0.0 {
        usable_h * CELL_ASPECT / bounds.height()
    } else {
        f64::INFINITY
    };
    let scale = scale_x.min(scale_y);
    let scale = if scale.is_finite() { scale } else { 0.0 };

    let drawn_w = bounds.width() * scale;
    let drawn_h = bounds.height() * scale / CELL_ASPECT;
    let left = f64::from(inner.x + PAD_X) + (usable_w - drawn_w) / 2.0;
    let top = f64::from(inner.y + PAD_Y) + (usable_h - drawn_h) / 2.0;

    let max_x = inner.right().saturating_sub(1);
    let max_y = inner.bottom().saturating_sub(1);

    points
        .iter()
        .map(|p| {
            let x = (left + (p.x - bounds.min_x) * scale).round();
            let y = (top + (p.y - bounds.min_y) * scale / CELL_ASPECT).round();
            (
                (x.max(0.0) as u16).clamp(inner.x, max_x.max(inner.x)),
                (y.max(0.0) as u16).clamp(inner.y, max_y.max(inner.y)),
            )
        })
        .collect()
}

/// Text drawn for one item: flag, emoji and count badge.
#[must_use]
pub fn item_label(emoji: &str, visual: &VisualState) -> String {
    let flag = if visual.marked { "⚑" } else { "" };
    match visual.badge {
        Some(badge) => format!("{flag}{emoji}{badge}"),
        None => format!("{flag}{emoji}"),
    }
}

/// Board widget
pub struct BoardWidget;

impl BoardWidget {
    /// Render the current card of `run`
    pub fn render(
        f: &mut Frame,
        area: Rect,
        run: &LessonRun,
        items: &[Item],
        cursor: usize,
        theme: &Theme,
    ) {
        let card = run.card();
        let title = if card.is_count_out() {
            format!(" Count out {} {} ", card.count, card.subject)
        } else {
            format!(" {} {} ", card.count, card.subject)
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let points: Vec<Point> = items.iter().map(|item| item.position).collect();
        let cells = cell_positions(&points, inner);
        let session = run.session();

        for (item, (x, y)) in items.iter().zip(cells) {
            let visual = project_item(session, item);
            let label = item_label(&card.emoji, &visual);

            let mut style = if visual.counted {
                Style::default().fg(theme.counted).add_modifier(Modifier::DIM)
            } else {
                Style::default().fg(theme.text)
            };
            if visual.marked {
                style = style.fg(theme.flag);
            }
            if item.id == cursor && visual.tappable {
                style = style.bg(theme.accent).add_modifier(Modifier::BOLD);
            } else if item.id == cursor {
                style = style.bg(theme.highlight_bg);
            }

            // Center the two-cell emoji on the item's position
            let x = x.saturating_sub(1).max(inner.x);
            let width = inner.right().saturating_sub(x);
            f.buffer_mut()
                .set_stringn(x, y, &label, usize::from(width), style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Arrangement, LayoutParams};
    use crate::services::{layout_items, project};
    use crate::models::Phase;

    fn inner() -> Rect {
        Rect::new(1, 1, 60, 20)
    }

    #[test]
    fn test_line_cells_share_a_row() {
        let items = layout_items(4, &Arrangement::Line, &LayoutParams::default());
        let points: Vec<Point> = items.iter().map(|i| i.position).collect();
        let cells = cell_positions(&points, inner());

        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|&(_, y)| y == cells[0].1));
        assert!(cells.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_cells_stay_inside_area() {
        let area = inner();
        for arrangement in [
            Arrangement::Line,
            Arrangement::auto_grid(8),
            Arrangement::Circle { radius: 120.0 },
            Arrangement::grouped_five(8),
        ] {
            let items = layout_items(8, &arrangement, &LayoutParams::default());
            let points: Vec<Point> = items.iter().map(|i| i.position).collect();
            for (x, y) in cell_positions(&points, area) {
                assert!(x >= area.x && x < area.right(), "{arrangement}: x={x}");
                assert!(y >= area.y && y < area.bottom(), "{arrangement}: y={y}");
            }
        }
    }

    #[test]
    fn test_single_item_is_centered() {
        let cells = cell_positions(&[Point::new(10.0, 10.0)], inner());
        assert_eq!(cells, vec![(31, 11)]);
    }

    #[test]
    fn test_no_items_no_cells() {
        assert!(cell_positions(&[], inner()).is_empty());
    }

    #[test]
    fn test_neighbor_on_line() {
        let items = layout_items(3, &Arrangement::Line, &LayoutParams::default());
        assert_eq!(neighbor(&items, 0, Direction::Right), Some(1));
        assert_eq!(neighbor(&items, 1, Direction::Left), Some(0));
        assert_eq!(neighbor(&items, 2, Direction::Right), None);
        assert_eq!(neighbor(&items, 0, Direction::Up), None);
    }

    #[test]
    fn test_neighbor_in_grid_prefers_straight_down() {
        // 3 columns x 2 rows: 0 1 2 / 3 4 5
        let items = layout_items(
            6,
            &Arrangement::Grid { rows: 2, cols: 3 },
            &LayoutParams::default(),
        );
        assert_eq!(neighbor(&items, 1, Direction::Down), Some(4));
        assert_eq!(neighbor(&items, 5, Direction::Up), Some(2));
    }

    #[test]
    fn test_item_label() {
        let counted = project(Phase::Counting, Some(3), true);
        assert_eq!(item_label("🐟", &counted), "⚑🐟3");

        let fresh = project(Phase::Counting, None, false);
        assert_eq!(item_label("🐟", &fresh), "🐟");
    }
}
