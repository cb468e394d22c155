//! Layout command: print item positions for an arrangement.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::{Arrangement, Bounds};
use crate::services::{circle_angle, layout_items};
use clap::{Args, ValueEnum};
use serde::Serialize;

/// Arrangement kind accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArrangementKind {
    /// One row, left to right
    Line,
    /// Rows and columns
    Grid,
    /// Around a circle, starting at the top
    Circle,
    /// Upper row of five (or --top), the rest below
    Grouped,
}

/// Compute item positions for an arrangement
#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Number of items
    #[arg(short, long)]
    pub count: usize,

    /// Arrangement kind
    #[arg(short, long, value_enum, default_value = "line")]
    pub arrangement: ArrangementKind,

    /// Grid rows (derived from the count if omitted)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Grid columns (derived from the count if omitted)
    #[arg(long)]
    pub cols: Option<usize>,

    /// Circle radius
    #[arg(long, default_value_t = 110.0)]
    pub radius: f64,

    /// Items in the upper row of a grouped arrangement (default: up to 5)
    #[arg(long)]
    pub top: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response for the layout command
#[derive(Debug, Serialize)]
struct LayoutResponse {
    count: usize,
    arrangement: Arrangement,
    items: Vec<PositionedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
}

#[derive(Debug, Serialize)]
struct PositionedItem {
    id: usize,
    x: f64,
    y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    angle: Option<f64>,
}

impl LayoutArgs {
    /// Resolves the command-line options into an arrangement.
    pub fn arrangement(&self) -> CliResult<Arrangement> {
        let arrangement = match self.arrangement {
            ArrangementKind::Line => Arrangement::Line,
            ArrangementKind::Grid => match (self.rows, self.cols) {
                (Some(rows), Some(cols)) => Arrangement::Grid { rows, cols },
                (None, Some(cols)) => Arrangement::Grid {
                    rows: self.count.div_ceil(cols.max(1)).max(1),
                    cols,
                },
                (Some(rows), None) => Arrangement::Grid {
                    rows,
                    cols: self.count.div_ceil(rows.max(1)).max(1),
                },
                (None, None) => Arrangement::auto_grid(self.count),
            },
            ArrangementKind::Circle => Arrangement::Circle {
                radius: self.radius,
            },
            ArrangementKind::Grouped => match self.top {
                Some(top) => Arrangement::GroupedFive { top },
                None => Arrangement::grouped_five(self.count),
            },
        };

        arrangement
            .validate(self.count)
            .map_err(|e| CliError::validation(format!("Invalid arrangement: {e}")))?;

        Ok(arrangement)
    }

    /// Execute the layout command
    pub fn execute(&self) -> CliResult<()> {
        let arrangement = self.arrangement()?;
        let config = Config::load().unwrap_or_default();

        let items = layout_items(self.count, &arrangement, &config.layout);
        let positions: Vec<_> = items.iter().map(|item| item.position).collect();

        let response = LayoutResponse {
            count: self.count,
            arrangement,
            bounds: Bounds::of(&positions),
            items: items
                .iter()
                .map(|item| PositionedItem {
                    id: item.id,
                    x: round2(item.position.x),
                    y: round2(item.position.y),
                    angle: arrangement
                        .is_circular()
                        .then(|| round2(circle_angle(item.id, self.count))),
                })
                .collect(),
        };

        if self.json {
            return print_json(&response);
        }

        println!("{} items, {}", response.count, response.arrangement);
        if response.items.is_empty() {
            println!("  (no items)");
            return Ok(());
        }
        println!();
        println!("  {:>3}  {:>8}  {:>8}", "id", "x", "y");
        for item in &response.items {
            match item.angle {
                Some(angle) => println!(
                    "  {:>3}  {:>8.2}  {:>8.2}  ({angle:.1}°)",
                    item.id, item.x, item.y
                ),
                None => println!("  {:>3}  {:>8.2}  {:>8.2}", item.id, item.x, item.y),
            }
        }

        Ok(())
    }
}

/// Rounds to two decimals so output is stable across platforms.
fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid printing "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(kind: ArrangementKind, count: usize) -> LayoutArgs {
        LayoutArgs {
            count,
            arrangement: kind,
            rows: None,
            cols: None,
            radius: 110.0,
            top: None,
            json: true,
        }
    }

    #[test]
    fn test_grid_from_cols_only() {
        let mut a = args(ArrangementKind::Grid, 8);
        a.cols = Some(2);
        assert_eq!(a.arrangement().unwrap(), Arrangement::Grid { rows: 4, cols: 2 });
    }

    #[test]
    fn test_grid_too_small_is_validation_error() {
        let mut a = args(ArrangementKind::Grid, 8);
        a.rows = Some(2);
        a.cols = Some(2);
        let err = a.arrangement().unwrap_err();
        assert_eq!(err.exit_code.code(), 1);
    }

    #[test]
    fn test_grouped_default_top() {
        let a = args(ArrangementKind::Grouped, 3);
        assert_eq!(a.arrangement().unwrap(), Arrangement::GroupedFive { top: 3 });
    }

    #[test]
    fn test_round2_negative_zero() {
        assert!(round2(-0.000_01).is_sign_positive());
        assert!((round2(1.23456) - 1.23).abs() < f64::EPSILON);
    }
}
