//! Arrangement kinds and the canvas parameters used to lay them out.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of items a single card may hold.
pub const MAX_ITEMS: usize = 100;

/// Geometric pattern used to place countable items.
///
/// Arrangements are pure configuration: a session never changes its
/// arrangement, and positions are always recomputed from
/// `(arrangement, count, index)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Arrangement {
    /// One horizontal row, counted left to right
    Line,
    /// Rows and columns, counted left to right then top to bottom
    Grid {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },
    /// Items around a circle, item 0 at the top, ids increasing clockwise
    Circle {
        /// Circle radius in canvas units
        radius: f64,
    },
    /// An upper row of `top` items over a lower row holding the rest
    GroupedFive {
        /// Items in the upper row (usually 5)
        top: usize,
    },
}

impl Arrangement {
    /// Builds a grid sized for `count` items.
    ///
    /// Up to four items sit in one row; larger counts use two rows of
    /// `ceil(count / 2)` columns.
    #[must_use]
    pub fn auto_grid(count: usize) -> Self {
        let cols = if count <= 4 {
            count.max(1)
        } else {
            count.div_ceil(2)
        };
        let rows = count.div_ceil(cols).max(1);
        Self::Grid { rows, cols }
    }

    /// Builds the usual five-on-top grouping for `count` items.
    #[must_use]
    pub fn grouped_five(count: usize) -> Self {
        Self::GroupedFive { top: count.min(5) }
    }

    /// Returns true for circular arrangements, which need a marked start.
    #[must_use]
    pub const fn is_circular(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }

    /// Short lowercase kind name (`line`, `grid`, `circle`, `grouped`).
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Grid { .. } => "grid",
            Self::Circle { .. } => "circle",
            Self::GroupedFive { .. } => "grouped",
        }
    }

    /// Checks that this arrangement can hold `count` distinct items.
    pub fn validate(&self, count: usize) -> Result<()> {
        if count > MAX_ITEMS {
            anyhow::bail!("Cannot lay out {count} items, the limit is {MAX_ITEMS}");
        }
        match *self {
            Self::Line => {}
            Self::Grid { rows, cols } => {
                if rows == 0 || cols == 0 {
                    anyhow::bail!("Grid needs at least one row and one column, got {rows}x{cols}");
                }
                if rows.saturating_mul(cols) < count {
                    anyhow::bail!(
                        "Grid of {rows}x{cols} cannot hold {count} items ({} cells)",
                        rows * cols
                    );
                }
            }
            Self::Circle { radius } => {
                if !radius.is_finite() || radius <= 0.0 {
                    anyhow::bail!("Circle radius must be a positive number, got {radius}");
                }
            }
            Self::GroupedFive { top } => {
                if top > count {
                    anyhow::bail!("Upper row of {top} items is larger than the count {count}");
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Grid { rows, cols } => write!(f, "grid {rows}x{cols}"),
            Self::Circle { radius } => write!(f, "circle (radius {radius})"),
            Self::GroupedFive { top } => write!(f, "grouped ({top} on top)"),
        }
    }
}

/// Canvas origins and spacings for every arrangement kind.
///
/// Defaults fit a canvas of roughly 480x300.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// X of the first item in a line
    pub line_x0: f64,
    /// Y of every item in a line
    pub line_y: f64,
    /// Horizontal distance between line items
    pub line_spacing: f64,
    /// X of the first grid column
    pub grid_x0: f64,
    /// Y of the first grid row
    pub grid_y0: f64,
    /// Horizontal distance between grid columns
    pub grid_col_spacing: f64,
    /// Vertical distance between grid rows
    pub grid_row_spacing: f64,
    /// Circle center X
    pub circle_cx: f64,
    /// Circle center Y
    pub circle_cy: f64,
    /// Center X both grouped rows are centered on
    pub group_center_x: f64,
    /// Y of the upper grouped row
    pub group_top_y: f64,
    /// Y of the lower grouped row
    pub group_bottom_y: f64,
    /// Horizontal distance between items of a grouped row
    pub group_spacing: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            line_x0: 80.0,
            line_y: 150.0,
            line_spacing: 50.0,
            grid_x0: 130.0,
            grid_y0: 120.0,
            grid_col_spacing: 55.0,
            grid_row_spacing: 60.0,
            circle_cx: 240.0,
            circle_cy: 150.0,
            group_center_x: 200.0,
            group_top_y: 120.0,
            group_bottom_y: 180.0,
            group_spacing: 50.0,
        }
    }
}

impl LayoutParams {
    /// Checks that spacings are positive and every value is finite.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("line_x0", self.line_x0),
            ("line_y", self.line_y),
            ("grid_x0", self.grid_x0),
            ("grid_y0", self.grid_y0),
            ("circle_cx", self.circle_cx),
            ("circle_cy", self.circle_cy),
            ("group_center_x", self.group_center_x),
            ("group_top_y", self.group_top_y),
            ("group_bottom_y", self.group_bottom_y),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                anyhow::bail!("layout.{name} must be a finite number");
            }
        }

        let spacings = [
            ("line_spacing", self.line_spacing),
            ("grid_col_spacing", self.grid_col_spacing),
            ("grid_row_spacing", self.grid_row_spacing),
            ("group_spacing", self.group_spacing),
        ];
        for (name, value) in spacings {
            if !value.is_finite() || value <= 0.0 {
                anyhow::bail!("layout.{name} must be positive, got {value}");
            }
        }

        if (self.group_top_y - self.group_bottom_y).abs() < f64::EPSILON {
            anyhow::bail!("layout.group_top_y and layout.group_bottom_y must differ");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_grid_small_counts_single_row() {
        assert_eq!(Arrangement::auto_grid(3), Arrangement::Grid { rows: 1, cols: 3 });
        assert_eq!(Arrangement::auto_grid(4), Arrangement::Grid { rows: 1, cols: 4 });
    }

    #[test]
    fn test_auto_grid_two_rows() {
        assert_eq!(Arrangement::auto_grid(7), Arrangement::Grid { rows: 2, cols: 4 });
        assert_eq!(Arrangement::auto_grid(8), Arrangement::Grid { rows: 2, cols: 4 });
        assert_eq!(Arrangement::auto_grid(5), Arrangement::Grid { rows: 2, cols: 3 });
    }

    #[test]
    fn test_auto_grid_zero() {
        assert_eq!(Arrangement::auto_grid(0), Arrangement::Grid { rows: 1, cols: 1 });
    }

    #[test]
    fn test_validate_grid() {
        assert!(Arrangement::Grid { rows: 2, cols: 4 }.validate(8).is_ok());
        assert!(Arrangement::Grid { rows: 2, cols: 3 }.validate(8).is_err());
        assert!(Arrangement::Grid { rows: 0, cols: 3 }.validate(0).is_err());
    }

    #[test]
    fn test_validate_circle_radius() {
        assert!(Arrangement::Circle { radius: 110.0 }.validate(8).is_ok());
        assert!(Arrangement::Circle { radius: 0.0 }.validate(8).is_err());
        assert!(Arrangement::Circle { radius: f64::NAN }.validate(8).is_err());
    }

    #[test]
    fn test_validate_grouped_top() {
        assert!(Arrangement::GroupedFive { top: 5 }.validate(8).is_ok());
        assert!(Arrangement::GroupedFive { top: 5 }.validate(3).is_err());
        assert_eq!(Arrangement::grouped_five(3), Arrangement::GroupedFive { top: 3 });
    }

    #[test]
    fn test_validate_rejects_oversized_count() {
        assert!(Arrangement::Line.validate(MAX_ITEMS).is_ok());
        let err = Arrangement::Line.validate(MAX_ITEMS + 1).unwrap_err();
        assert!(err.to_string().contains("limit is 100"));
        assert!(Arrangement::Circle { radius: 110.0 }
            .validate(usize::MAX)
            .is_err());
    }

    #[test]
    fn test_serde_tagged_form() {
        let json = r#"{"kind":"circle","radius":110.0}"#;
        let parsed: Arrangement = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, Arrangement::Circle { radius: 110.0 });

        let grid = serde_json::to_value(Arrangement::Grid { rows: 3, cols: 2 }).unwrap();
        assert_eq!(grid["kind"], "grid");
        assert_eq!(grid["rows"], 3);

        let grouped: Arrangement = serde_json::from_str(r#"{"kind":"grouped_five","top":5}"#).unwrap();
        assert_eq!(grouped, Arrangement::GroupedFive { top: 5 });
    }

    #[test]
    fn test_layout_params_default_valid() {
        assert!(LayoutParams::default().validate().is_ok());
    }

    #[test]
    fn test_layout_params_rejects_zero_spacing() {
        let params = LayoutParams {
            line_spacing: 0.0,
            ..LayoutParams::default()
        };
        assert!(params.validate().is_err());
    }
}
