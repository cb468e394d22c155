//! Theme system for consistent UI colors across dark and light modes.
//!
//! The OS theme (dark/light mode) is detected when the configured mode is
//! `auto`; otherwise the configured palette is used.

use ratatui::style::Color;

use crate::config::ThemeMode;

/// Semantic color theme for the lesson player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Borders and titles
    pub primary: Color,
    /// Cursor and selected numeral
    pub accent: Color,
    /// Correct answers and completed cards
    pub success: Color,
    /// Rejected taps and wrong numerals
    pub error: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Help text and dim content
    pub text_muted: Color,

    // Board
    /// Items that have already been counted
    pub counted: Color,
    /// The start flag on a circle
    pub flag: Color,
    /// Count badges next to counted items
    pub badge: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Selection background color
    pub highlight_bg: Color,
}

impl Theme {
    /// Detects the OS theme and returns the matching palette.
    ///
    /// Uses the `dark-light` crate; anything other than an explicit light
    /// mode (including detection errors) gives the dark palette.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Palette for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,

            text: Color::White,
            text_muted: Color::DarkGray,

            counted: Color::Gray,
            flag: Color::LightRed,
            badge: Color::LightGreen,

            background: Color::Black,
            highlight_bg: Color::DarkGray,
        }
    }

    /// Palette for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            success: Color::Rgb(0, 128, 0),
            error: Color::Red,

            text: Color::Black,
            text_muted: Color::Gray,

            counted: Color::Rgb(150, 150, 150),
            flag: Color::Rgb(200, 0, 0),
            badge: Color::Rgb(0, 110, 0),

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),
        }
    }

    /// Resolves the configured theme mode; `Auto` follows the OS.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
