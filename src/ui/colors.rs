//! 24-bit RGB color theme for terminal output.
//!
//! One palette shared by the TUI widgets and the plain renderer.

use owo_colors::Rgb;

/// Color theme for scrolly's terminal output.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Deck title and chrome - cyan (34, 211, 238)
    pub accent: Rgb,
    /// Step captions - white (229, 231, 235)
    pub caption: Rgb,
    /// Highlighted source lines - green (34, 197, 94)
    pub highlight: Rgb,
    /// Gutter and inactive source lines - gray (107, 114, 128)
    pub muted: Rgb,
    /// Illustration markers - yellow (234, 179, 8)
    pub marker: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Rgb(34, 211, 238),
            caption: Rgb(229, 231, 235),
            highlight: Rgb(34, 197, 94),
            muted: Rgb(107, 114, 128),
            marker: Rgb(234, 179, 8),
        }
    }
}

impl Theme {
    /// Create a theme with default colors.
    pub fn new() -> Self {
        Self::default()
    }
}
