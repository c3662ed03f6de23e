//! Terminal UI for the player.
//!
//! The full TUI lives in [`tui`]; [`plain`] is the fallback for pipes and
//! dumb terminals, printing the deck step by step without animation.

mod colors;
pub mod keyboard;
pub mod plain;
pub mod tui;

pub use colors::Theme;
pub use keyboard::{KeyBindings, PlayerCommand};

use crossterm::tty::IsTty;

/// How the terminal UI should be selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    /// Use the TUI when stdout is a terminal.
    #[default]
    Auto,
    /// Force the TUI.
    Enabled,
    /// Force the plain renderer.
    Disabled,
}

/// Display options resolved from the command line and environment.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    /// UI selection mode.
    pub mode: UiMode,
    /// Whether color output is enabled.
    pub colors: bool,
    /// Start with playback suspended.
    pub start_paused: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            mode: UiMode::Auto,
            colors: detect_color_support(),
            start_paused: false,
        }
    }
}

impl DisplayOptions {
    /// Whether the full TUI should run.
    pub fn use_tui(&self) -> bool {
        match self.mode {
            UiMode::Enabled => true,
            UiMode::Disabled => false,
            UiMode::Auto => std::io::stdout().is_tty(),
        }
    }
}

/// Detect if color output should be enabled.
///
/// Respects the NO_COLOR environment variable.
pub fn detect_color_support() -> bool {
    std::env::var("NO_COLOR").is_err()
}
