//! Ratatui-based player UI.
//!
//! [`app`] owns the event loop and state machine; [`widgets`] renders the
//! illustration pane, the source pane, and the scrubber.

pub mod app;
pub mod widgets;

pub use app::{run, AppState, PlayerApp, TickScheduler};
pub use widgets::{IllustrationWidget, ScrubberWidget, SourceViewWidget};

use ratatui::style::Color;

pub(crate) const ACCENT: Color = Color::Rgb(34, 211, 238);
pub(crate) const CAPTION: Color = Color::Rgb(229, 231, 235);
pub(crate) const MUTED: Color = Color::Rgb(107, 114, 128);
