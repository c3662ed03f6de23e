//! Keyboard controls for the player.
//!
//! Maps key events to player commands. Terminals deliver no key-release
//! events, so a scrub "gesture" is every scrub key press until the user
//! resumes playback; the app brackets the driver accordingly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key bindings for the player controls.
#[derive(Debug, Clone, Copy)]
pub struct KeyBindings {
    /// Pause/resume playback (also replays a finished deck)
    pub toggle_play: KeyCode,
    /// Scrub a few frames back
    pub scrub_back: KeyCode,
    /// Scrub a few frames forward
    pub scrub_forward: KeyCode,
    /// Scrub one full step back
    pub step_back: KeyCode,
    /// Scrub one full step forward
    pub step_forward: KeyCode,
    /// Jump to the first frame
    pub jump_start: KeyCode,
    /// Jump to the last frame
    pub jump_end: KeyCode,
    /// Quit the player
    pub quit: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            toggle_play: KeyCode::Char(' '),
            scrub_back: KeyCode::Left,
            scrub_forward: KeyCode::Right,
            step_back: KeyCode::PageUp,
            step_forward: KeyCode::PageDown,
            jump_start: KeyCode::Home,
            jump_end: KeyCode::End,
            quit: KeyCode::Char('q'),
        }
    }
}

/// A player control decoded from a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Pause or resume playback.
    TogglePlay,
    /// Move the position by a signed number of frames.
    ScrubFrames(i64),
    /// Move the position by a signed number of steps.
    ScrubSteps(i64),
    /// Jump to the first frame.
    JumpStart,
    /// Jump to the last frame.
    JumpEnd,
    /// Quit the player.
    Quit,
}

impl KeyBindings {
    /// Decode a key event into a command, if it matches a binding.
    ///
    /// Esc and Ctrl+C always quit regardless of the bindings.
    pub fn decode(&self, key: &KeyEvent) -> Option<PlayerCommand> {
        if key.code == KeyCode::Esc {
            return Some(PlayerCommand::Quit);
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(PlayerCommand::Quit);
        }

        let code = key.code;
        if code == self.quit {
            Some(PlayerCommand::Quit)
        } else if code == self.toggle_play {
            Some(PlayerCommand::TogglePlay)
        } else if code == self.scrub_back {
            Some(PlayerCommand::ScrubFrames(-SCRUB_FRAMES))
        } else if code == self.scrub_forward {
            Some(PlayerCommand::ScrubFrames(SCRUB_FRAMES))
        } else if code == self.step_back {
            Some(PlayerCommand::ScrubSteps(-1))
        } else if code == self.step_forward {
            Some(PlayerCommand::ScrubSteps(1))
        } else if code == self.jump_start {
            Some(PlayerCommand::JumpStart)
        } else if code == self.jump_end {
            Some(PlayerCommand::JumpEnd)
        } else {
            None
        }
    }
}

/// Frames moved per fine-scrub key press.
const SCRUB_FRAMES: i64 = 9;
