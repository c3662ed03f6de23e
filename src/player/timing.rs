//! Frame timing model for the player.
//!
//! Maps a frame position onto the step sequence: which step is active, which
//! step is being left behind, and how far the transition between the two has
//! progressed. Each step occupies one "slot" of frames (a transition followed
//! by a delay), and progress pins at 1.0 for the delay portion, so scrubbing
//! reads as discrete steps with smooth interpolation between them.

use std::time::Duration;

/// Default frame rate targeted by the driver.
pub const DEFAULT_FPS: u32 = 60;
/// Default seconds a step rests after its transition completes.
pub const DEFAULT_DELAY_SECS: f64 = 1.0;
/// Default seconds a transition between two steps animates.
pub const DEFAULT_TRANSITION_SECS: f64 = 0.5;

/// Frame timing configuration, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Frames per second the driver targets.
    pub fps: u32,
    /// Seconds a step holds after its transition completes.
    pub delay_secs: f64,
    /// Seconds a transition between two steps animates.
    pub transition_secs: f64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            delay_secs: DEFAULT_DELAY_SECS,
            transition_secs: DEFAULT_TRANSITION_SECS,
        }
    }
}

impl Timing {
    /// Create a timing configuration.
    pub fn new(fps: u32, delay_secs: f64, transition_secs: f64) -> Self {
        Self {
            fps,
            delay_secs,
            transition_secs,
        }
    }

    /// Check that the configuration is usable.
    ///
    /// Returns a description of the first problem found, if any. Called on
    /// CLI-supplied overrides before the player starts.
    pub fn validate(&self) -> Result<(), String> {
        if self.fps == 0 {
            return Err("fps must be at least 1".to_string());
        }
        if !self.delay_secs.is_finite() || self.delay_secs < 0.0 {
            return Err("delay must be a non-negative number of seconds".to_string());
        }
        if !self.transition_secs.is_finite() || self.transition_secs <= 0.0 {
            return Err("transition must be a positive number of seconds".to_string());
        }
        if self.frames_per_transition() == 0 {
            return Err("transition is shorter than one frame at this frame rate".to_string());
        }
        Ok(())
    }

    /// Wall-clock duration of a single frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    /// Number of frames a transition animates over.
    pub fn frames_per_transition(&self) -> u64 {
        (self.fps as f64 * self.transition_secs).round() as u64
    }

    /// Number of frames a step holds after its transition.
    pub fn frames_per_delay(&self) -> u64 {
        (self.fps as f64 * self.delay_secs).round() as u64
    }

    /// Total frames in one step slot: transition plus delay.
    pub fn frames_per_pos(&self) -> u64 {
        self.frames_per_transition() + self.frames_per_delay()
    }

    /// Total number of frame positions for a deck of `step_count` steps.
    ///
    /// Every step gets a transition; every step but the last gets a trailing
    /// delay. `step_count` must be at least 1.
    pub fn max_pos(&self, step_count: usize) -> u64 {
        debug_assert!(step_count >= 1, "max_pos requires at least one step");
        let steps = step_count as u64;
        steps * self.frames_per_transition() + (steps - 1) * self.frames_per_delay()
    }

    /// Resolve a frame position into the active step and transition progress.
    ///
    /// `pos` is expected in `[0, max_pos(step_count)]`; `step_count` must be
    /// at least 1.
    pub fn resolve(&self, pos: u64, step_count: usize) -> StepCursor {
        debug_assert!(step_count >= 1, "resolve requires at least one step");
        let per_pos = self.frames_per_pos().max(1);
        let index = ((pos / per_pos) as usize).min(step_count - 1);
        let offset = pos - index as u64 * per_pos;
        let transition = self.frames_per_transition();
        // The last step has no trailing delay to pin its progress, so the
        // terminal frame counts as the completed transition.
        let progress = if transition == 0 || pos >= self.max_pos(step_count).saturating_sub(1) {
            1.0
        } else {
            (offset as f64 / transition as f64).min(1.0)
        };

        StepCursor {
            index,
            prev: index.checked_sub(1),
            progress,
        }
    }

    /// Wall-clock length of a full playthrough for `step_count` steps.
    pub fn total_duration(&self, step_count: usize) -> Duration {
        Duration::from_secs_f64(self.max_pos(step_count) as f64 / self.fps.max(1) as f64)
    }
}

/// The derived view of a frame position: active step, the step being left,
/// and how far the transition into the active step has completed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCursor {
    /// Index of the active step.
    pub index: usize,
    /// Index of the previous step, absent at the start of the deck.
    pub prev: Option<usize>,
    /// Transition completion in `[0, 1]`; pinned at 1 while the step holds.
    pub progress: f64,
}

impl StepCursor {
    /// Whether the transition has finished and the step is holding.
    pub fn is_holding(&self) -> bool {
        self.progress >= 1.0
    }
}
