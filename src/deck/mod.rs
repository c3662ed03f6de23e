//! Tutorial decks: the step sequence the player walks through.
//!
//! A deck pairs a source listing with an ordered sequence of steps. Each
//! step highlights an inclusive 1-based line range of the listing and
//! carries one illustration keyframe: a set of labeled markers in the unit
//! square. The player interpolates markers between adjacent steps.

pub mod loader;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::Timing;

pub use loader::load;

/// A complete tutorial deck.
#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    /// Deck title, shown in the header.
    pub title: String,
    /// The source listing the steps highlight.
    pub source: String,
    /// Ordered step sequence.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One step of the tutorial.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Short caption shown above the panes.
    #[serde(default)]
    pub caption: Option<String>,
    /// First highlighted source line, 1-based inclusive.
    pub start: usize,
    /// Last highlighted source line, 1-based inclusive.
    pub end: usize,
    /// Illustration keyframe for this step.
    #[serde(default)]
    pub markers: Vec<Marker>,
}

/// A labeled point of the illustration, positioned in the unit square.
#[derive(Debug, Clone, Deserialize)]
pub struct Marker {
    /// Stable identity used to match markers across steps.
    pub id: String,
    /// Display label; falls back to the id when absent.
    #[serde(default)]
    pub label: Option<String>,
    /// Horizontal position in `[0, 1]`, 0 at the left edge.
    pub x: f64,
    /// Vertical position in `[0, 1]`, 0 at the top edge.
    pub y: f64,
}

impl Marker {
    /// The text drawn for this marker.
    pub fn text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Errors raised while loading or validating a deck.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The deck file was not found.
    #[error("deck file not found: {0}")]
    FileNotFound(String),

    /// The deck file path is invalid.
    #[error("invalid deck path: {0}")]
    InvalidPath(String),

    /// The deck file could not be parsed.
    #[error("failed to parse deck: {0}")]
    Parse(#[from] config::ConfigError),

    /// The deck has no steps.
    #[error("deck has no steps")]
    NoSteps,

    /// A step's line range does not fit the source listing.
    #[error("step {step}: line range {start}..={end} does not fit the {lines}-line source")]
    BadLineRange {
        step: usize,
        start: usize,
        end: usize,
        lines: usize,
    },

    /// A marker lies outside the unit square.
    #[error("step {step}: marker '{id}' lies outside the unit square")]
    MarkerOutOfBounds { step: usize, id: String },

    /// Two markers in one step share an id.
    #[error("step {step}: duplicate marker id '{id}'")]
    DuplicateMarker { step: usize, id: String },
}

impl Deck {
    /// Number of steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Number of lines in the source listing.
    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }

    /// The source listing as individual lines.
    pub fn source_lines(&self) -> Vec<&str> {
        self.source.lines().collect()
    }

    /// Check the deck against the player's structural requirements.
    ///
    /// Steps are numbered from 1 in diagnostics, matching how authors count
    /// `[[steps]]` tables in the TOML file.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.steps.is_empty() {
            return Err(DeckError::NoSteps);
        }

        let lines = self.line_count();
        for (i, step) in self.steps.iter().enumerate() {
            let step_no = i + 1;
            if step.start == 0 || step.start > step.end || step.end > lines {
                return Err(DeckError::BadLineRange {
                    step: step_no,
                    start: step.start,
                    end: step.end,
                    lines,
                });
            }

            let mut seen = Vec::with_capacity(step.markers.len());
            for marker in &step.markers {
                if !(0.0..=1.0).contains(&marker.x) || !(0.0..=1.0).contains(&marker.y) {
                    return Err(DeckError::MarkerOutOfBounds {
                        step: step_no,
                        id: marker.id.clone(),
                    });
                }
                if seen.contains(&marker.id.as_str()) {
                    return Err(DeckError::DuplicateMarker {
                        step: step_no,
                        id: marker.id.clone(),
                    });
                }
                seen.push(&marker.id);
            }
        }

        Ok(())
    }

    /// Summarize the deck for `scrolly check`.
    pub fn summary(&self, timing: &Timing) -> DeckSummary {
        DeckSummary {
            title: self.title.clone(),
            steps: self.step_count(),
            source_lines: self.line_count(),
            frames: timing.max_pos(self.step_count().max(1)),
            duration_secs: timing.total_duration(self.step_count().max(1)).as_secs_f64(),
        }
    }
}

/// Flat description of a deck, printed by `scrolly check`.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSummary {
    /// Deck title.
    pub title: String,
    /// Number of steps.
    pub steps: usize,
    /// Lines in the source listing.
    pub source_lines: usize,
    /// Total frame positions at the configured timing.
    pub frames: u64,
    /// Playthrough length in seconds at the configured timing.
    pub duration_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deck() -> Deck {
        Deck {
            title: "Sample".to_string(),
            source: "line one\nline two\nline three\n".to_string(),
            steps: vec![
                Step {
                    caption: Some("first".to_string()),
                    start: 1,
                    end: 2,
                    markers: vec![Marker {
                        id: "a".to_string(),
                        label: None,
                        x: 0.1,
                        y: 0.2,
                    }],
                },
                Step {
                    caption: None,
                    start: 3,
                    end: 3,
                    markers: vec![Marker {
                        id: "a".to_string(),
                        label: Some("A".to_string()),
                        x: 0.9,
                        y: 0.2,
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_valid_deck_passes() {
        assert!(sample_deck().validate().is_ok());
    }

    #[test]
    fn test_line_count() {
        assert_eq!(sample_deck().line_count(), 3);
    }

    #[test]
    fn test_empty_steps_rejected() {
        let mut deck = sample_deck();
        deck.steps.clear();
        assert!(matches!(deck.validate(), Err(DeckError::NoSteps)));
    }

    #[test]
    fn test_zero_start_line_rejected() {
        let mut deck = sample_deck();
        deck.steps[0].start = 0;
        assert!(matches!(
            deck.validate(),
            Err(DeckError::BadLineRange { step: 1, .. })
        ));
    }

    #[test]
    fn test_start_after_end_rejected() {
        let mut deck = sample_deck();
        deck.steps[1].start = 3;
        deck.steps[1].end = 2;
        assert!(matches!(
            deck.validate(),
            Err(DeckError::BadLineRange { step: 2, .. })
        ));
    }

    #[test]
    fn test_range_past_source_rejected() {
        let mut deck = sample_deck();
        deck.steps[1].end = 99;
        assert!(matches!(
            deck.validate(),
            Err(DeckError::BadLineRange { step: 2, end: 99, .. })
        ));
    }

    #[test]
    fn test_marker_out_of_bounds_rejected() {
        let mut deck = sample_deck();
        deck.steps[0].markers[0].x = 1.5;
        assert!(matches!(
            deck.validate(),
            Err(DeckError::MarkerOutOfBounds { step: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_marker_id_rejected() {
        let mut deck = sample_deck();
        let dup = deck.steps[0].markers[0].clone();
        deck.steps[0].markers.push(dup);
        assert!(matches!(
            deck.validate(),
            Err(DeckError::DuplicateMarker { step: 1, .. })
        ));
    }

    #[test]
    fn test_marker_text_falls_back_to_id() {
        let deck = sample_deck();
        assert_eq!(deck.steps[0].markers[0].text(), "a");
        assert_eq!(deck.steps[1].markers[0].text(), "A");
    }

    #[test]
    fn test_summary() {
        let summary = sample_deck().summary(&Timing::default());
        assert_eq!(summary.steps, 2);
        assert_eq!(summary.source_lines, 3);
        assert_eq!(summary.frames, 120);
        assert!((summary.duration_secs - 2.0).abs() < 1e-9);
    }
}
