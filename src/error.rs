//! Crate-level error type.
//!
//! The player core itself surfaces no errors (misuse there is a programming
//! error, guarded by debug assertions); everything that can actually fail at
//! runtime is deck loading and terminal I/O.

use thiserror::Error;

use crate::deck::DeckError;

/// Errors surfaced by the scrolly binary.
#[derive(Debug, Error)]
pub enum ScrollyError {
    /// Deck loading or validation failed.
    #[error(transparent)]
    Deck(#[from] DeckError),

    /// Terminal setup, drawing, or teardown failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// A timing override from the command line is unusable.
    #[error("invalid timing: {0}")]
    Timing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_error_passes_through() {
        let err = ScrollyError::from(DeckError::NoSteps);
        assert_eq!(err.to_string(), "deck has no steps");
    }

    #[test]
    fn test_timing_error_display() {
        let err = ScrollyError::Timing("fps must be at least 1".to_string());
        assert_eq!(err.to_string(), "invalid timing: fps must be at least 1");
    }
}
