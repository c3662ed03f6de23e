//! scrolly - scrubber-driven scrollytelling player for the terminal.
//!
//! Plays tutorial decks: an illustration pane and a source listing move in
//! lockstep with a frame position that advances on its own and can be
//! scrubbed. The position model and animation driver live in [`player`];
//! decks in [`deck`]; the terminal front end in [`ui`].

pub mod deck;
pub mod error;
pub mod logging;
pub mod player;
pub mod ui;

pub use error::ScrollyError;
