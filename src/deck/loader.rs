//! Deck loading from TOML files.
//!
//! Decks are plain TOML documents deserialized through the `config` crate,
//! so scalar fields can be overridden with `SCROLLY__`-prefixed environment
//! variables (double underscore separating nested keys), e.g.
//! `SCROLLY__TITLE="Workshop edition"`.

use std::path::Path;

use config::{Config, Environment, File};

use super::{Deck, DeckError};

/// Load and validate a deck from a TOML file.
///
/// # Errors
///
/// Returns an error if:
/// - The deck file does not exist or its path is invalid
/// - The deck file cannot be parsed
/// - The deck fails validation (see [`Deck::validate`])
pub fn load<P: AsRef<Path>>(path: P) -> Result<Deck, DeckError> {
    let path = path.as_ref();

    let path_str = path
        .to_str()
        .ok_or_else(|| DeckError::InvalidPath(format!("{:?}", path)))?;

    if !path.exists() {
        return Err(DeckError::FileNotFound(path_str.to_string()));
    }

    let config = Config::builder()
        .add_source(File::with_name(path_str))
        .add_source(
            Environment::with_prefix("SCROLLY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let deck: Deck = config.try_deserialize()?;
    deck.validate()?;

    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
title = "Two lines"
source = """
let a = 1;
let b = 2;
"""

[[steps]]
caption = "declare a"
start = 1
end = 1

[[steps.markers]]
id = "a"
x = 0.25
y = 0.5

[[steps]]
start = 2
end = 2

[[steps.markers]]
id = "a"
x = 0.75
y = 0.5
"#;

    fn write_deck(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("create temp deck");
        file.write_all(contents.as_bytes()).expect("write deck");
        file
    }

    #[test]
    fn test_load_valid_deck() {
        let file = write_deck(SAMPLE);
        let deck = load(file.path()).expect("deck should load");
        assert_eq!(deck.title, "Two lines");
        assert_eq!(deck.step_count(), 2);
        assert_eq!(deck.steps[0].caption.as_deref(), Some("declare a"));
        assert_eq!(deck.steps[1].caption, None);
        assert_eq!(deck.steps[0].markers[0].id, "a");
    }

    #[test]
    fn test_load_missing_file() {
        let result = load("no/such/deck.toml");
        assert!(matches!(result, Err(DeckError::FileNotFound(_))));
    }

    #[test]
    fn test_load_unparseable_deck() {
        let file = write_deck("title = ");
        assert!(matches!(load(file.path()), Err(DeckError::Parse(_))));
    }

    #[test]
    fn test_load_invalid_deck() {
        let file = write_deck(
            r#"
title = "Broken"
source = "only one line"

[[steps]]
start = 1
end = 5
"#,
        );
        assert!(matches!(
            load(file.path()),
            Err(DeckError::BadLineRange { step: 1, .. })
        ));
    }

    #[test]
    fn test_load_empty_steps() {
        let file = write_deck("title = \"t\"\nsource = \"x\"\n");
        assert!(matches!(load(file.path()), Err(DeckError::NoSteps)));
    }

    #[test]
    fn test_environment_override() {
        let file = write_deck(SAMPLE);
        std::env::set_var("SCROLLY__TITLE", "Overridden");
        let deck = load(file.path());
        std::env::remove_var("SCROLLY__TITLE");
        assert_eq!(deck.expect("deck should load").title, "Overridden");
    }
}
