//! Plain renderer for pipes and dumb terminals.
//!
//! Walks the deck once, printing each step's caption, highlighted source
//! lines, and marker positions. No animation, no cursor control; safe to
//! redirect to a file.

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::deck::Deck;

use super::Theme;

/// Render the whole deck as plain text.
pub fn render_deck(deck: &Deck, theme: &Theme, colors: bool) -> String {
    let mut out = String::new();
    let lines = deck.source_lines();
    let total = deck.step_count();
    let gutter_width = digits(lines.len());

    let _ = writeln!(out, "{}", style(&deck.title, theme.accent, colors));
    let _ = writeln!(
        out,
        "{}",
        style(&"═".repeat(deck.title.chars().count()), theme.accent, colors)
    );

    for (i, step) in deck.steps.iter().enumerate() {
        let header = match &step.caption {
            Some(caption) => format!("[{}/{}] {}", i + 1, total, caption),
            None => format!("[{}/{}]", i + 1, total),
        };
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style(&header, theme.caption, colors));

        for line_no in step.start..=step.end {
            let text = lines.get(line_no - 1).copied().unwrap_or_default();
            let gutter = format!("{:>width$} │ ", line_no, width = gutter_width);
            let _ = writeln!(
                out,
                "{}{}",
                style(&gutter, theme.muted, colors),
                style(text, theme.highlight, colors)
            );
        }

        for marker in &step.markers {
            let note = format!("◦ {} @ ({:.2}, {:.2})", marker.text(), marker.x, marker.y);
            let _ = writeln!(out, "{}", style(&note, theme.marker, colors));
        }
    }

    out
}

/// Print the deck to stdout.
pub fn print_deck(deck: &Deck, theme: &Theme, colors: bool) {
    print!("{}", render_deck(deck, theme, colors));
}

fn style(text: &str, color: owo_colors::Rgb, colors: bool) -> String {
    if colors {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

fn digits(n: usize) -> usize {
    n.max(1).to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Marker, Step};

    fn deck() -> Deck {
        Deck {
            title: "Demo".to_string(),
            source: "fn main() {\n    println!(\"hi\");\n}\n".to_string(),
            steps: vec![
                Step {
                    caption: Some("entry point".to_string()),
                    start: 1,
                    end: 1,
                    markers: vec![Marker {
                        id: "main".to_string(),
                        label: None,
                        x: 0.5,
                        y: 0.5,
                    }],
                },
                Step {
                    caption: None,
                    start: 2,
                    end: 3,
                    markers: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_render_contains_captions_and_lines() {
        let out = render_deck(&deck(), &Theme::default(), false);
        assert!(out.contains("Demo"));
        assert!(out.contains("[1/2] entry point"));
        assert!(out.contains("[2/2]"));
        assert!(out.contains("1 │ fn main() {"));
        assert!(out.contains("3 │ }"));
        assert!(out.contains("◦ main @ (0.50, 0.50)"));
    }

    #[test]
    fn test_render_without_colors_has_no_escapes() {
        let out = render_deck(&deck(), &Theme::default(), false);
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_render_with_colors_has_escapes() {
        let out = render_deck(&deck(), &Theme::default(), true);
        assert!(out.contains('\x1b'));
    }
}
