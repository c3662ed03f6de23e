//! Ratatui widgets for the player panes.
//!
//! Three visual components:
//! - Illustration pane interpolating markers between two step keyframes
//! - Source pane with the active line range highlighted
//! - Scrubber showing the frame position like a range input
//!
//! Every widget also renders to a plain string, which is what the geometry
//! tests exercise.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::deck::Step;

// ============================================================================
// Color Constants
// ============================================================================

mod colors {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(34, 211, 238);
    pub const GREEN: Color = Color::Rgb(34, 197, 94);
    pub const YELLOW: Color = Color::Rgb(234, 179, 8);
    pub const BLUE: Color = Color::Rgb(59, 130, 246);
    pub const GRAY: Color = Color::Rgb(107, 114, 128);
    pub const MUTED: Color = Color::Rgb(75, 85, 99);
}

// ============================================================================
// Interpolation helpers
// ============================================================================

/// Quadratic ease-in-out over `[0, 1]`.
fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Linear interpolation between two values.
fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

// ============================================================================
// Illustration Widget
// ============================================================================

/// How a marker participates in the current transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerPhase {
    /// Present in both keyframes; moves along the interpolated path.
    Moving,
    /// New in the incoming step; fades in over the first half.
    Entering,
    /// Only in the outgoing step; fades out over the first half.
    Exiting,
}

/// A marker resolved to a cell position within the pane.
#[derive(Debug, Clone, PartialEq)]
struct Placement {
    col: u16,
    row: u16,
    text: String,
    phase: MarkerPhase,
}

/// Illustration pane: interpolates the previous and current step's markers
/// by transition progress.
#[derive(Debug, Clone)]
pub struct IllustrationWidget<'a> {
    prev: Option<&'a Step>,
    next: &'a Step,
    progress: f64,
}

impl<'a> IllustrationWidget<'a> {
    /// Create an illustration pane for one resolved frame.
    pub fn new(prev: Option<&'a Step>, next: &'a Step, progress: f64) -> Self {
        Self {
            prev,
            next,
            progress: progress.clamp(0.0, 1.0),
        }
    }

    fn placements(&self, width: u16, height: u16) -> Vec<Placement> {
        if width == 0 || height == 0 {
            return Vec::new();
        }
        let eased = ease_in_out(self.progress);
        let mut placements = Vec::new();

        for marker in &self.next.markers {
            let from = self
                .prev
                .and_then(|p| p.markers.iter().find(|m| m.id == marker.id));
            let (x, y, phase) = match from {
                Some(from) => (
                    lerp(from.x, marker.x, eased),
                    lerp(from.y, marker.y, eased),
                    MarkerPhase::Moving,
                ),
                None => (marker.x, marker.y, MarkerPhase::Entering),
            };
            placements.push(Self::place(x, y, marker.text(), phase, width, height));
        }

        // Markers leaving the scene stay visible for the first half of the
        // transition.
        if let Some(prev) = self.prev {
            if self.progress < 0.5 {
                for marker in &prev.markers {
                    if self.next.markers.iter().all(|m| m.id != marker.id) {
                        placements.push(Self::place(
                            marker.x,
                            marker.y,
                            marker.text(),
                            MarkerPhase::Exiting,
                            width,
                            height,
                        ));
                    }
                }
            }
        }

        placements
    }

    fn place(
        x: f64,
        y: f64,
        text: &str,
        phase: MarkerPhase,
        width: u16,
        height: u16,
    ) -> Placement {
        let text_len = text.chars().count() as u16;
        let span = width.saturating_sub(text_len).max(1) - 1;
        let col = (x.clamp(0.0, 1.0) * span as f64).round() as u16;
        let row = (y.clamp(0.0, 1.0) * height.saturating_sub(1) as f64).round() as u16;
        Placement {
            col,
            row,
            text: text.to_string(),
            phase,
        }
    }

    fn phase_style(&self, phase: MarkerPhase) -> Style {
        match phase {
            MarkerPhase::Moving => Style::default()
                .fg(colors::YELLOW)
                .add_modifier(Modifier::BOLD),
            MarkerPhase::Entering if self.progress < 0.5 => {
                Style::default().fg(colors::MUTED).add_modifier(Modifier::DIM)
            }
            MarkerPhase::Entering => Style::default()
                .fg(colors::YELLOW)
                .add_modifier(Modifier::BOLD),
            MarkerPhase::Exiting => Style::default().fg(colors::MUTED).add_modifier(Modifier::DIM),
        }
    }

    /// Render as plain text lines, for tests and diagnostics.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let mut grid = vec![vec![' '; width as usize]; height as usize];
        for placement in self.placements(width, height) {
            let row = placement.row as usize;
            for (i, ch) in placement.text.chars().enumerate() {
                let col = placement.col as usize + i;
                if row < grid.len() && col < width as usize {
                    grid[row][col] = ch;
                }
            }
        }
        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Widget for IllustrationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for placement in self.placements(area.width, area.height) {
            let style = self.phase_style(placement.phase);
            if placement.row < area.height {
                buf.set_stringn(
                    area.x + placement.col.min(area.width - 1),
                    area.y + placement.row,
                    &placement.text,
                    (area.width - placement.col.min(area.width - 1)) as usize,
                    style,
                );
            }
        }
    }
}

// ============================================================================
// Source View Widget
// ============================================================================

/// Source pane: the deck's listing with the active range highlighted and the
/// viewport scrolled to keep it visible.
#[derive(Debug, Clone)]
pub struct SourceViewWidget<'a> {
    lines: Vec<&'a str>,
    start: usize,
    end: usize,
}

impl<'a> SourceViewWidget<'a> {
    /// Create a source pane highlighting the 1-based inclusive range
    /// `start..=end`.
    pub fn new(source: &'a str, start: usize, end: usize) -> Self {
        Self {
            lines: source.lines().collect(),
            start,
            end,
        }
    }

    /// First visible 1-based line for a viewport of `height` rows.
    ///
    /// Centers the highlighted range; a range taller than the viewport is
    /// pinned to its first line.
    pub fn first_visible(&self, height: usize) -> usize {
        let lines = self.lines.len();
        if height == 0 || lines <= height {
            return 1;
        }

        let span = self.end.saturating_sub(self.start) + 1;
        let first = if span >= height {
            self.start
        } else {
            let center = (self.start + self.end) / 2;
            let ideal = center.saturating_sub(height / 2).max(1);
            let lo = self.end.saturating_sub(height - 1).max(1);
            ideal.clamp(lo, self.start)
        };
        first.clamp(1, lines - height + 1)
    }

    fn gutter_width(&self) -> usize {
        self.lines.len().max(1).to_string().len()
    }

    fn in_range(&self, line_no: usize) -> bool {
        (self.start..=self.end).contains(&line_no)
    }

    /// Render as plain text, for tests and diagnostics.
    pub fn render_string(&self, height: u16) -> String {
        let first = self.first_visible(height as usize);
        let gutter = self.gutter_width();
        let mut out = Vec::with_capacity(height as usize);
        for row in 0..height as usize {
            let line_no = first + row;
            match self.lines.get(line_no - 1) {
                Some(text) => {
                    let mark = if self.in_range(line_no) { '▌' } else { ' ' };
                    out.push(format!("{:>width$} │{}{}", line_no, mark, text, width = gutter));
                }
                None => out.push(String::new()),
            }
        }
        out.join("\n")
    }
}

impl Widget for SourceViewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let first = self.first_visible(area.height as usize);
        let gutter = self.gutter_width();

        for row in 0..area.height {
            let line_no = first + row as usize;
            let Some(text) = self.lines.get(line_no - 1) else {
                break;
            };
            let highlighted = self.in_range(line_no);

            let gutter_text = format!("{:>width$} │ ", line_no, width = gutter);
            let gutter_style = if highlighted {
                Style::default().fg(colors::CYAN)
            } else {
                Style::default().fg(colors::MUTED)
            };
            buf.set_stringn(
                area.x,
                area.y + row,
                &gutter_text,
                area.width as usize,
                gutter_style,
            );

            let text_col = area.x + gutter_text.chars().count() as u16;
            if text_col >= area.x + area.width {
                continue;
            }
            let line_style = if highlighted {
                Style::default()
                    .fg(colors::GREEN)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::GRAY)
            };
            buf.set_stringn(
                text_col,
                area.y + row,
                text,
                (area.x + area.width - text_col) as usize,
                line_style,
            );
        }
    }
}

// ============================================================================
// Scrubber Widget
// ============================================================================

/// The range input at the bottom of the player: a track with a thumb at the
/// current frame position, plus a frame counter.
#[derive(Debug, Clone, Copy)]
pub struct ScrubberWidget {
    pos: u64,
    max_pos: u64,
}

impl ScrubberWidget {
    /// Create a scrubber for `pos` within `[0, max_pos]`.
    pub fn new(pos: u64, max_pos: u64) -> Self {
        Self {
            pos: pos.min(max_pos),
            max_pos,
        }
    }

    /// Column of the thumb on a track of `track_width` cells.
    pub fn thumb_column(&self, track_width: usize) -> usize {
        if track_width == 0 || self.max_pos == 0 {
            return 0;
        }
        let fraction = self.pos as f64 / self.max_pos as f64;
        (fraction * (track_width - 1) as f64).round() as usize
    }

    fn counter(&self) -> String {
        format!(" {}/{}", self.pos, self.max_pos)
    }

    /// Render as plain text, for tests and diagnostics.
    pub fn render_string(&self, width: usize) -> String {
        let counter = self.counter();
        let track_width = width.saturating_sub(counter.chars().count());
        if track_width == 0 {
            return counter.trim_start().to_string();
        }
        let thumb = self.thumb_column(track_width);
        let mut track = String::with_capacity(track_width);
        for col in 0..track_width {
            track.push(if col < thumb {
                '━'
            } else if col == thumb {
                '●'
            } else {
                '─'
            });
        }
        format!("{}{}", track, counter)
    }
}

impl Widget for ScrubberWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let counter = self.counter();
        let track_width = (area.width as usize).saturating_sub(counter.chars().count());
        let thumb = self.thumb_column(track_width);

        for col in 0..track_width {
            let (symbol, style) = if col < thumb {
                ("━", Style::default().fg(colors::BLUE))
            } else if col == thumb {
                ("●", Style::default().fg(colors::BLUE).add_modifier(Modifier::BOLD))
            } else {
                ("─", Style::default().fg(colors::MUTED))
            };
            buf.set_string(area.x + col as u16, area.y, symbol, style);
        }
        buf.set_stringn(
            area.x + track_width as u16,
            area.y,
            &counter,
            (area.width as usize).saturating_sub(track_width),
            Style::default().fg(colors::GRAY),
        );
    }
}
