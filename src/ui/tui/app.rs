//! The TUI player: application state and event loop.
//!
//! Owns the deck and the animation driver, decodes keys into player
//! commands, and renders the three panes. The event loop doubles as the
//! frame scheduler: the driver's pending callback is a deadline the loop
//! uses as its poll timeout.

use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info};

use super::widgets::{IllustrationWidget, ScrubberWidget, SourceViewWidget};
use crate::deck::Deck;
use crate::error::ScrollyError;
use crate::player::{Driver, DriverState, FrameScheduler, Timing};
use crate::ui::keyboard::{KeyBindings, PlayerCommand};
use crate::ui::DisplayOptions;

/// Poll timeout while nothing is scheduled (suspended or finished).
const IDLE_POLL: Duration = Duration::from_millis(250);

// ============================================================================
// Tick Scheduler
// ============================================================================

/// Frame pacing over the event loop.
///
/// `schedule` arms a single deadline one frame ahead; the loop sleeps until
/// it, then consumes it with [`TickScheduler::take_due`] and fires the
/// driver. Holds at most one deadline, matching the driver's single pending
/// callback.
#[derive(Debug)]
pub struct TickScheduler {
    frame: Duration,
    next_handle: u64,
    pending: Option<(u64, Instant)>,
}

impl TickScheduler {
    /// Create a scheduler pacing callbacks `frame` apart.
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            next_handle: 0,
            pending: None,
        }
    }

    /// Time remaining until the pending deadline, if one is armed.
    pub fn time_to_deadline(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, at)| at.saturating_duration_since(now))
    }

    /// Consume the pending callback if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some((_, at)) if now >= at => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl FrameScheduler for TickScheduler {
    type Handle = u64;

    fn schedule(&mut self) -> u64 {
        self.next_handle += 1;
        self.pending = Some((self.next_handle, Instant::now() + self.frame));
        self.next_handle
    }

    fn cancel(&mut self, handle: u64) {
        if matches!(self.pending, Some((armed, _)) if armed == handle) {
            self.pending = None;
        }
    }
}

// ============================================================================
// Player App
// ============================================================================

/// Player lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Driver running, position advancing.
    Playing,
    /// Suspended by the user (pause or scrub); position held.
    Scrubbing,
    /// The last frame was reached; waiting for replay or quit.
    Finished,
    /// Tearing down.
    Exiting,
}

/// The player component: one deck, one driver, one terminal.
pub struct PlayerApp {
    deck: Deck,
    driver: Driver<TickScheduler>,
    state: AppState,
    bindings: KeyBindings,
}

impl PlayerApp {
    /// Create a player for a validated deck.
    pub fn new(deck: Deck, timing: Timing, start_paused: bool) -> Self {
        debug_assert!(deck.step_count() >= 1, "deck must be validated");
        let scheduler = TickScheduler::new(timing.frame_duration());
        let mut driver = Driver::new(scheduler, timing);
        let state = if start_paused {
            driver.stop();
            AppState::Scrubbing
        } else {
            driver.start(deck.step_count());
            AppState::Playing
        };
        Self {
            deck,
            driver,
            state,
            bindings: KeyBindings::default(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Current frame position.
    pub fn pos(&self) -> u64 {
        self.driver.pos()
    }

    fn steps(&self) -> usize {
        self.deck.step_count()
    }

    /// Decode and apply one key event.
    pub fn on_key(&mut self, key: &KeyEvent) {
        if let Some(command) = self.bindings.decode(key) {
            self.apply(command);
        }
    }

    /// Apply a player command to the state machine.
    pub fn apply(&mut self, command: PlayerCommand) {
        let steps = self.steps();
        match command {
            PlayerCommand::Quit => {
                self.driver.stop();
                self.state = AppState::Exiting;
            }
            PlayerCommand::TogglePlay => self.toggle_play(),
            PlayerCommand::ScrubFrames(delta) => self.scrub_by(delta),
            PlayerCommand::ScrubSteps(delta) => {
                let frames = self.driver.timing().frames_per_pos() as i64;
                self.scrub_by(delta.saturating_mul(frames));
            }
            PlayerCommand::JumpStart => self.scrub_to(0),
            PlayerCommand::JumpEnd => self.scrub_to(self.driver.last_frame(steps)),
        }
    }

    fn toggle_play(&mut self) {
        let steps = self.steps();
        match self.state {
            AppState::Playing => {
                self.driver.stop();
                self.state = AppState::Scrubbing;
            }
            AppState::Scrubbing => {
                self.driver.start(steps);
                self.state = if self.driver.is_running() {
                    AppState::Playing
                } else {
                    AppState::Finished
                };
            }
            AppState::Finished => {
                // Replay from the top.
                self.driver.set_position(0, steps);
                self.driver.start(steps);
                self.state = AppState::Playing;
            }
            AppState::Exiting => {}
        }
    }

    /// Scrub relative to the current position.
    ///
    /// The gesture brackets the driver: suspend first, then write the
    /// position, so the frame loop never races the scrubbed value.
    fn scrub_by(&mut self, delta: i64) {
        let pos = self.driver.pos().saturating_add_signed(delta);
        self.scrub_to(pos);
    }

    fn scrub_to(&mut self, pos: u64) {
        if self.state == AppState::Exiting {
            return;
        }
        self.driver.stop();
        self.driver.set_position(pos, self.steps());
        debug!(pos = self.driver.pos(), "scrubbed");
        self.state = AppState::Scrubbing;
    }

    /// Fire the frame callback when its deadline has passed.
    pub fn pump(&mut self, now: Instant) {
        if self.driver.scheduler_mut().take_due(now) {
            self.driver.on_frame(self.steps());
        }
        if self.state == AppState::Playing && self.driver.state() == DriverState::Idle {
            self.state = AppState::Finished;
        }
    }

    /// How long the event loop may sleep before the next frame is due.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.driver
            .scheduler()
            .time_to_deadline(now)
            .unwrap_or(IDLE_POLL)
    }

    /// Render the full player view.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.width < 10 || area.height < 6 {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title + caption
                Constraint::Min(0),    // panes
                Constraint::Length(2), // scrubber + hints
            ])
            .split(area);

        let steps = self.steps();
        let cursor = self.driver.cursor(steps);
        let step = &self.deck.steps[cursor.index];
        let prev = cursor.prev.map(|i| &self.deck.steps[i]);

        // Header
        let title_line = Line::from(vec![
            Span::styled(
                self.deck.title.clone(),
                Style::default()
                    .fg(super::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  step {}/{}", cursor.index + 1, steps),
                Style::default().fg(super::MUTED),
            ),
        ]);
        // Captions fade in with the transition and settle once the step
        // holds.
        let caption_style = if cursor.is_holding() {
            Style::default().fg(super::CAPTION)
        } else {
            Style::default().fg(super::CAPTION).add_modifier(Modifier::DIM)
        };
        let caption_line = Line::from(Span::styled(
            step.caption.clone().unwrap_or_default(),
            caption_style,
        ));
        frame.render_widget(Paragraph::new(vec![title_line, caption_line]), rows[0]);

        // Panes, side by side in landscape, stacked in portrait.
        let panes = if is_landscape(rows[1]) {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1])
        } else {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1])
        };

        let illustration_block = Block::default().borders(Borders::ALL).title("illustration");
        let illustration_area = illustration_block.inner(panes[0]);
        frame.render_widget(illustration_block, panes[0]);
        frame.render_widget(
            IllustrationWidget::new(prev, step, cursor.progress),
            illustration_area,
        );

        let source_block = Block::default().borders(Borders::ALL).title("source");
        let source_area = source_block.inner(panes[1]);
        frame.render_widget(source_block, panes[1]);
        frame.render_widget(
            SourceViewWidget::new(&self.deck.source, step.start, step.end),
            source_area,
        );

        // Footer
        let footer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(rows[2]);
        frame.render_widget(
            ScrubberWidget::new(self.driver.pos(), self.driver.timing().max_pos(steps)),
            footer[0],
        );
        frame.render_widget(
            Paragraph::new(self.hint_line()).style(Style::default().fg(super::MUTED)),
            footer[1],
        );
    }

    fn hint_line(&self) -> String {
        let status = match self.state {
            AppState::Playing => "▶ playing",
            AppState::Scrubbing => "⏸ paused",
            AppState::Finished => "■ finished",
            AppState::Exiting => "",
        };
        format!(
            "{}  ·  [space] play/pause  [←/→] scrub  [pgup/pgdn] step  [q] quit",
            status
        )
    }
}

fn is_landscape(area: Rect) -> bool {
    area.width >= area.height * 2
}

// ============================================================================
// Terminal lifecycle
// ============================================================================

/// Initialize terminal for TUI mode.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore terminal from TUI mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Play a deck in the terminal until the user quits.
pub fn run(deck: Deck, timing: Timing, options: &DisplayOptions) -> Result<(), ScrollyError> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, deck, timing, options);
    restore_terminal(&mut terminal)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    deck: Deck,
    timing: Timing,
    options: &DisplayOptions,
) -> Result<(), ScrollyError> {
    info!(
        title = %deck.title,
        steps = deck.step_count(),
        frames = timing.max_pos(deck.step_count()),
        "playing deck"
    );
    let mut app = PlayerApp::new(deck, timing, options.start_paused);

    while app.state() != AppState::Exiting {
        terminal.draw(|frame| app.render(frame))?;

        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(&key),
                // Resize redraws on the next pass.
                _ => {}
            }
        }
        app.pump(Instant::now());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Marker, Step};
    use ratatui::backend::TestBackend;

    fn deck() -> Deck {
        Deck {
            title: "Demo deck".to_string(),
            source: "one\ntwo\nthree\nfour\n".to_string(),
            steps: vec![
                Step {
                    caption: Some("begin".to_string()),
                    start: 1,
                    end: 2,
                    markers: vec![Marker {
                        id: "m".to_string(),
                        label: None,
                        x: 0.0,
                        y: 0.0,
                    }],
                },
                Step {
                    caption: Some("end".to_string()),
                    start: 3,
                    end: 4,
                    markers: vec![Marker {
                        id: "m".to_string(),
                        label: None,
                        x: 1.0,
                        y: 1.0,
                    }],
                },
            ],
        }
    }

    /// Timing small enough to play out inside a unit test.
    fn fast_timing() -> Timing {
        Timing::new(60, 0.0, 0.1)
    }

    fn far_future() -> Instant {
        Instant::now() + Duration::from_secs(3600)
    }

    #[test]
    fn test_starts_playing() {
        let app = PlayerApp::new(deck(), fast_timing(), false);
        assert_eq!(app.state(), AppState::Playing);
        assert_eq!(app.pos(), 0);
    }

    #[test]
    fn test_starts_paused_when_requested() {
        let app = PlayerApp::new(deck(), fast_timing(), true);
        assert_eq!(app.state(), AppState::Scrubbing);
    }

    #[test]
    fn test_toggle_pauses_and_resumes() {
        let mut app = PlayerApp::new(deck(), fast_timing(), false);
        app.apply(PlayerCommand::TogglePlay);
        assert_eq!(app.state(), AppState::Scrubbing);
        app.apply(PlayerCommand::TogglePlay);
        assert_eq!(app.state(), AppState::Playing);
    }

    #[test]
    fn test_scrub_suspends_and_moves() {
        let mut app = PlayerApp::new(deck(), fast_timing(), false);
        app.apply(PlayerCommand::ScrubFrames(5));
        assert_eq!(app.state(), AppState::Scrubbing);
        assert_eq!(app.pos(), 5);
        app.apply(PlayerCommand::ScrubFrames(-99));
        assert_eq!(app.pos(), 0);
    }

    #[test]
    fn test_jump_end_lands_on_last_frame() {
        let mut app = PlayerApp::new(deck(), fast_timing(), false);
        let timing = fast_timing();
        app.apply(PlayerCommand::JumpEnd);
        assert_eq!(app.pos(), timing.max_pos(2) - 1);
        assert_eq!(app.state(), AppState::Scrubbing);
    }

    #[test]
    fn test_plays_to_finish() {
        let mut app = PlayerApp::new(deck(), fast_timing(), false);
        let budget = fast_timing().max_pos(2) + 10;
        for _ in 0..budget {
            app.pump(far_future());
            if app.state() == AppState::Finished {
                break;
            }
        }
        assert_eq!(app.state(), AppState::Finished);
        assert_eq!(app.pos(), fast_timing().max_pos(2) - 1);
    }

    #[test]
    fn test_replay_after_finish() {
        let mut app = PlayerApp::new(deck(), fast_timing(), false);
        for _ in 0..fast_timing().max_pos(2) + 10 {
            app.pump(far_future());
        }
        assert_eq!(app.state(), AppState::Finished);

        app.apply(PlayerCommand::TogglePlay);
        assert_eq!(app.state(), AppState::Playing);
        assert_eq!(app.pos(), 0);
    }

    #[test]
    fn test_quit_from_any_state() {
        let mut app = PlayerApp::new(deck(), fast_timing(), false);
        app.apply(PlayerCommand::Quit);
        assert_eq!(app.state(), AppState::Exiting);

        let mut paused = PlayerApp::new(deck(), fast_timing(), true);
        paused.apply(PlayerCommand::Quit);
        assert_eq!(paused.state(), AppState::Exiting);
    }

    #[test]
    fn test_pump_without_due_deadline_is_noop() {
        // One frame lasts a full second, so the deadline cannot have passed.
        let mut app = PlayerApp::new(deck(), Timing::new(1, 0.0, 10.0), false);
        app.pump(Instant::now());
        assert_eq!(app.pos(), 0);
        assert_eq!(app.state(), AppState::Playing);
    }

    #[test]
    fn test_render_smoke() {
        let app = PlayerApp::new(deck(), fast_timing(), false);
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        terminal
            .draw(|frame| app.render(frame))
            .expect("render succeeds");
        let contents = format!("{:?}", terminal.backend().buffer());
        assert!(contents.contains("Demo deck"));
        assert!(contents.contains("illustration"));
        assert!(contents.contains("source"));
    }

    #[test]
    fn test_landscape_detection() {
        assert!(is_landscape(Rect::new(0, 0, 80, 24)));
        assert!(!is_landscape(Rect::new(0, 0, 40, 40)));
    }
}
