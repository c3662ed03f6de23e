use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::error;

use scrolly::deck;
use scrolly::logging::{init_logging, LogLevel};
use scrolly::player::timing::{DEFAULT_DELAY_SECS, DEFAULT_FPS, DEFAULT_TRANSITION_SECS};
use scrolly::player::Timing;
use scrolly::ui::{self, plain, tui, DisplayOptions, Theme, UiMode};

/// UI mode for terminal display
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CliUiMode {
    /// Auto-detect based on whether stdout is a terminal
    #[default]
    Auto,
    /// Force the full terminal UI
    Enabled,
    /// Force the plain step-by-step output
    Disabled,
}

impl From<CliUiMode> for UiMode {
    fn from(mode: CliUiMode) -> Self {
        match mode {
            CliUiMode::Auto => UiMode::Auto,
            CliUiMode::Enabled => UiMode::Enabled,
            CliUiMode::Disabled => UiMode::Disabled,
        }
    }
}

/// Output format for deck summaries
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CheckFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON structured output
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "scrolly")]
#[command(version)]
#[command(about = "Scrubber-driven scrollytelling player for the terminal")]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Deck to play (TOML)
    #[arg(value_name = "DECK", required = true)]
    deck: Option<PathBuf>,

    /// UI mode: auto (default), enabled, or disabled
    #[arg(long, default_value = "auto", value_enum)]
    ui: CliUiMode,

    /// Disable colors (also respects NO_COLOR environment variable)
    #[arg(long)]
    no_color: bool,

    /// Start with playback paused
    #[arg(long)]
    paused: bool,

    /// Frames per second the player targets
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Seconds a step holds after its transition
    #[arg(long, default_value_t = DEFAULT_DELAY_SECS)]
    delay: f64,

    /// Seconds a transition between steps animates
    #[arg(long, default_value_t = DEFAULT_TRANSITION_SECS)]
    transition: f64,

    /// Suppress all output except errors
    #[arg(long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a deck and print a summary
    Check {
        /// Deck to validate (TOML)
        deck: PathBuf,

        /// Output format
        #[arg(long, default_value = "text", value_enum)]
        format: CheckFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LogLevel::Error
    } else {
        LogLevel::from_verbosity(cli.verbose)
    };
    init_logging(level);

    let timing = Timing::new(cli.fps, cli.delay, cli.transition);
    if let Err(problem) = timing.validate() {
        eprintln!("error: invalid timing: {problem}");
        return ExitCode::from(2);
    }

    match &cli.command {
        Some(Commands::Check { deck, format }) => check(deck, &timing, *format),
        None => match &cli.deck {
            Some(path) => play(path, timing, &cli),
            // Unreachable through clap, which requires DECK without a
            // subcommand.
            None => ExitCode::from(2),
        },
    }
}

fn play(path: &Path, timing: Timing, cli: &Cli) -> ExitCode {
    let deck = match deck::load(path) {
        Ok(deck) => deck,
        Err(err) => {
            error!(%err, "failed to load deck");
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let options = DisplayOptions {
        mode: cli.ui.into(),
        colors: !cli.no_color && ui::detect_color_support(),
        start_paused: cli.paused,
    };

    let result = if options.use_tui() {
        tui::run(deck, timing, &options)
    } else {
        plain::print_deck(&deck, &Theme::default(), options.colors);
        Ok(())
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "player failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn check(path: &Path, timing: &Timing, format: CheckFormat) -> ExitCode {
    let deck = match deck::load(path) {
        Ok(deck) => deck,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let summary = deck.summary(timing);
    match format {
        CheckFormat::Text => {
            println!("deck: {}", summary.title);
            println!("steps: {}", summary.steps);
            println!("source lines: {}", summary.source_lines);
            println!(
                "frames: {} ({:.1}s at {} fps)",
                summary.frames, summary.duration_secs, timing.fps
            );
        }
        CheckFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
