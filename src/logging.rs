//! Logging setup for the scrolly binary.
//!
//! Logs go to stderr: the player owns stdout (and the alternate screen while
//! the TUI runs), so diagnostics must stay off it. Levels come from `-v`
//! flags or the `RUST_LOG` environment variable, `RUST_LOG` winning.

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Log level selected for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Frame loop and driver transitions.
    Debug,
    /// Default.
    #[default]
    Info,
    /// Problems only.
    Warn,
    /// Failures only.
    Error,
    /// No logging at all.
    Off,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            // Filtered out entirely by the directive below.
            LogLevel::Error | LogLevel::Off => Level::ERROR,
        }
    }
}

impl LogLevel {
    /// Map `-v` occurrences to a level: 0 = info, 1 = debug, 2+ = trace.
    pub fn from_verbosity(verbosity: u8) -> Self {
        match verbosity {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before the terminal enters raw mode. `RUST_LOG`
/// overrides the requested level when set.
pub fn init_logging(level: LogLevel) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.directive())
    };

    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(LogLevel::from_verbosity(0), LogLevel::Info);
        assert_eq!(LogLevel::from_verbosity(1), LogLevel::Debug);
        assert_eq!(LogLevel::from_verbosity(2), LogLevel::Trace);
        assert_eq!(LogLevel::from_verbosity(9), LogLevel::Trace);
    }

    #[test]
    fn test_directive_strings() {
        assert_eq!(LogLevel::Off.directive(), "off");
        assert_eq!(LogLevel::Info.directive(), "info");
    }
}
