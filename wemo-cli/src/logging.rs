//! Logging setup for the `wemo` binary
//!
//! Result lines go to stdout; every log event goes to stderr so the two
//! never interleave in pipelines.

use std::io::IsTerminal;

use clap::ValueEnum;
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LoggingMode {
    /// No output
    Silent,
    /// Warnings and errors only, compact stderr output
    #[default]
    Quiet,
    /// Compact stderr output
    Development,
    /// Verbose diagnostics, including raw device responses
    Debug,
}

impl LoggingMode {
    /// Filter directive used when no level is set in the environment
    fn default_level(self) -> &'static str {
        match self {
            LoggingMode::Silent => "off",
            LoggingMode::Quiet => "warn",
            LoggingMode::Development => "info",
            LoggingMode::Debug => "debug",
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Initialize logging with the specified mode
///
/// Colour codes are only written when stderr is a terminal.
///
/// # Environment Variables
///
/// - `WEMO_LOG_LEVEL`: Override log level (error, warn, info, debug, trace)
/// - `RUST_LOG`: Used when `WEMO_LOG_LEVEL` is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    let ansi = std::io::stderr().is_terminal();
    let filter = create_env_filter(mode.default_level());

    match subscriber(mode, std::io::stderr, ansi, filter) {
        Some(subscriber) => subscriber
            .try_init()
            .map_err(|e| LoggingError::TracingInit(e.to_string())),
        None => Ok(()),
    }
}

/// Build the subscriber for `mode`, or `None` when the mode logs nothing
fn subscriber<W>(
    mode: LoggingMode,
    writer: W,
    ansi: bool,
    filter: EnvFilter,
) -> Option<impl Subscriber + Send + Sync + 'static>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer: BoxedLayer = match mode {
        LoggingMode::Silent => return None,
        LoggingMode::Quiet | LoggingMode::Development => Box::new(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        ),
        LoggingMode::Debug => Box::new(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .pretty()
                .with_file(true)
                .with_line_number(true),
        ),
    };

    Some(Registry::default().with(layer).with(filter))
}

/// Create an environment filter with fallback to default level
fn create_env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("WEMO_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}
