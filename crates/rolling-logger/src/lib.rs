//! Rolling Logger
//!
//! `tracing-subscriber` setup for the web client. Formatted events go to a
//! bounded in-memory buffer (readable from the UI) and, in the browser, to
//! the devtools console.

mod buffer;

use std::str::FromStr;

use chrono::Local;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

pub use buffer::{LineWriter, LogBuffer};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log level {0:?}")]
    InvalidLevel(String),
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollingLoggerConfig {
    /// Lines kept in memory
    pub capacity: usize,
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`
    pub level: String,
}

impl Default for RollingLoggerConfig {
    fn default() -> Self {
        Self {
            capacity: 500,
            level: "info".to_string(),
        }
    }
}

impl RollingLoggerConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, LoggerError> {
        LevelFilter::from_str(self.level.trim()).map_err(|_| LoggerError::InvalidLevel(self.level.clone()))
    }
}

/// Local wall-clock timestamps via chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoLocalTimer;

impl FormatTime for ChronoLocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Install the global subscriber and return the buffer it writes into.
pub fn init(config: &RollingLoggerConfig) -> Result<LogBuffer, LoggerError> {
    let level = config.level_filter()?;
    let buffer = LogBuffer::new(config.capacity);

    tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_timer(ChronoLocalTimer)
        .with_max_level(level)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    Ok(buffer)
}
