//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`, so they never mix with the
//! launched command's output or the launcher's own status lines on stdout.
//! The level comes from, in increasing precedence: the default (`warn`),
//! `UNIRUN_LOG_LEVEL`, the command line. `RUST_LOG`, when set, replaces the
//! filter entirely.
//!
//! ```no_run
//! use unirun::util::logging::{self, LoggingConfig};
//! use tracing::Level;
//!
//! logging::init_logging(LoggingConfig::from_env().with_level(Level::DEBUG));
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const LEVEL_ENV: &str = "UNIRUN_LOG_LEVEL";
pub const JSON_ENV: &str = "UNIRUN_LOG_JSON";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,

    /// Emit one JSON object per event
    pub use_json: bool,

    /// Include the module target (e.g. `unirun::port`)
    pub include_target: bool,

    /// Include file and line number
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Reads `UNIRUN_LOG_LEVEL` and `UNIRUN_LOG_JSON`; unset or invalid values keep the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let level = env::var(LEVEL_ENV)
            .ok()
            .and_then(|value| parse_level(&value))
            .unwrap_or(defaults.level);

        let use_json = env::var(JSON_ENV)
            .ok()
            .and_then(|value| parse_bool(&value))
            .unwrap_or(defaults.use_json);

        Self {
            level,
            use_json,
            ..defaults
        }
    }

    pub fn with_level(self, level: Level) -> Self {
        let verbose = level >= Level::DEBUG;
        Self {
            level,
            include_target: verbose,
            ..self
        }
    }

    pub fn with_json(self, use_json: bool) -> Self {
        Self { use_json, ..self }
    }

    /// Filter directive for this crate's events
    pub fn directive(&self) -> String {
        format!("{}={}", crate::NAME, self.level)
    }
}

/// Parses a level name, case-insensitively
pub fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.directive()));

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.without_time())
                .init();
        }
    });
}

pub fn init_from_env() {
    init_logging(LoggingConfig::from_env());
}
