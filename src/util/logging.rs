//! Structured logging setup for imageguard
//!
//! Initializes a `tracing` subscriber that writes to stderr, so report output on
//! stdout stays machine-readable. Filtering honours `RUST_LOG` when it is set.
//!
//! # Example
//!
//! ```no_run
//! use imageguard::util::logging::{init_logging, LoggingConfig};
//!
//! init_logging(LoggingConfig::from_env());
//!
//! tracing::info!(file = "Dockerfile", "Analysing");
//! ```

use crate::config::{DEFAULT_LOG_LEVEL, ENV_LOG_LEVEL};
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const ENV_LOG_JSON: &str = "IMAGEGUARD_LOG_JSON";

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., imageguard::compliance) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Reads `IMAGEGUARD_LOG_LEVEL` and `IMAGEGUARD_LOG_JSON`. JSON output uses
    /// the production layout.
    pub fn from_env() -> Self {
        let use_json = env::var(ENV_LOG_JSON)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);
        let level_str = env::var(ENV_LOG_LEVEL).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        let base = if use_json {
            Self::production()
        } else {
            Self::default()
        };
        Self {
            level: parse_level(&level_str),
            ..base
        }
    }

    /// JSON output with source locations, for CI log collectors.
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }
}

/// Parses a log level from a string
///
/// Case-insensitive; unknown values fall back to `Level::INFO`.
///
/// ```
/// use imageguard::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Initializes the logging system. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            if let Ok(directive) = format!("imageguard={}", config.level).parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}
