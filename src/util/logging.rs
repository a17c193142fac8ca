//! Structured logging setup
//!
//! Logs always go to stderr so that merged output on stdout stays clean. Levels are
//! resolved from the command line first, then the loaded [`ExplogConfig`]; `RUST_LOG`,
//! when set, replaces the computed filter entirely.
//!
//! ```no_run
//! use explog::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::debug!(files = 3, "Collected log files");
//! ```

use crate::config::ExplogConfig;
use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., explog::merge) in logs
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
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Resolves the level from CLI flags, falling back to the configured level.
    ///
    /// An unparseable configured level falls back to INFO here; `ExplogConfig::validate`
    /// reports it.
    pub fn from_cli(
        log_level: Option<&str>,
        verbose: bool,
        quiet: bool,
        config: &ExplogConfig,
    ) -> Self {
        let level = if let Some(level_str) = log_level {
            parse_level(level_str)
        } else if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            try_parse_level(&config.log_level).unwrap_or(Level::INFO)
        };

        Self {
            level,
            use_json: config.log_json,
            include_location: level == Level::TRACE,
            ..Default::default()
        }
    }
}

pub fn try_parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Parses a log level, case-insensitively. Unknown values fall back to INFO.
pub fn parse_level(level_str: &str) -> Level {
    try_parse_level(level_str).unwrap_or_else(|| {
        eprintln!(
            "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
            level_str
        );
        Level::INFO
    })
}

/// Installs the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = if env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(format!("explog={}", config.level))
        };

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
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    fn config(level: &str, json: bool) -> ExplogConfig {
        ExplogConfig {
            log_level: level.to_string(),
            log_json: json,
            separator: " ".to_string(),
            extension: ".log".to_string(),
            max_file_size_bytes: 1024,
            header: false,
        }
    }

    #[test]
    fn test_from_cli_precedence() {
        let base = config("info", false);

        assert_eq!(LoggingConfig::from_cli(Some("warn"), true, false, &base).level, Level::WARN);
        assert_eq!(LoggingConfig::from_cli(None, true, false, &base).level, Level::DEBUG);
        assert_eq!(LoggingConfig::from_cli(None, false, true, &base).level, Level::ERROR);
        assert_eq!(LoggingConfig::from_cli(None, false, false, &base).level, Level::INFO);
        assert!(LoggingConfig::from_cli(Some("trace"), false, false, &base).include_location);
    }

    #[test]
    fn test_from_cli_uses_loaded_config() {
        let logging = LoggingConfig::from_cli(None, false, false, &config("error", true));

        assert_eq!(logging.level, Level::ERROR);
        assert!(logging.use_json);

        let invalid = LoggingConfig::from_cli(None, false, false, &config("loud", false));
        assert_eq!(invalid.level, Level::INFO);
    }

    #[test]
    #[serial]
    fn test_from_cli_ignores_environment() {
        env::set_var("EXPLOG_LOG_LEVEL", "trace");
        env::set_var("EXPLOG_LOG_JSON", "true");

        let logging = LoggingConfig::from_cli(None, false, false, &config("warn", false));

        env::remove_var("EXPLOG_LOG_LEVEL");
        env::remove_var("EXPLOG_LOG_JSON");

        assert_eq!(logging.level, Level::WARN);
        assert!(!logging.use_json);
    }

    #[test]
    fn test_try_parse_level() {
        assert_eq!(try_parse_level("WARN"), Some(Level::WARN));
        assert_eq!(try_parse_level("loud"), None);
    }
}
