use std::env;
use std::fmt;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SEPARATOR: &str = " ";
const DEFAULT_EXTENSION: &str = ".log";
const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 256 * 1_048_576; // 256MB
const DEFAULT_HEADER: bool = false;
const DEFAULT_LOG_JSON: bool = false;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Settings shared by the merge, params and check commands.
///
/// `Default` reads `EXPLOG_*` environment variables; CLI flags are applied on top.
#[derive(Debug, Clone)]
pub struct ExplogConfig {
    /// Used when neither `--log-level` nor `-v`/`-q` is given.
    pub log_level: String,
    pub log_json: bool,
    /// Placed between parameter values and before the original log line.
    pub separator: String,
    /// Filename suffix used when listing directories. Empty keeps every file.
    pub extension: String,
    pub max_file_size_bytes: u64,
    pub header: bool,
}

impl Default for ExplogConfig {
    fn default() -> Self {
        let log_level = env::var("EXPLOG_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("EXPLOG_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        let separator =
            env::var("EXPLOG_SEPARATOR").unwrap_or_else(|_| DEFAULT_SEPARATOR.to_string());

        let extension =
            env::var("EXPLOG_EXTENSION").unwrap_or_else(|_| DEFAULT_EXTENSION.to_string());

        let max_file_size_bytes = env::var("EXPLOG_MAX_FILE_SIZE")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES);

        let header = env::var("EXPLOG_HEADER")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_HEADER);

        Self {
            log_level,
            log_json,
            separator,
            extension,
            max_file_size_bytes,
            header,
        }
    }
}

impl ExplogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if self.separator.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Separator cannot be empty".to_string(),
            ));
        }
        if self.separator.contains('\n') {
            return Err(ConfigError::ValidationFailed(
                "Separator cannot contain a newline".to_string(),
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max file size must be at least 1 byte".to_string(),
            ));
        }

        Ok(())
    }

    /// Parses a human-entered separator, accepting `\t` as a tab.
    pub fn parse_separator(raw: &str) -> Result<String, ConfigError> {
        let separator = raw.replace("\\t", "\t");
        if separator.is_empty() {
            return Err(ConfigError::ParseError {
                field: "separator".to_string(),
                error: "empty string".to_string(),
            });
        }
        Ok(separator)
    }
}

impl fmt::Display for ExplogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Explog Configuration:")?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        writeln!(f, "  Separator: {:?}", self.separator)?;
        writeln!(f, "  Extension: {:?}", self.extension)?;
        writeln!(f, "  Max File Size: {} bytes", self.max_file_size_bytes)?;
        writeln!(f, "  Header: {}", self.header)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = [
            EnvGuard::unset("EXPLOG_LOG_LEVEL"),
            EnvGuard::unset("EXPLOG_LOG_JSON"),
            EnvGuard::unset("EXPLOG_SEPARATOR"),
            EnvGuard::unset("EXPLOG_EXTENSION"),
            EnvGuard::unset("EXPLOG_MAX_FILE_SIZE"),
            EnvGuard::unset("EXPLOG_HEADER"),
        ];

        let config = ExplogConfig::default();

        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.log_json, DEFAULT_LOG_JSON);
        assert_eq!(config.separator, DEFAULT_SEPARATOR);
        assert_eq!(config.extension, DEFAULT_EXTENSION);
        assert_eq!(config.max_file_size_bytes, DEFAULT_MAX_FILE_SIZE_BYTES);
        assert_eq!(config.header, DEFAULT_HEADER);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = [
            EnvGuard::set("EXPLOG_LOG_LEVEL", "DEBUG"),
            EnvGuard::set("EXPLOG_LOG_JSON", "true"),
            EnvGuard::set("EXPLOG_SEPARATOR", ","),
            EnvGuard::set("EXPLOG_EXTENSION", ".txt"),
            EnvGuard::set("EXPLOG_MAX_FILE_SIZE", "1024"),
            EnvGuard::set("EXPLOG_HEADER", "true"),
        ];

        let config = ExplogConfig::default();

        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(config.separator, ",");
        assert_eq!(config.extension, ".txt");
        assert_eq!(config.max_file_size_bytes, 1024);
        assert!(config.header);
    }

    #[test]
    #[serial]
    fn test_unparseable_values_fall_back() {
        let _guards = [
            EnvGuard::set("EXPLOG_MAX_FILE_SIZE", "lots"),
            EnvGuard::set("EXPLOG_HEADER", "maybe"),
        ];

        let config = ExplogConfig::default();

        assert_eq!(config.max_file_size_bytes, DEFAULT_MAX_FILE_SIZE_BYTES);
        assert_eq!(config.header, DEFAULT_HEADER);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let base = ExplogConfig {
            log_level: "info".to_string(),
            log_json: false,
            separator: " ".to_string(),
            extension: ".log".to_string(),
            max_file_size_bytes: 10,
            header: false,
        };
        assert!(base.validate().is_ok());

        let bad_level = ExplogConfig {
            log_level: "loud".to_string(),
            ..base.clone()
        };
        assert!(bad_level.validate().is_err());

        let empty_sep = ExplogConfig {
            separator: String::new(),
            ..base.clone()
        };
        assert!(empty_sep.validate().is_err());

        let zero_size = ExplogConfig {
            max_file_size_bytes: 0,
            ..base
        };
        assert!(zero_size.validate().is_err());
    }

    #[test]
    fn test_parse_separator() {
        assert_eq!(ExplogConfig::parse_separator("\\t").unwrap(), "\t");
        assert_eq!(ExplogConfig::parse_separator(";").unwrap(), ";");
        assert!(ExplogConfig::parse_separator("").is_err());
    }

    #[test]
    #[serial]
    fn test_config_display() {
        let config = ExplogConfig::default();
        let display = format!("{}", config);
        assert!(display.contains("Explog Configuration:"));
        assert!(display.contains("Separator:"));
    }
}
