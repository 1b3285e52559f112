// RUNTIME PREFERENCES (User Experience)

use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Errors raised while loading a runtime configuration file
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration in {path}: {message}")]
    Parse { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConfigError::Io { .. } => crate::logging::codes::configuration::CONFIG_READ_FAILED,
            ConfigError::Parse { .. } => crate::logging::codes::configuration::CONFIG_PARSE_FAILED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to log size, rate and line metrics after reading a file
    pub enable_performance_logging: bool,

    /// Whether an empty input produces a warning
    pub warn_on_empty_input: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env::var("LEXAN_ENABLE_PERFORMANCE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            warn_on_empty_input: env::var("LEXAN_WARN_ON_EMPTY_INPUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to keep per-type token counts
    pub collect_detailed_metrics: bool,

    /// Whether whitespace tokens are included in token counts
    pub include_whitespace_in_counts: bool,

    /// Whether each Invalid Identifier / Include Directive token is reported as a warning
    pub report_error_signal_tokens: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var("LEXAN_LEXICAL_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_whitespace_in_counts: env::var("LEXAN_LEXICAL_COUNT_WHITESPACE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            report_error_signal_tokens: env::var("LEXAN_LEXICAL_REPORT_ERROR_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPreferences {
    /// Line format for emitted tokens
    pub format: OutputFormat,

    /// Whether whitespace tokens are written
    pub include_whitespace: bool,

    /// Whether each token line carries its line:column
    pub include_positions: bool,

    /// Whether a per-type summary follows the token listing
    pub print_summary: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            format: env::var("LEXAN_OUTPUT_FORMAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(OutputFormat::Plain),
            include_whitespace: env::var("LEXAN_OUTPUT_INCLUDE_WHITESPACE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_positions: env::var("LEXAN_OUTPUT_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            print_summary: env::var("LEXAN_OUTPUT_PRINT_SUMMARY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether log events are written to stderr at all
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    /// Note: errors and warnings are kept regardless, see SECURITY_MIN_LOG_LEVEL
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to print the cargo-style error summary on failure
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("LEXAN_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("LEXAN_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var("LEXAN_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            log_performance_events: env::var("LEXAN_LOGGING_LOG_PERFORMANCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_cargo_style_output: env::var("LEXAN_LOGGING_CARGO_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var("LEXAN_LOGGING_INCLUDE_FILE_CONTEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub(crate) fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub output: OutputPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; missing sections and keys fall back to the
    /// environment-aware defaults.
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Render as TOML (useful as a starting point for a config file)
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<runtime>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "LEXAN_ENABLE_PERFORMANCE_LOGGING";
    pub const WARN_ON_EMPTY_INPUT: &str = "LEXAN_WARN_ON_EMPTY_INPUT";

    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "LEXAN_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_COUNT_WHITESPACE: &str = "LEXAN_LEXICAL_COUNT_WHITESPACE";
    pub const LEXICAL_REPORT_ERROR_TOKENS: &str = "LEXAN_LEXICAL_REPORT_ERROR_TOKENS";

    // Output
    pub const OUTPUT_FORMAT: &str = "LEXAN_OUTPUT_FORMAT";
    pub const OUTPUT_INCLUDE_WHITESPACE: &str = "LEXAN_OUTPUT_INCLUDE_WHITESPACE";
    pub const OUTPUT_INCLUDE_POSITIONS: &str = "LEXAN_OUTPUT_INCLUDE_POSITIONS";
    pub const OUTPUT_PRINT_SUMMARY: &str = "LEXAN_OUTPUT_PRINT_SUMMARY";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "LEXAN_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "LEXAN_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "LEXAN_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "LEXAN_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_CARGO_STYLE: &str = "LEXAN_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "LEXAN_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("1"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("2"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = RuntimeConfig::from_toml_str(
            "[output]\nformat = \"json\"\ninclude_positions = true\n",
            "inline",
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.include_positions);
        // untouched sections keep their defaults
        assert_eq!(
            config.lexical.collect_detailed_metrics,
            LexicalPreferences::default().collect_detailed_metrics
        );
    }

    #[test]
    fn test_toml_log_level() {
        let config =
            RuntimeConfig::from_toml_str("[logging]\nmin_log_level = \"debug\"\n", "inline")
                .unwrap();
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_toml() {
        let result = RuntimeConfig::from_toml_str("[output\nformat = ", "broken.toml");
        assert_matches!(result, Err(ConfigError::Parse { path, .. }) if path == "broken.toml");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuntimeConfig::load(dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexan.toml");

        let mut config = RuntimeConfig::default();
        config.output.include_whitespace = true;
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = RuntimeConfig::load(&path).unwrap();
        assert!(loaded.output.include_whitespace);
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(env_vars::LOGGING_MIN_LEVEL.starts_with("LEXAN_"));
        assert!(env_vars::OUTPUT_FORMAT.starts_with("LEXAN_"));
        assert!(!env_vars::LEXICAL_COUNT_WHITESPACE.is_empty());
    }
}
