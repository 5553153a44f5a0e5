// RUNTIME PREFERENCES (User Experience)

use super::constants::compile_time::scopes::{DEFAULT_SCOPE_DEPTH, MAX_SCOPE_DEPTH};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Read an environment override, falling back to `default` when unset or unparsable
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Configuration loading errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid TOML configuration: {message}")]
    Parse { message: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPreferences {
    /// Whether blank input lines are ignored without a diagnostic
    pub skip_blank_lines: bool,

    /// Whether every skipped malformed token line is logged as a warning
    pub log_skipped_lines: bool,
}

impl Default for InputPreferences {
    fn default() -> Self {
        Self {
            skip_blank_lines: env_or(env_vars::INPUT_SKIP_BLANK_LINES, true),
            log_skipped_lines: env_or(env_vars::INPUT_LOG_SKIPPED_LINES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPreferences {
    /// Whether open scopes or an unfinished declaration at end of stream are fatal
    pub require_balanced_scopes: bool,

    /// Whether tokens of an unrecognised kind are ignored instead of rejected
    pub skip_unknown_kinds: bool,

    /// Whether each state transition is logged at debug level
    pub log_transitions: bool,

    /// Maximum live scope depth, global scope included
    pub max_scope_depth: usize,
}

impl Default for AnalysisPreferences {
    fn default() -> Self {
        Self {
            require_balanced_scopes: env_or(env_vars::ANALYSIS_REQUIRE_BALANCED_SCOPES, true),
            skip_unknown_kinds: env_or(env_vars::ANALYSIS_SKIP_UNKNOWN_KINDS, false),
            log_transitions: env_or(env_vars::ANALYSIS_LOG_TRANSITIONS, false),
            max_scope_depth: env_or(env_vars::ANALYSIS_MAX_SCOPE_DEPTH, DEFAULT_SCOPE_DEPTH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPreferences {
    /// Rendering of the final tables
    pub format: OutputFormat,

    /// Whether the symbol table shows a KIND column
    pub show_declaration_kind: bool,

    /// Whether JSON output is pretty-printed
    pub pretty_json: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            format: env_or(env_vars::OUTPUT_FORMAT, OutputFormat::Text),
            show_declaration_kind: env_or(env_vars::OUTPUT_SHOW_KIND, true),
            pretty_json: env_or(env_vars::OUTPUT_PRETTY_JSON, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum log level
    pub min_log_level: LogLevel,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include input context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_or(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_or(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            enable_cargo_style_output: env_or(env_vars::LOGGING_CARGO_STYLE, true),
            include_file_context: env_or(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
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

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_log_level(s).ok_or_else(|| format!("unknown log level '{}'", s))
    }
}

/// Parse log level from string (used for environment variables and CLI flags)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
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
    pub input: InputPreferences,
    pub analysis: AnalysisPreferences,
    pub output: OutputPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a TOML document; absent tables and keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Check preference values against the compile-time limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        let depth = self.analysis.max_scope_depth;
        if depth == 0 || depth > MAX_SCOPE_DEPTH {
            return Err(ConfigError::Invalid {
                key: "analysis.max_scope_depth".to_string(),
                message: format!("must be between 1 and {}, found {}", MAX_SCOPE_DEPTH, depth),
            });
        }
        Ok(())
    }

    /// Serialize back to TOML (used by `--print-config`)
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Input
    pub const INPUT_SKIP_BLANK_LINES: &str = "SCOPETAB_INPUT_SKIP_BLANK_LINES";
    pub const INPUT_LOG_SKIPPED_LINES: &str = "SCOPETAB_INPUT_LOG_SKIPPED_LINES";

    // Analysis
    pub const ANALYSIS_REQUIRE_BALANCED_SCOPES: &str = "SCOPETAB_ANALYSIS_REQUIRE_BALANCED_SCOPES";
    pub const ANALYSIS_SKIP_UNKNOWN_KINDS: &str = "SCOPETAB_ANALYSIS_SKIP_UNKNOWN_KINDS";
    pub const ANALYSIS_LOG_TRANSITIONS: &str = "SCOPETAB_ANALYSIS_LOG_TRANSITIONS";
    pub const ANALYSIS_MAX_SCOPE_DEPTH: &str = "SCOPETAB_ANALYSIS_MAX_SCOPE_DEPTH";

    // Output
    pub const OUTPUT_FORMAT: &str = "SCOPETAB_OUTPUT_FORMAT";
    pub const OUTPUT_SHOW_KIND: &str = "SCOPETAB_OUTPUT_SHOW_KIND";
    pub const OUTPUT_PRETTY_JSON: &str = "SCOPETAB_OUTPUT_PRETTY_JSON";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "SCOPETAB_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "SCOPETAB_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "SCOPETAB_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "SCOPETAB_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "SCOPETAB_LOGGING_INCLUDE_FILE_CONTEXT";
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
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [analysis]
            require_balanced_scopes = false
            max_scope_depth = 8

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert!(!config.analysis.require_balanced_scopes);
        assert_eq!(config.analysis.max_scope_depth, 8);
        assert_eq!(config.output.format, OutputFormat::Json);
        // Untouched table falls back to its defaults
        assert!(config.input.skip_blank_lines);
    }

    #[test]
    fn test_invalid_scope_depth_rejected() {
        let result = RuntimeConfig::from_toml_str("[analysis]\nmax_scope_depth = 0\n");
        assert_matches!(result, Err(ConfigError::Invalid { ref key, .. }) if key == "analysis.max_scope_depth");

        let too_deep = format!("[analysis]\nmax_scope_depth = {}\n", MAX_SCOPE_DEPTH + 1);
        assert_matches!(
            RuntimeConfig::from_toml_str(&too_deep),
            Err(ConfigError::Invalid { .. })
        );
    }

    #[test]
    fn test_malformed_toml() {
        assert_matches!(
            RuntimeConfig::from_toml_str("[analysis\nbroken"),
            Err(ConfigError::Parse { .. })
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scopetab.toml");
        std::fs::write(&path, "[input]\nlog_skipped_lines = false\n").unwrap();

        let config = RuntimeConfig::from_file(&path).unwrap();
        assert!(!config.input.log_skipped_lines);

        let missing = RuntimeConfig::from_file(dir.path().join("missing.toml"));
        assert_matches!(missing, Err(ConfigError::Io { .. }));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let config = RuntimeConfig::default();
        let rendered = config.to_toml_string().unwrap();
        let reparsed = RuntimeConfig::from_toml_str(&rendered).unwrap();
        assert_eq!(
            reparsed.analysis.max_scope_depth,
            config.analysis.max_scope_depth
        );
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(env_vars::ANALYSIS_MAX_SCOPE_DEPTH.starts_with("SCOPETAB_"));
    }
}
