//! Logging preferences and limits
//!
//! Limits come from [`crate::config::compile_time::logging`]. Level and output
//! shape come from [`LoggingPreferences`], installed once at startup; when
//! nothing is installed the environment-derived defaults are read on first use.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install the preferences for this process. Fails once they have been read.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn preferences() -> &'static LoggingPreferences {
    RUNTIME_PREFERENCES.get_or_init(LoggingPreferences::default)
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn use_cargo_style_output() -> bool {
    preferences().enable_cargo_style_output
}

/// Whether events carry the `input` and `input_id` of the stream they came from
pub fn include_file_context() -> bool {
    preferences().include_file_context
}

/// Reject limit combinations the collector cannot honour
pub fn validate_config() -> Result<(), String> {
    if !(100..=100_000).contains(&LOG_BUFFER_SIZE) {
        return Err(format!("Log buffer size out of range: {}", LOG_BUFFER_SIZE));
    }
    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err("Max log events per input exceeds total buffer size".to_string());
    }
    Ok(())
}

/// Truncate a message to the configured maximum length on a char boundary
pub fn clamp_message(message: &str) -> &str {
    if message.len() <= MAX_LOG_MESSAGE_LENGTH {
        return message;
    }
    let mut end = MAX_LOG_MESSAGE_LENGTH;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    &message[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_preferences_are_read_once() {
        let first: *const LoggingPreferences = preferences();
        let second: *const LoggingPreferences = preferences();
        assert_eq!(first, second);

        // anything read before installation is what the process keeps
        assert!(init_runtime_preferences(LoggingPreferences::default()).is_err());
    }

    #[test]
    fn test_clamp_message() {
        assert_eq!(clamp_message("short"), "short");

        let long = "é".repeat(MAX_LOG_MESSAGE_LENGTH);
        let clamped = clamp_message(&long);
        assert!(clamped.len() <= MAX_LOG_MESSAGE_LENGTH);
        assert!(clamped.chars().all(|c| c == 'é'));
    }
}
