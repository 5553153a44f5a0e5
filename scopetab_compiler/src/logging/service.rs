//! Logging service and its sinks

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use crate::config::compile_time::logging::LOG_BUFFER_SIZE;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of a [`Logger`]
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Stderr sink picked from the installed preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };
        Self::new(logger, min_level)
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Plain text on stderr; stdout is reserved for the tables
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", event.format());
    }
}

/// JSON lines on stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", event.format()),
        }
    }
}

/// Forwards events to the `log` facade so a binary can pick its own backend
#[cfg(feature = "log-bridge")]
pub struct LogCrateLogger {
    structured: bool,
}

#[cfg(feature = "log-bridge")]
impl LogCrateLogger {
    pub fn new(structured: bool) -> Self {
        Self { structured }
    }

    fn level_for(level: LogLevel) -> log::Level {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

#[cfg(feature = "log-bridge")]
impl Logger for LogCrateLogger {
    fn log(&self, event: &LogEvent) {
        let level = Self::level_for(event.level);
        if !log::log_enabled!(target: "scopetab", level) {
            return;
        }
        let text = if self.structured {
            event.format_json().unwrap_or_else(|_| event.format())
        } else {
            event.format()
        };
        log::log!(target: "scopetab", level, "{}", text);
    }
}

/// Keeps the most recent events in memory; oldest are dropped past the buffer size
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn warnings(&self) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.is_warning()).cloned().collect()
    }

    pub fn with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.code == code).cloned().collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        if events.len() >= LOG_BUFFER_SIZE {
            let excess = events.len() + 1 - LOG_BUFFER_SIZE;
            events.drain(..excess);
        }
        events.push(event.clone());
    }
}
