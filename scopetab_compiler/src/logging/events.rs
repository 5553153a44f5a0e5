//! Log events: a coded message, the token line it concerns, and key/value context

use super::codes::{self, Code};
use std::collections::BTreeMap;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    /// Source line of the token the event is about, if any
    pub line: Option<u32>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn with_level(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            code,
            message: message.to_string(),
            line: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Error, code, message)
    }

    /// Uncoded warnings are filed under `W000`
    pub fn warning(message: &str) -> Self {
        Self::with_level(LogLevel::Warning, Code::new("W000"), message)
    }

    pub fn warning_with_code(code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Warning, code, message)
    }

    pub fn info(message: &str) -> Self {
        Self::with_level(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info-level event carrying an `I` code
    pub fn success(code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Info, code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::with_level(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }

    /// One-line rendering: `[LEVEL] CODE - message at line N k=v ...`
    pub fn format(&self) -> String {
        let mut output = format!("[{}] {} - {}", self.level.as_str(), self.code, self.message);
        if let Some(line) = self.line {
            output.push_str(&format!(" at line {}", line));
        }
        for (key, value) in &self.context {
            output.push_str(&format!(" {}={}", key, value));
        }
        output
    }

    /// JSON-lines rendering; errors also carry their registry metadata
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let timestamp = self
            .timestamp
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let code = self.code.as_str();

        let mut json = serde_json::json!({
            "timestamp": timestamp,
            "level": self.level.as_str(),
            "code": code,
            "message": self.message,
            "category": codes::get_category(code),
        });

        if self.is_error() {
            json["severity"] = serde_json::json!(codes::get_severity(code).as_str());
            json["requires_halt"] = serde_json::json!(codes::requires_halt(code));
            json["help"] = serde_json::json!(codes::get_action(code));
        }
        if let Some(line) = self.line {
            json["line"] = serde_json::json!(line);
        }
        if !self.context.is_empty() {
            json["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&json)
    }
}
