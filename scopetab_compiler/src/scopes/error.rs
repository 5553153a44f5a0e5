//! Scope stack errors

/// Result type for scope stack operations
pub type ScopeResult<T> = Result<T, ScopeError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("Closing brace at line {line} with no open function scope")]
    UnmatchedCloseBrace { line: u32 },

    #[error("Opening a scope at line {line} exceeds the maximum depth of {max}")]
    ScopeDepthExceeded { line: u32, max: usize },
}

impl ScopeError {
    pub fn line(&self) -> u32 {
        match self {
            Self::UnmatchedCloseBrace { line } | Self::ScopeDepthExceeded { line, .. } => *line,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::codes::Code {
        use crate::logging::codes;
        match self {
            Self::UnmatchedCloseBrace { .. } => codes::analysis::UNMATCHED_CLOSE_BRACE,
            Self::ScopeDepthExceeded { .. } => codes::analysis::SCOPE_DEPTH_EXCEEDED,
        }
    }
}
