//! Error types for the declaration/reference pass

use super::state::State;
use crate::scopes::ScopeError;

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Every variant is fatal to the run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Reference to a non declared variable {identifier} at line: {line}")]
    UndeclaredReference { identifier: String, line: u32 },

    #[error("Unexpected {kind} token at line {line} in state '{state}'")]
    UnexpectedToken {
        kind: String,
        state: State,
        line: u32,
    },

    #[error("{kind} token at line {line} has no value")]
    MissingTokenValue { kind: String, line: u32 },

    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error("Token stream ended with {open} function scope(s) still open")]
    UnbalancedScopes { open: usize },

    #[error("Token stream ended inside a declaration (state '{state}')")]
    IncompleteDeclaration { state: State },

    #[error("Machine already failed; create a new one to analyze another stream")]
    MachinePoisoned,

    #[error("Internal analysis error: {message}")]
    Internal { message: String },
}

impl AnalysisError {
    pub fn undeclared_reference(identifier: &str, line: u32) -> Self {
        Self::UndeclaredReference {
            identifier: identifier.to_string(),
            line,
        }
    }

    pub fn unexpected_token(kind: &str, state: State, line: u32) -> Self {
        Self::UnexpectedToken {
            kind: kind.to_string(),
            state,
            line,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Source line of the offending token, where one exists
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::UndeclaredReference { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::MissingTokenValue { line, .. } => Some(*line),
            Self::Scope(error) => Some(error.line()),
            _ => None,
        }
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        crate::logging::codes::requires_halt(self.error_code().as_str())
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::codes::Code {
        use crate::logging::codes;
        match self {
            Self::UndeclaredReference { .. } => codes::references::UNDECLARED_REFERENCE,
            Self::UnexpectedToken { .. } | Self::MissingTokenValue { .. } => {
                codes::analysis::UNEXPECTED_TOKEN
            }
            Self::Scope(error) => error.error_code(),
            Self::UnbalancedScopes { .. } => codes::analysis::UNBALANCED_SCOPES,
            Self::IncompleteDeclaration { .. } => codes::analysis::INCOMPLETE_DECLARATION,
            Self::MachinePoisoned | Self::Internal { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}
