//! Error types for the token wire format

/// Result type for token reading
pub type TokenResult<T> = Result<T, TokenFormatError>;

/// Token wire-format errors
///
/// The first group describes one bad token group and is skipped by the
/// reader. The limit and I/O variants end the stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenFormatError {
    #[error("Expected 2 or 3 comma-separated fields, found {found} in '{text}'")]
    WrongFieldCount { text: String, found: usize },

    #[error("Invalid line number '{field}' in '{text}'")]
    InvalidLineNumber { text: String, field: String },

    #[error("Empty token kind in '{text}'")]
    EmptyKind { text: String },

    #[error("Token kind {kind} requires a value in '{text}'")]
    MissingValue { kind: String, text: String },

    #[error("Stray text '{text}' outside a <...> token group")]
    StrayText { text: String },

    #[error("Identifier of {length} bytes at line {line} exceeds limit of {max}")]
    IdentifierTooLong { line: u32, length: usize, max: usize },

    #[error("Input line {input_line} is {length} bytes, exceeds limit of {max}")]
    LineTooLong {
        input_line: usize,
        length: usize,
        max: usize,
    },

    #[error("Token stream exceeds limit of {max} tokens")]
    TooManyTokens { max: usize },

    #[error("I/O error reading tokens at input line {input_line}: {message}")]
    Io { input_line: usize, message: String },
}

impl TokenFormatError {
    pub fn wrong_field_count(text: &str, found: usize) -> Self {
        Self::WrongFieldCount {
            text: text.to_string(),
            found,
        }
    }

    pub fn invalid_line_number(text: &str, field: &str) -> Self {
        Self::InvalidLineNumber {
            text: text.to_string(),
            field: field.to_string(),
        }
    }

    pub fn empty_kind(text: &str) -> Self {
        Self::EmptyKind {
            text: text.to_string(),
        }
    }

    pub fn missing_value(kind: &str, text: &str) -> Self {
        Self::MissingValue {
            kind: kind.to_string(),
            text: text.to_string(),
        }
    }

    pub fn stray_text(text: &str) -> Self {
        Self::StrayText {
            text: text.to_string(),
        }
    }

    pub fn io(input_line: usize, error: &std::io::Error) -> Self {
        Self::Io {
            input_line,
            message: error.to_string(),
        }
    }

    /// Malformed groups are skipped; everything else ends the stream
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::WrongFieldCount { .. }
                | Self::InvalidLineNumber { .. }
                | Self::EmptyKind { .. }
                | Self::MissingValue { .. }
                | Self::StrayText { .. }
        )
    }

    /// Check if this error requires halting
    pub fn requires_halt(&self) -> bool {
        crate::logging::codes::requires_halt(self.error_code().as_str())
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> crate::logging::codes::Code {
        use crate::logging::codes;
        match self {
            Self::WrongFieldCount { .. } | Self::MissingValue { .. } | Self::StrayText { .. } => {
                codes::tokens::MALFORMED_TOKEN_LINE
            }
            Self::InvalidLineNumber { .. } => codes::tokens::INVALID_LINE_NUMBER,
            Self::EmptyKind { .. } => codes::tokens::EMPTY_TOKEN_KIND,
            Self::IdentifierTooLong { .. } => codes::tokens::IDENTIFIER_TOO_LONG,
            Self::LineTooLong { .. } => codes::tokens::LINE_TOO_LONG,
            Self::TooManyTokens { .. } => codes::tokens::TOO_MANY_TOKENS,
            Self::Io { .. } => codes::file_processing::IO_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_matches_code_registry() {
        let skipped = TokenFormatError::wrong_field_count("<ID>", 1);
        assert!(skipped.is_recoverable());
        assert!(!skipped.requires_halt());

        let fatal = TokenFormatError::TooManyTokens { max: 10 };
        assert!(!fatal.is_recoverable());
        assert!(fatal.requires_halt());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TokenFormatError::invalid_line_number("<ID,x,a>", "a")
                .error_code()
                .as_str(),
            "E021"
        );
        assert_eq!(
            TokenFormatError::empty_kind("<,1>").error_code().as_str(),
            "E022"
        );
    }
}
