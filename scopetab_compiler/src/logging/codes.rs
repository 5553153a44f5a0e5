//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const INVALID_CONFIGURATION: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Token wire-format error codes
pub mod tokens {
    use super::Code;

    pub const MALFORMED_TOKEN_LINE: Code = Code::new("E020");
    pub const INVALID_LINE_NUMBER: Code = Code::new("E021");
    pub const EMPTY_TOKEN_KIND: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const LINE_TOO_LONG: Code = Code::new("E024");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Declaration/reference state machine error codes
pub mod analysis {
    use super::Code;

    pub const UNMATCHED_CLOSE_BRACE: Code = Code::new("E042");
    pub const UNBALANCED_SCOPES: Code = Code::new("E043");
    pub const INCOMPLETE_DECLARATION: Code = Code::new("E044");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E050");
    pub const SCOPE_DEPTH_EXCEEDED: Code = Code::new("E087");
}

/// Reference resolution error codes
pub mod references {
    use super::Code;

    pub const UNDECLARED_REFERENCE: Code = Code::new("E110");
}

/// Warning codes
pub mod warnings {
    use super::Code;

    pub const UNKNOWN_KIND_IGNORED: Code = Code::new("W050");
    pub const SCOPES_FORCE_CLOSED: Code = Code::new("W043");
    pub const LARGE_INPUT: Code = Code::new("W007");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKEN_STREAM_CONSUMED: Code = Code::new("I020");
    pub const ANALYSIS_COMPLETE: Code = Code::new("I070");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTERED: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the token input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "System initialization failure",
        "Check logging and configuration setup",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        false,
        true,
        "Invalid runtime configuration",
        "Fix the configuration file or environment overrides",
    ),
    // File processing
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Token file not found",
        "Verify the input path",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Token file exceeds the size limit",
        "Split the token stream or raise the compile-time limit",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Permission denied reading token file",
        "Check file permissions",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Token file is not valid UTF-8",
        "Re-encode the token file as UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "I/O error while reading tokens",
        "Check the input device or pipe",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Input path is not a regular file",
        "Pass a token file or '-' for standard input",
    ),
    // Tokens
    ErrorMetadata::new(
        "E020",
        "Tokens",
        Severity::Low,
        true,
        false,
        "Token line does not have 2 or 3 comma-separated fields",
        "Use <KIND,VALUE,LINE> or <KIND,LINE>",
    ),
    ErrorMetadata::new(
        "E021",
        "Tokens",
        Severity::Low,
        true,
        false,
        "Token LINE field is not a positive integer",
        "Emit 1-based source line numbers",
    ),
    ErrorMetadata::new(
        "E022",
        "Tokens",
        Severity::Low,
        true,
        false,
        "Token KIND field is empty",
        "Emit a token kind such as TYPE or ID",
    ),
    ErrorMetadata::new(
        "E023",
        "Tokens",
        Severity::High,
        false,
        true,
        "Token value exceeds the identifier length limit",
        "Shorten the identifier",
    ),
    ErrorMetadata::new(
        "E024",
        "Tokens",
        Severity::High,
        false,
        true,
        "Input line exceeds the line length limit",
        "Emit one token per line",
    ),
    ErrorMetadata::new(
        "E027",
        "Tokens",
        Severity::High,
        false,
        true,
        "Token stream exceeds the token count limit",
        "Split the input",
    ),
    // Analysis
    ErrorMetadata::new(
        "E042",
        "Analysis",
        Severity::High,
        false,
        true,
        "Closing brace with no open function scope",
        "Remove the extra '}' or add the missing function header",
    ),
    ErrorMetadata::new(
        "E043",
        "Analysis",
        Severity::High,
        false,
        true,
        "Token stream ended with function scopes still open",
        "Close every function body, or disable require_balanced_scopes",
    ),
    ErrorMetadata::new(
        "E044",
        "Analysis",
        Severity::High,
        false,
        true,
        "Token stream ended in the middle of a declaration",
        "Terminate the declaration with ';' or a function body",
    ),
    ErrorMetadata::new(
        "E050",
        "Analysis",
        Severity::High,
        false,
        true,
        "Token not allowed in the current declaration state",
        "Check the token stream against the declaration grammar",
    ),
    ErrorMetadata::new(
        "E087",
        "Analysis",
        Severity::High,
        false,
        true,
        "Function nesting exceeds the scope depth limit",
        "Reduce nesting or raise analysis.max_scope_depth",
    ),
    ErrorMetadata::new(
        "E110",
        "References",
        Severity::High,
        false,
        true,
        "Identifier used without a visible declaration",
        "Declare the identifier in an enclosing scope before using it",
    ),
    // Warnings
    ErrorMetadata::new(
        "W007",
        "FileProcessing",
        Severity::Low,
        true,
        false,
        "Token file is larger than the large-file threshold",
        "No action required",
    ),
    ErrorMetadata::new(
        "W043",
        "Analysis",
        Severity::Medium,
        true,
        false,
        "Open scopes were archived at end of stream",
        "Balance the braces in the token stream",
    ),
    ErrorMetadata::new(
        "W050",
        "Analysis",
        Severity::Low,
        true,
        false,
        "Token of unknown kind ignored",
        "No action required",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTERED
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_no_duplicate_codes() {
        assert_eq!(get_error_registry().len(), REGISTERED.len());
    }

    #[test]
    fn test_undeclared_reference_is_fatal() {
        let code = references::UNDECLARED_REFERENCE.as_str();
        assert!(requires_halt(code));
        assert!(get_error_metadata(code).is_some_and(|m| !m.recoverable));
        assert_eq!(get_category(code), "References");
    }

    #[test]
    fn test_malformed_line_is_recoverable() {
        let code = tokens::MALFORMED_TOKEN_LINE.as_str();
        assert!(!requires_halt(code));
        assert!(get_error_metadata(code).is_some_and(|m| m.recoverable));
        assert_eq!(get_severity(code), Severity::Low);
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert!(get_error_metadata("NOPE").is_none());
        assert!(!requires_halt("NOPE"));
        assert_eq!(get_action("NOPE"), "No specific action available");
        assert_eq!(get_category("NOPE"), "Unknown");
        assert_eq!(get_severity("NOPE"), Severity::Medium);
    }
}
