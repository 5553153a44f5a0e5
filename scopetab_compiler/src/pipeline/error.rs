use crate::analysis::AnalysisError;
use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::tokens::TokenFormatError;

/// Pipeline processing errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Token stream rejected: {0}")]
    TokenStream(#[from] TokenFormatError),

    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::TokenStream(error) => error.error_code(),
            Self::Analysis(error) => error.error_code(),
            Self::Config(_) => codes::system::INVALID_CONFIGURATION,
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Source line of the offending token, where one exists
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Analysis(error) => error.line(),
            Self::TokenStream(TokenFormatError::IdentifierTooLong { line, .. }) => Some(*line),
            _ => None,
        }
    }
}
