//! Scope-structured symbol table and reference resolution over a token stream

#[macro_use]
pub mod logging;

pub mod analysis;
pub mod config;
pub mod file_processor;
pub mod output;
pub mod pipeline;
pub mod scopes;
pub mod tokens;

// Re-export key types for library consumers
pub use analysis::{AnalysisError, AnalysisResult, State, SymbolTableMachine};
pub use config::RuntimeConfig;
pub use output::{AnalysisOutput, AnalysisReport};
pub use pipeline::{PipelineError, PipelineResult};
pub use scopes::{Declaration, DeclarationKind, Reference, Scope, ScopeStack};
pub use tokens::{Token, TokenKind, TokenReader};
