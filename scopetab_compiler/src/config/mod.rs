//! Configuration module for scopetab
//!
//! Hard limits live in [`constants::compile_time`] and cannot be changed at
//! runtime. User preferences live in [`runtime`] and come from environment
//! variables or a TOML file.

pub mod constants;
pub mod runtime;

pub use constants::compile_time;
pub use runtime::{
    AnalysisPreferences, ConfigError, InputPreferences, LogLevel, LoggingPreferences,
    OutputFormat, OutputPreferences, RuntimeConfig,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        if cfg!(debug_assertions) {
            "development"
        } else {
            "release"
        }
    }

    /// Returns the crate version baked in at compile time
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("scopetab {} ({} profile)", version(), profile())
    }
}
