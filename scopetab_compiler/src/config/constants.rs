pub mod compile_time {
    pub mod file_processing {
        /// Maximum token file size accepted for processing (10MB)
        /// SECURITY: Prevents memory exhaustion via huge inputs
        pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

        /// Threshold for considering a token file "large" (1MB)
        /// PERFORMANCE: Large files are logged with a warning
        pub const LARGE_FILE_THRESHOLD: u64 = 1024 * 1024;
    }

    pub mod tokens {
        /// Maximum number of tokens consumed from a single input
        /// SECURITY: Prevents DoS via token explosion
        pub const MAX_TOKEN_COUNT: usize = 1_000_000;

        /// Maximum identifier / type-name length carried in a VALUE field
        /// SECURITY: Prevents memory attacks via huge identifiers
        pub const MAX_IDENTIFIER_LENGTH: usize = 255;

        /// Maximum length of a single physical input line
        /// SECURITY: Bounds per-line parsing work
        pub const MAX_LINE_LENGTH: usize = 64 * 1024;
    }

    pub mod scopes {
        /// Hard ceiling for nested function scopes, global included
        /// SECURITY: Prevents unbounded stack growth
        pub const MAX_SCOPE_DEPTH: usize = 256;

        /// Default depth limit when no preference overrides it
        pub const DEFAULT_SCOPE_DEPTH: usize = 64;
    }

    pub mod logging {
        /// Log buffer size for batch operations
        /// RESOURCE: Controls memory usage for logging
        pub const LOG_BUFFER_SIZE: usize = 10_000;

        /// Maximum log message length
        /// RESOURCE: Prevents memory attacks via huge messages
        pub const MAX_LOG_MESSAGE_LENGTH: usize = 10_000;

        /// Maximum log events recorded per input before truncation
        /// SECURITY: Prevents DoS via log event explosion
        pub const MAX_LOG_EVENTS_PER_FILE: usize = 1_000;
    }
}
