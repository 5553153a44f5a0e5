//! Token file loading
//!
//! Size limits are compile-time constants; there is no runtime override.

mod processor;

pub use processor::{process_file, FileMetadata, FileProcessorError, LoadedFile};

use crate::config::constants::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE,
};
use crate::log_debug;

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

/// Check that every code this module reports is registered (system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    use crate::logging::codes;

    let required = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::warnings::LARGE_INPUT,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor limits loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_are_consistent() {
        assert!(get_large_file_threshold() > 0);
        assert!(get_large_file_threshold() <= get_max_file_size());
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
