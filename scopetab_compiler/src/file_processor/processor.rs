//! Token file loading with size limits and global logging integration

use crate::config::constants::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE,
};
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    fn from_io(path: &Path, error: &std::io::Error) -> Self {
        match error.kind() {
            ErrorKind::NotFound => Self::FileNotFound {
                path: path.display().to_string(),
            },
            ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.display().to_string(),
            },
            ErrorKind::InvalidData => Self::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => Self::IoError {
                message: format!("{}: {}", path.display(), error),
            },
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            Self::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            Self::PermissionDenied { .. } => codes::file_processing::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            Self::IoError { .. } => codes::file_processing::IO_ERROR,
            Self::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    pub line_count: usize,
}

impl FileMetadata {
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// Token file contents plus what was learned loading them
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub content: String,
    pub metadata: FileMetadata,
    pub load_duration: Duration,
}

/// Validate and read one token file
pub fn process_file(file_path: &str) -> Result<LoadedFile, FileProcessorError> {
    let start = Instant::now();
    log_debug!("Loading token file", "file" => file_path);

    let path = validate_path(file_path)?;

    let size = fs::metadata(&path)
        .map_err(|e| report(FileProcessorError::from_io(&path, &e)))?
        .len();
    if size > MAX_FILE_SIZE {
        return Err(report(FileProcessorError::FileTooLarge {
            size,
            max_size: MAX_FILE_SIZE,
        }));
    }

    let content =
        fs::read_to_string(&path).map_err(|e| report(FileProcessorError::from_io(&path, &e)))?;

    let metadata = FileMetadata {
        path,
        size,
        line_count: content.lines().count(),
    };

    if metadata.is_large_file() {
        log_warning!(code = codes::warnings::LARGE_INPUT, "Large token file",
            "file" => file_path,
            "size_bytes" => size
        );
    }

    let load_duration = start.elapsed();
    log_success!(codes::success::FILE_PROCESSING_SUCCESS, "Token file loaded",
        "file" => file_path,
        "size_bytes" => size,
        "lines" => metadata.line_count,
        "duration_ms" => format!("{:.2}", load_duration.as_secs_f64() * 1000.0)
    );

    Ok(LoadedFile {
        content,
        metadata,
        load_duration,
    })
}

fn report(error: FileProcessorError) -> FileProcessorError {
    log_error!(error.error_code(), &error.to_string());
    error
}

fn validate_path(file_path: &str) -> Result<PathBuf, FileProcessorError> {
    if file_path.is_empty() {
        return Err(report(FileProcessorError::InvalidPath {
            path: file_path.to_string(),
        }));
    }

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(report(FileProcessorError::FileNotFound {
            path: file_path.to_string(),
        }));
    }
    if !path.is_file() {
        return Err(report(FileProcessorError::InvalidPath {
            path: file_path.to_string(),
        }));
    }

    path.canonicalize()
        .map_err(|e| report(FileProcessorError::from_io(path, &e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_reads_file_and_counts_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prog.tokens");
        fs::write(&path, "<TYPE,int,1><ID,x,1><SEMICOLON,1>\n<ID,x,2>\n").unwrap();

        let loaded = process_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.metadata.line_count, 2);
        assert_eq!(loaded.metadata.size, loaded.content.len() as u64);
        assert!(loaded.content.starts_with("<TYPE,int,1>"));
        assert!(!loaded.metadata.is_large_file());
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.tokens");
        fs::write(&path, "").unwrap();

        let loaded = process_file(path.to_str().unwrap()).unwrap();
        assert!(loaded.content.is_empty());
        assert_eq!(loaded.metadata.line_count, 0);
    }

    #[test]
    fn test_missing_file() {
        let error = process_file("/definitely/not/here.tokens").unwrap_err();
        assert_matches!(error, FileProcessorError::FileNotFound { .. });
        assert_eq!(error.error_code().as_str(), "E005");
        assert!(error.requires_halt());
    }

    #[test]
    fn test_directory_and_empty_path_rejected() {
        let dir = tempdir().unwrap();
        assert_matches!(
            process_file(dir.path().to_str().unwrap()),
            Err(FileProcessorError::InvalidPath { .. })
        );
        assert_matches!(process_file(""), Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.tokens");
        fs::write(&path, [0x3c, 0xff, 0xfe, 0x3e]).unwrap();

        assert_matches!(
            process_file(path.to_str().unwrap()),
            Err(FileProcessorError::InvalidEncoding { .. })
        );
    }
}
