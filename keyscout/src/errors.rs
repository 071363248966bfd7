/// This module defines custom error types for keyscout, demonstrating Rust's error handling
/// compared to .NET's exception system.
///
/// # Rust vs .NET Error Handling
///
/// .NET uses exceptions for error handling:
/// ```csharp
/// try {
///     var scanner = new DirectoryScanner();
///     scanner.Scan(keywords);
/// } catch (DirectoryNotFoundException ex) {
///     // Handle missing directory
/// } catch (UnauthorizedAccessException ex) {
///     // Handle permission error
/// } catch (Exception ex) {
///     // Handle other errors
/// }
/// ```
///
/// Rust uses Result types with custom errors:
/// ```rust,ignore
/// match scan(&config) {
///     Ok(summary) => // Process summary,
///     Err(ScanError::DirectoryNotFound(path)) => // Handle missing directory,
///     Err(ScanError::PermissionDenied(path)) => // Handle permission error,
///     Err(e) => // Handle other errors
/// }
/// ```
///
/// A second distinction matters here: errors that abort a scan are kept apart from
/// errors that only affect a single file. The former travel through `Result`; the
/// latter are recorded as data inside the scan's output so one unreadable file
/// never costs the caller the rest of the directory.
use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can abort a scan
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("Invalid UTF-8 in file: {}", .0.display())]
    InvalidUtf8(PathBuf),
    #[error("Worker {index} exited without reporting a result")]
    WorkerLost { index: usize },
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScanError {
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound(path.into())
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory(path.into())
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn invalid_utf8(path: impl Into<PathBuf>) -> Self {
        Self::InvalidUtf8(path.into())
    }

    pub fn worker_lost(index: usize) -> Self {
        Self::WorkerLost { index }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
