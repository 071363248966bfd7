use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{trace, warn};

use super::matcher::KeywordMatcher;
use crate::errors::{ScanError, ScanResult};
use crate::results::{FileError, PartialResult};

// Constants for file scanning
const BUFFER_CAPACITY: usize = 65536;
pub(crate) const SMALL_FILE_THRESHOLD: u64 = 32 * 1024; // 32KB
pub(crate) const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// Maps a read failure to a scan error carrying the affected path
fn read_error(path: &Path, e: std::io::Error) -> ScanError {
    match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::file_not_found(path),
        std::io::ErrorKind::PermissionDenied => ScanError::permission_denied(path),
        std::io::ErrorKind::InvalidData => ScanError::invalid_utf8(path),
        _ => ScanError::IoError(e),
    }
}

/// The display name a file is reported under
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Scans the files of one chunk against a fixed keyword set
#[derive(Debug, Clone)]
pub struct FileScanner {
    matcher: KeywordMatcher,
}

impl FileScanner {
    /// Creates a new FileScanner with the given keyword matcher
    pub fn new(matcher: KeywordMatcher) -> Self {
        Self { matcher }
    }

    /// Scans every file in `chunk`, in order.
    ///
    /// A file that cannot be read is recorded in the partial's error list and
    /// skipped; the rest of the chunk is always attempted. Files are opened
    /// one at a time, so a worker never holds more than one handle.
    pub fn scan_chunk(&self, chunk: &[PathBuf]) -> PartialResult {
        let mut partial = PartialResult::new(self.matcher.keyword_count());

        for path in chunk {
            match self.scan_file(path) {
                Ok(matched) => {
                    let name = file_name(path);
                    for index in matched {
                        partial.record_hit(index, name.clone());
                    }
                }
                Err(e) => {
                    warn!("Failed to scan {}: {}", path.display(), e);
                    partial.record_error(FileError::new(path, e));
                }
            }
        }

        partial
    }

    /// Scans a single file and returns the indices of the keywords it contains
    pub fn scan_file(&self, path: &Path) -> ScanResult<Vec<usize>> {
        trace!("Scanning file: {}", path.display());

        // Choose a read strategy based on file size
        match path.metadata() {
            Ok(metadata) => {
                let size = metadata.len();
                if size < SMALL_FILE_THRESHOLD {
                    self.scan_small_file(path)
                } else if size >= LARGE_FILE_THRESHOLD {
                    self.scan_mmap_file(path)
                } else {
                    self.scan_file_buffered(path)
                }
            }
            Err(e) => {
                warn!("Failed to get metadata for {}: {}", path.display(), e);
                self.scan_file_buffered(path)
            }
        }
    }

    /// Scan a small file by reading it whole
    fn scan_small_file(&self, path: &Path) -> ScanResult<Vec<usize>> {
        let contents = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        Ok(self.matcher.find_matches(&contents))
    }

    /// Scan a file using buffered reading
    fn scan_file_buffered(&self, path: &Path) -> ScanResult<Vec<usize>> {
        let file = File::open(path).map_err(|e| read_error(path, e))?;

        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|e| read_error(path, e))?;

        Ok(self.matcher.find_matches(&contents))
    }

    /// Scan a file through a memory mapping
    fn scan_mmap_file(&self, path: &Path) -> ScanResult<Vec<usize>> {
        let file = File::open(path).map_err(|e| read_error(path, e))?;

        let mmap = unsafe { Mmap::map(&file) }.map_err(ScanError::IoError)?;
        let contents =
            std::str::from_utf8(&mmap).map_err(|_| ScanError::invalid_utf8(path))?;

        Ok(self.matcher.find_matches(contents))
    }
}
