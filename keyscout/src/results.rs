/// This module implements scan result types, demonstrating how Rust's ownership
/// system shapes the way concurrent results are collected.
///
/// # Owned Merging vs Shared Mutation
///
/// .NET typically collects concurrent results in a shared dictionary:
/// ```csharp
/// var results = new ConcurrentDictionary<string, List<string>>();
/// Parallel.ForEach(chunks, chunk => {
///     foreach (var hit in Scan(chunk))
///         results.GetOrAdd(hit.Keyword, _ => new()).Add(hit.File);
///     // Insertion order now depends on thread scheduling
/// });
/// ```
///
/// Rust makes it natural to do the opposite: each worker owns a `PartialResult`
/// outright, and the coordinator merges the partials after the fact, in the
/// order the workers were dispatched:
/// ```rust,ignore
/// let partials: Vec<PartialResult> = run_workers(chunks);
/// let summary = ScanSummary::assemble(keywords, partials, files, elapsed);
/// ```
///
/// No locks, no contention, and the merged output is identical on every run
/// regardless of which worker finished first.
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// A single file that could not be scanned
#[derive(Debug, Clone, Serialize)]
pub struct FileError {
    /// The file the failure applies to
    pub path: PathBuf,
    /// Human-readable reason the file was skipped
    pub reason: String,
}

impl FileError {
    /// Creates a file error from any displayable failure
    pub fn new(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// One worker's results, scoped to the chunk it was handed
///
/// Hits are indexed by keyword position rather than keyword text so that
/// duplicate keywords in the configuration stay independent entries.
#[derive(Debug, Clone, Default)]
pub struct PartialResult {
    /// File names containing each keyword, indexed by keyword position
    pub hits: Vec<Vec<String>>,
    /// Files in this chunk that could not be scanned
    pub errors: Vec<FileError>,
}

impl PartialResult {
    /// Creates an empty partial result for the given number of keywords
    pub fn new(keyword_count: usize) -> Self {
        Self {
            hits: vec![Vec::new(); keyword_count],
            errors: Vec::new(),
        }
    }

    /// Records a file under the keyword at `index`
    pub fn record_hit(&mut self, index: usize, file_name: String) {
        self.hits[index].push(file_name);
    }

    /// Records a file that could not be scanned
    pub fn record_error(&mut self, error: FileError) {
        self.errors.push(error);
    }

    /// Total number of (keyword, file) hits in this partial
    pub fn hit_count(&self) -> usize {
        self.hits.iter().map(Vec::len).sum()
    }
}

/// All files containing one keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHits {
    /// The keyword as configured
    pub keyword: String,
    /// Names of the files containing it, in scan order
    pub files: Vec<String>,
}

/// The complete, merged outcome of a scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// One entry per configured keyword, in configuration order
    pub hits: Vec<KeywordHits>,
    /// Total number of files the scan attempted
    pub files_scanned: usize,
    /// Wall-clock time for the scan, from enumeration through the merge
    pub elapsed: Duration,
    /// Files that could not be scanned; never fatal
    pub errors: Vec<FileError>,
}

impl ScanSummary {
    /// Merges per-worker partials into a single summary.
    ///
    /// Partials must be supplied in worker dispatch order; each keyword's file
    /// list is then the concatenation worker 0, worker 1, and so on, which keeps
    /// the output independent of completion timing.
    pub fn assemble(
        keywords: Vec<String>,
        partials: Vec<PartialResult>,
        files_scanned: usize,
        elapsed: Duration,
    ) -> Self {
        let mut hits: Vec<KeywordHits> = keywords
            .into_iter()
            .map(|keyword| KeywordHits {
                keyword,
                files: Vec::new(),
            })
            .collect();
        let mut errors = Vec::new();

        for partial in partials {
            for (entry, files) in hits.iter_mut().zip(partial.hits) {
                entry.files.extend(files);
            }
            errors.extend(partial.errors);
        }

        Self {
            hits,
            files_scanned,
            elapsed,
            errors,
        }
    }

    /// Files containing `keyword`, if it is part of this scan
    pub fn files_for(&self, keyword: &str) -> Option<&[String]> {
        self.hits
            .iter()
            .find(|entry| entry.keyword == keyword)
            .map(|entry| entry.files.as_slice())
    }

    /// Total number of (keyword, file) hits across all keywords
    pub fn total_hits(&self) -> usize {
        self.hits.iter().map(|entry| entry.files.len()).sum()
    }

    /// Number of keywords that matched at least one file
    pub fn keywords_with_hits(&self) -> usize {
        self.hits
            .iter()
            .filter(|entry| !entry.files.is_empty())
            .count()
    }
}
