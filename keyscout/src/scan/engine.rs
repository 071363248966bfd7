use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::matcher::KeywordMatcher;
use super::worker::FileScanner;
use crate::config::{ConcurrencyMode, ScanConfig};
use crate::errors::{ScanError, ScanResult};
use crate::filters::has_valid_extension;
use crate::partition::partition;
use crate::results::{PartialResult, ScanSummary};

/// Runs a complete scan over the configured directory.
///
/// The scan enumerates the directory's files, partitions them into one chunk
/// per worker, dispatches the chunks under the configured concurrency mode,
/// and merges the per-worker partials in dispatch order. Elapsed time covers
/// the whole pipeline, from enumeration through the merge.
pub fn scan(config: &ScanConfig) -> ScanResult<ScanSummary> {
    info!(
        "Starting scan of {} with keywords: {:?}",
        config.root_path.display(),
        config.keywords
    );

    let started = Instant::now();

    let files = enumerate_files(&config.root_path, &config.file_extensions)?;
    debug!("Found {} files to scan", files.len());

    let worker_count = config.worker_count.get();
    let chunks = partition(&files, worker_count);
    let matcher = KeywordMatcher::new(config.keywords.clone());

    let partials = match config.mode {
        ConcurrencyMode::SharedMemory => run_shared(&chunks, &matcher, worker_count)?,
        ConcurrencyMode::Isolated => run_isolated(&chunks, &matcher)?,
    };

    let mut summary = ScanSummary::assemble(
        config.keywords.clone(),
        partials,
        files.len(),
        Duration::ZERO,
    );
    // The clock stops only once the merge has produced the summary
    summary.elapsed = started.elapsed();

    info!(
        "Scan complete: {} hits across {} keywords in {} files ({} unreadable)",
        summary.total_hits(),
        summary.hits.len(),
        summary.files_scanned,
        summary.errors.len()
    );

    Ok(summary)
}

/// Collects the regular files directly inside `root`, sorted by name.
///
/// The root must exist, be a directory, and be listable; anything else is
/// fatal. Subdirectories and their contents are not visited. Sorting fixes
/// the enumeration order so that chunk assignment, and therefore the merged
/// output, is identical on every run over the same directory.
fn enumerate_files(root: &Path, extensions: &Option<Vec<String>>) -> ScanResult<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root).map_err(|e| root_error(root, e))?;

    if !metadata.is_dir() {
        return Err(ScanError::not_a_directory(root));
    }

    // The stat above succeeds even on a directory that cannot be listed;
    // only read_dir itself tells us whether the walk can see anything
    std::fs::read_dir(root).map_err(|e| root_error(root, e))?;

    let mut walker = WalkBuilder::new(root);
    walker.max_depth(Some(1)).standard_filters(false);

    let mut files: Vec<PathBuf> = walker
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| has_valid_extension(entry.path(), extensions))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Maps an I/O failure on the scan root to its fatal setup error
fn root_error(root: &Path, e: std::io::Error) -> ScanError {
    match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::directory_not_found(root),
        std::io::ErrorKind::PermissionDenied => ScanError::permission_denied(root),
        _ => ScanError::IoError(e),
    }
}

/// Dispatches chunks onto a dedicated thread pool sized to the worker count.
///
/// Workers borrow the file list and share the parent's address space; the
/// position-preserving `collect` keeps the partials in dispatch order without
/// any locking on the results.
fn run_shared(
    chunks: &[&[PathBuf]],
    matcher: &KeywordMatcher,
    worker_count: usize,
) -> ScanResult<Vec<PartialResult>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_count)
        .thread_name(|index| format!("keyscout-worker-{index}"))
        .build()
        .map_err(|e| ScanError::ThreadPool(e.to_string()))?;

    let scanner = FileScanner::new(matcher.clone());
    let partials = pool.install(|| {
        chunks
            .par_iter()
            .map(|chunk| scanner.scan_chunk(chunk))
            .collect()
    });

    Ok(partials)
}

/// Dispatches each chunk to its own thread with fully owned inputs.
///
/// Nothing is borrowed from the coordinator: every worker gets a copy of its
/// chunk and of the matcher, and the mpsc channel is the only link back. Each
/// worker sends exactly one message, after its whole chunk has been attempted.
fn run_isolated(chunks: &[&[PathBuf]], matcher: &KeywordMatcher) -> ScanResult<Vec<PartialResult>> {
    let (sender, receiver) = mpsc::channel();
    let mut handles = Vec::with_capacity(chunks.len());

    for (index, chunk) in chunks.iter().enumerate() {
        let sender = sender.clone();
        let chunk: Vec<PathBuf> = chunk.to_vec();
        let scanner = FileScanner::new(matcher.clone());

        let handle = thread::Builder::new()
            .name(format!("keyscout-worker-{index}"))
            .spawn(move || {
                let partial = scanner.scan_chunk(&chunk);
                // The parent may already be gone if another worker failed;
                // a closed channel is not this worker's problem
                let _ = sender.send((index, partial));
            })
            .map_err(ScanError::IoError)?;

        handles.push(handle);
    }
    drop(sender);

    collect_partials(receiver, handles)
}

/// Drains one message per dispatched worker and restores dispatch order.
///
/// A worker that dies without sending its result surfaces as `WorkerLost`
/// carrying the worker's index.
fn collect_partials(
    receiver: Receiver<(usize, PartialResult)>,
    handles: Vec<JoinHandle<()>>,
) -> ScanResult<Vec<PartialResult>> {
    let expected = handles.len();
    let mut slots: Vec<Option<PartialResult>> = vec![None; expected];

    for _ in 0..expected {
        match receiver.recv() {
            Ok((index, partial)) => slots[index] = Some(partial),
            // Every sender is gone: at least one worker died before
            // delivering. The join loop below names the culprit.
            Err(_) => break,
        }
    }

    for (index, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            return Err(ScanError::worker_lost(index));
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or_else(|| ScanError::worker_lost(index)))
        .collect()
}
