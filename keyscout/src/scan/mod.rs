/// This module implements concurrent keyword scanning, demonstrating two Rust
/// concurrency models side by side and how they compare to .NET's Task Parallel
/// Library (TPL).
///
/// # Two Ways to Split the Same Work
///
/// Both modes partition the file list into one contiguous chunk per worker and
/// produce identical output; they differ only in how workers relate to the
/// coordinator's memory.
///
/// **Shared memory.** In .NET you would reach for the TPL:
/// ```csharp
/// Parallel.ForEach(chunks, new ParallelOptions { MaxDegreeOfParallelism = workers },
///     chunk => partials[chunk.Index] = ScanChunk(chunk));
/// ```
/// In Rust, Rayon's work-stealing pool does the same with borrowed data, and
/// the borrow checker proves no worker mutates what another reads:
/// ```rust,ignore
/// let partials: Vec<PartialResult> = pool.install(|| {
///     chunks.par_iter().map(|chunk| scanner.scan_chunk(chunk)).collect()
/// });
/// ```
/// The indexed `collect` preserves dispatch order, so no locks or concurrent
/// maps are needed on the result path.
///
/// **Isolation.** The .NET analogue is one task per worker with a channel:
/// ```csharp
/// var channel = Channel.CreateUnbounded<(int, Partial)>();
/// foreach (var (i, chunk) in chunks.Index())
///     Task.Run(() => channel.Writer.WriteAsync((i, ScanChunk(Copy(chunk)))));
/// ```
/// In Rust, each worker thread takes ownership of a copy of its inputs and an
/// `mpsc` sender is the only object shared with the parent:
/// ```rust,ignore
/// thread::Builder::new().spawn(move || {
///     let partial = scanner.scan_chunk(&chunk); // chunk is owned here
///     let _ = sender.send((index, partial));    // exactly one message
/// })
/// ```
/// The coordinator drains one message per worker, then joins every handle so a
/// crashed worker is reported rather than silently missing from the output.
///
/// # Error Handling
///
/// A file that cannot be read never fails the scan; it is recorded in the
/// worker's partial and reported alongside the results. Only setup faults
/// (missing directory, unbuildable pool) and lost workers abort the pipeline:
/// ```rust,ignore
/// match scan(&config) {
///     Ok(summary) => // Merged hits, per-file errors included as data,
///     Err(ScanError::WorkerLost { index }) => // A worker died mid-scan,
///     Err(e) => // Setup failed before any work was dispatched
/// }
/// ```
pub mod engine;
pub mod matcher;
pub mod worker;

pub use engine::scan;
pub use matcher::KeywordMatcher;
pub use worker::FileScanner;
