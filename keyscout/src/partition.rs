//! Splits an ordered file list into contiguous per-worker chunks.
//!
//! The split is deterministic: `len / worker_count` files per chunk, with the
//! last chunk absorbing the remainder. Concatenating the chunks always yields
//! the original list, so merge order downstream follows enumeration order.

use std::path::PathBuf;

/// Divides `files` into exactly `worker_count` contiguous chunks.
///
/// Every chunk but the last holds `files.len() / worker_count` entries; the
/// last holds whatever remains. When there are fewer files than workers the
/// leading chunks are empty and the final chunk holds all files. A zero
/// worker count is treated as one.
pub fn partition(files: &[PathBuf], worker_count: usize) -> Vec<&[PathBuf]> {
    let worker_count = worker_count.max(1);
    let base = files.len() / worker_count;

    (0..worker_count)
        .map(|index| {
            let start = index * base;
            let end = if index + 1 == worker_count {
                files.len()
            } else {
                start + base
            };
            &files[start..end]
        })
        .collect()
}
