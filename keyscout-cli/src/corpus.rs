//! Random text corpus generation.
//!
//! `keyscout generate` fills a directory with synthetic text files so the
//! scanner has something realistic to chew on. Sentences are assembled from a
//! fixed word pool, and [`random_keywords`] draws from the same pool, so a
//! scan with randomly picked keywords always has a chance of hitting.

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Word pool shared by sentence generation and random keyword selection.
const WORDS: &[&str] = &[
    "system", "network", "error", "data", "file", "process", "thread", "memory",
    "server", "client", "request", "response", "message", "packet", "buffer", "stream",
    "window", "table", "garden", "river", "mountain", "forest", "island", "valley",
    "silver", "copper", "marble", "timber", "canvas", "letter", "journal", "ledger",
    "quick", "bright", "silent", "hidden", "frozen", "golden", "broken", "sealed",
    "travel", "gather", "listen", "wander", "measure", "repair", "signal", "search",
    "morning", "evening", "winter", "summer", "harvest", "lantern", "harbor", "meadow",
    "keyword", "pattern", "record", "archive", "index", "volume", "chapter", "margin",
];

const WORDS_PER_SENTENCE: usize = 10;

/// Picks `count` random words from the pool; duplicates are possible.
pub fn random_keywords(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())].to_string())
        .collect()
}

fn random_sentence(rng: &mut impl Rng) -> String {
    let words: Vec<&str> = (0..WORDS_PER_SENTENCE)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect();

    let mut sentence = words.join(" ");
    // The pool is all-lowercase ASCII, so this is a single-byte slice
    if let Some(first) = sentence.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

/// Writes `file_count` files of `lines_per_file` sentences each under `dir`,
/// creating the directory if needed.
pub fn generate(dir: &Path, file_count: usize, lines_per_file: usize) -> io::Result<()> {
    fs::create_dir_all(dir)?;

    let bar = ProgressBar::new(file_count as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("█▓▒░ "),
    );
    bar.set_message("Generating corpus");

    let mut rng = rand::rng();
    for i in 0..file_count {
        let path = dir.join(format!("random_text_{}.txt", i));
        let mut writer = BufWriter::new(File::create(&path)?);
        for _ in 0..lines_per_file {
            writeln!(writer, "{}", random_sentence(&mut rng))?;
        }
        writer.flush()?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    info!(
        "Generated {} files with {} sentences each in {}",
        file_count,
        lines_per_file,
        dir.display()
    );
    Ok(())
}
