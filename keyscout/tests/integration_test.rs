use anyhow::Result;
use keyscout::scan::scan;
use keyscout::scan::{FileScanner, KeywordMatcher};
use keyscout::{partition::partition, ConcurrencyMode, ScanConfig, ScanError};
use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Instant;
use tempfile::tempdir;

/// Writes `file_count` files named file_<i>.txt. Every file mentions "alpha",
/// every third file mentions "beta", and file_7 alone mentions "gamma".
fn create_test_files(dir: &tempfile::TempDir, file_count: usize) -> Result<()> {
    for i in 0..file_count {
        let file_path = dir.path().join(format!("file_{i:03}.txt"));
        let mut file = File::create(file_path)?;
        writeln!(file, "Line one of file {i} mentions alpha as always")?;
        if i % 3 == 0 {
            writeln!(file, "Line two of file {i} mentions beta sometimes")?;
        }
        if i == 7 {
            writeln!(file, "Line three mentions gamma exactly once")?;
        }
        writeln!(file, "A closing line with nothing of interest")?;
    }
    Ok(())
}

fn config_for(root: &Path, keywords: &[&str], workers: usize, mode: ConcurrencyMode) -> ScanConfig {
    ScanConfig {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        root_path: root.to_path_buf(),
        file_extensions: None,
        worker_count: NonZeroUsize::new(workers).unwrap(),
        mode,
        log_level: "warn".to_string(),
    }
}

#[test]
fn test_three_files_two_workers() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "alpha")?;
    std::fs::write(dir.path().join("b.txt"), "alpha beta")?;
    std::fs::write(dir.path().join("c.txt"), "beta")?;

    // Worker 0 takes [a.txt], worker 1 takes [b.txt, c.txt]
    let config = config_for(
        dir.path(),
        &["alpha", "beta"],
        2,
        ConcurrencyMode::SharedMemory,
    );
    let summary = scan(&config)?;

    assert_eq!(summary.files_scanned, 3);
    assert_eq!(
        summary.files_for("alpha"),
        Some(&["a.txt".to_string(), "b.txt".to_string()][..])
    );
    assert_eq!(
        summary.files_for("beta"),
        Some(&["b.txt".to_string(), "c.txt".to_string()][..])
    );
    Ok(())
}

#[test]
fn test_exact_attribution_across_corpus() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 30)?;

    for mode in [ConcurrencyMode::SharedMemory, ConcurrencyMode::Isolated] {
        let config = config_for(dir.path(), &["alpha", "beta", "gamma", "delta"], 4, mode);
        let summary = scan(&config)?;

        assert_eq!(summary.files_scanned, 30);
        assert_eq!(summary.files_for("alpha").unwrap().len(), 30);
        assert_eq!(summary.files_for("beta").unwrap().len(), 10);
        assert_eq!(
            summary.files_for("gamma"),
            Some(&["file_007.txt".to_string()][..])
        );
        assert_eq!(summary.files_for("delta"), Some(&[][..]));
        assert!(summary.errors.is_empty());

        // File lists follow enumeration order
        let alpha_files = summary.files_for("alpha").unwrap();
        let mut sorted = alpha_files.to_vec();
        sorted.sort();
        assert_eq!(alpha_files, &sorted[..]);
    }
    Ok(())
}

#[test]
fn test_repeated_scans_are_deterministic() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 25)?;

    for mode in [ConcurrencyMode::SharedMemory, ConcurrencyMode::Isolated] {
        let config = config_for(dir.path(), &["alpha", "beta"], 4, mode);

        let baseline = scan(&config)?;
        for _ in 0..4 {
            let repeat = scan(&config)?;
            assert_eq!(repeat.hits, baseline.hits);
            assert_eq!(repeat.files_scanned, baseline.files_scanned);
        }
    }
    Ok(())
}

#[test]
fn test_modes_agree_across_worker_counts() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 17)?;

    for workers in [1, 2, 4, 8, 32] {
        let shared = scan(&config_for(
            dir.path(),
            &["alpha", "beta", "gamma"],
            workers,
            ConcurrencyMode::SharedMemory,
        ))?;
        let isolated = scan(&config_for(
            dir.path(),
            &["alpha", "beta", "gamma"],
            workers,
            ConcurrencyMode::Isolated,
        ))?;

        assert_eq!(
            shared.hits, isolated.hits,
            "modes diverged at {workers} workers"
        );
    }
    Ok(())
}

#[test]
fn test_empty_directory_yields_empty_summary() -> Result<()> {
    let dir = tempdir()?;

    let config = config_for(dir.path(), &["alpha"], 4, ConcurrencyMode::Isolated);
    let summary = scan(&config)?;

    assert_eq!(summary.files_scanned, 0);
    assert_eq!(summary.hits.len(), 1);
    assert!(summary.hits[0].files.is_empty());
    assert!(summary.errors.is_empty());
    Ok(())
}

#[test]
fn test_missing_directory_fails() {
    let config = config_for(
        Path::new("definitely_not_a_real_directory"),
        &["alpha"],
        2,
        ConcurrencyMode::SharedMemory,
    );

    match scan(&config) {
        Err(ScanError::DirectoryNotFound(path)) => {
            assert_eq!(path, Path::new("definitely_not_a_real_directory"));
        }
        other => panic!("expected DirectoryNotFound, got {other:?}"),
    }
}

#[test]
fn test_file_as_root_fails() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("plain.txt");
    std::fs::write(&file, "contents")?;

    let config = config_for(&file, &["alpha"], 2, ConcurrencyMode::Isolated);
    assert!(matches!(scan(&config), Err(ScanError::NotADirectory(_))));
    Ok(())
}

#[test]
#[cfg(unix)] // chmod requires Unix
fn test_unreadable_directory_fails() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "alpha")?;
    std::fs::write(dir.path().join("b.txt"), "alpha")?;
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o000))?;

    // Privileged users can list the directory regardless of its mode
    if std::fs::read_dir(dir.path()).is_ok() {
        std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let config = config_for(dir.path(), &["alpha"], 2, ConcurrencyMode::SharedMemory);
    let result = scan(&config);

    // Restore permissions before assertions (for cleanup)
    std::fs::set_permissions(dir.path(), std::fs::Permissions::from_mode(0o755))?;

    match result {
        Err(ScanError::PermissionDenied(path)) => assert_eq!(path, dir.path()),
        other => panic!("expected PermissionDenied, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_unreadable_file_is_reported_not_fatal() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("good_a.txt"), "alpha")?;
    std::fs::write(dir.path().join("good_b.txt"), "alpha")?;
    // Not valid UTF-8, so reading it as text fails
    std::fs::write(dir.path().join("mangled.txt"), [0xC3, 0x28, 0xA0, 0xA1])?;

    let config = config_for(dir.path(), &["alpha"], 2, ConcurrencyMode::SharedMemory);
    let summary = scan(&config)?;

    assert_eq!(summary.files_scanned, 3);
    assert_eq!(
        summary.files_for("alpha"),
        Some(&["good_a.txt".to_string(), "good_b.txt".to_string()][..])
    );
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].path.ends_with("mangled.txt"));
    assert!(summary.errors[0].reason.contains("Invalid UTF-8"));
    Ok(())
}

#[test]
fn test_file_deleted_after_enumeration() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "alpha")?;
    std::fs::write(dir.path().join("b.txt"), "alpha")?;
    std::fs::write(dir.path().join("c.txt"), "alpha")?;

    // Enumerate by hand, then pull a file out from under the scanner
    let mut files: Vec<_> = std::fs::read_dir(dir.path())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    files.sort();
    std::fs::remove_file(dir.path().join("b.txt"))?;

    let chunks = partition(&files, 1);
    let scanner = FileScanner::new(KeywordMatcher::new(vec!["alpha".to_string()]));
    let partial = scanner.scan_chunk(chunks[0]);

    assert_eq!(partial.hits[0], vec!["a.txt", "c.txt"]);
    assert_eq!(partial.errors.len(), 1);
    assert!(partial.errors[0].path.ends_with("b.txt"));
    assert!(partial.errors[0].reason.contains("File not found"));
    Ok(())
}

#[test]
fn test_duplicate_keywords_reported_separately() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "echo chamber")?;

    let config = config_for(
        dir.path(),
        &["echo", "echo"],
        2,
        ConcurrencyMode::SharedMemory,
    );
    let summary = scan(&config)?;

    assert_eq!(summary.hits.len(), 2);
    assert_eq!(summary.hits[0].keyword, "echo");
    assert_eq!(summary.hits[1].keyword, "echo");
    assert_eq!(summary.hits[0].files, vec!["a.txt"]);
    assert_eq!(summary.hits[1].files, vec!["a.txt"]);
    Ok(())
}

#[test]
fn test_file_counted_once_per_keyword() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(
        dir.path().join("noisy.txt"),
        "alpha alpha alpha\nalpha again\nalpha forever\n",
    )?;

    let config = config_for(dir.path(), &["alpha"], 2, ConcurrencyMode::Isolated);
    let summary = scan(&config)?;

    assert_eq!(summary.files_for("alpha"), Some(&["noisy.txt".to_string()][..]));
    assert_eq!(summary.total_hits(), 1);
    Ok(())
}

#[test]
fn test_more_workers_than_files() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("only.txt"), "alpha")?;

    for mode in [ConcurrencyMode::SharedMemory, ConcurrencyMode::Isolated] {
        let config = config_for(dir.path(), &["alpha"], 16, mode);
        let summary = scan(&config)?;
        assert_eq!(summary.files_for("alpha"), Some(&["only.txt".to_string()][..]));
        assert_eq!(summary.files_scanned, 1);
    }
    Ok(())
}

#[test]
fn test_single_worker() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 9)?;

    let config = config_for(dir.path(), &["alpha", "beta"], 1, ConcurrencyMode::Isolated);
    let summary = scan(&config)?;

    assert_eq!(summary.files_scanned, 9);
    assert_eq!(summary.files_for("alpha").unwrap().len(), 9);
    assert_eq!(summary.files_for("beta").unwrap().len(), 3);
    Ok(())
}

#[test]
fn test_extension_filter_limits_enumeration() -> Result<()> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("a.txt"), "alpha")?;
    std::fs::write(dir.path().join("b.log"), "alpha")?;
    std::fs::write(dir.path().join("c.txt"), "alpha")?;

    let mut config = config_for(dir.path(), &["alpha"], 2, ConcurrencyMode::SharedMemory);
    config.file_extensions = Some(vec!["txt".to_string()]);
    let summary = scan(&config)?;

    assert_eq!(summary.files_scanned, 2);
    assert_eq!(
        summary.files_for("alpha"),
        Some(&["a.txt".to_string(), "c.txt".to_string()][..])
    );
    Ok(())
}

#[test]
fn test_empty_keyword_list() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 3)?;

    let config = config_for(dir.path(), &[], 2, ConcurrencyMode::SharedMemory);
    let summary = scan(&config)?;

    assert!(summary.hits.is_empty());
    assert_eq!(summary.files_scanned, 3);
    assert_eq!(summary.total_hits(), 0);
    Ok(())
}

#[test]
fn test_elapsed_time_is_recorded() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, 10)?;

    let config = config_for(dir.path(), &["alpha"], 2, ConcurrencyMode::SharedMemory);
    let before = Instant::now();
    let summary = scan(&config)?;
    let outer = before.elapsed();

    // The recorded span is measured inside the call, so the wall time of
    // the whole call bounds it from above
    assert!(summary.elapsed.as_nanos() > 0);
    assert!(summary.elapsed <= outer);
    Ok(())
}
