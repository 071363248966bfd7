use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Number of workers used when the configuration does not specify one
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Configuration for a scan, demonstrating Rust's strong typing compared to
/// .NET's optional configuration pattern.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.keyscout.yaml` in the current directory
/// 3. Global `$HOME/.config/keyscout/config.yaml`
///
/// # Configuration Format
///
/// The configuration uses YAML format. Example:
/// ```yaml
/// # Keywords to look for
/// keywords:
///   - "error"
///   - "timeout"
///
/// # Directory whose files are scanned
/// root_path: "text_files"
///
/// # File extensions to include
/// file_extensions:
///   - "txt"
///
/// # Number of concurrent workers
/// worker_count: 4
///
/// # Concurrency strategy: shared-memory or isolated
/// mode: "shared-memory"
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
///
/// # CLI Integration
///
/// When using the CLI, command-line arguments take precedence over config file
/// values. The merging behavior is defined in the `merge_with_cli` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Keywords to look for, in display order
    ///
    /// Duplicates are allowed and reported as separate entries.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Directory whose immediate files are scanned (no recursion)
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Optional list of file extensions to include (e.g., ["txt", "log"])
    /// If None, all regular files are included
    #[serde(default)]
    pub file_extensions: Option<Vec<String>>,

    /// Number of workers scanning concurrently
    #[serde(default = "default_worker_count")]
    pub worker_count: NonZeroUsize,

    /// Concurrency strategy; both produce identical results
    #[serde(default)]
    pub mode: ConcurrencyMode,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// How the worker pool is organized.
///
/// `SharedMemory` workers run on a thread pool and borrow the file list from
/// the coordinator. `Isolated` workers own copies of their inputs outright and
/// communicate only through a results channel, mirroring a process-per-worker
/// design. Scan output is identical either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConcurrencyMode {
    #[default]
    SharedMemory,
    Isolated,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_worker_count() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_WORKER_COUNT).unwrap()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl ScanConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::Message(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        let mut builder = ConfigBuilder::builder();

        // Default config locations
        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("keyscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".keyscout.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        // Add existing config files
        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // Build and deserialize
        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: ScanConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.keywords.is_empty() {
            self.keywords = cli_config.keywords;
        }
        if cli_config.root_path != default_root_path() {
            self.root_path = cli_config.root_path;
        }
        if cli_config.file_extensions.is_some() {
            self.file_extensions = cli_config.file_extensions;
        }
        if cli_config.worker_count != default_worker_count() {
            self.worker_count = cli_config.worker_count;
        }
        if cli_config.mode != ConcurrencyMode::default() {
            self.mode = cli_config.mode;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}
