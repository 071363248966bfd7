pub mod config;
pub mod errors;
pub mod filters;
pub mod partition;
pub mod results;
pub mod scan;

pub use config::{ConcurrencyMode, ScanConfig, DEFAULT_WORKER_COUNT};
pub use errors::{ScanError, ScanResult};
pub use results::{FileError, KeywordHits, PartialResult, ScanSummary};
pub use scan::scan;
