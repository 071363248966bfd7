use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use keyscout::{
    scan, ConcurrencyMode, ScanConfig, ScanError, ScanSummary, DEFAULT_WORKER_COUNT,
};
use std::{io, num::NonZeroUsize, path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;

mod corpus;

type Result<T> = std::result::Result<T, ScanError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct CliScanArgs {
    /// Keyword to look for (can be specified multiple times)
    #[arg(short = 'k', long = "keyword")]
    keywords: Vec<String>,

    /// Number of random keywords to pick when none are given
    #[arg(long, default_value = "3")]
    random: usize,

    /// Root directory to scan
    #[arg(short = 'd', long, default_value = ".")]
    dir: PathBuf,

    /// File extensions to include (e.g. txt,log)
    #[arg(short = 'e', long)]
    extensions: Option<String>,

    /// Number of workers to use
    #[arg(short = 'j', long)]
    workers: Option<NonZeroUsize>,

    /// Concurrency strategy (shared|isolated)
    #[arg(short = 'm', long, default_value = "shared")]
    mode: String,

    /// Show only statistics, not per-keyword file lists
    #[arg(short, long)]
    stats: bool,

    /// Output format (text|json)
    #[arg(long, default_value = "text")]
    format: String,

    /// Configuration file to load before applying CLI flags
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Clear the terminal before printing results
    #[arg(long)]
    clear: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory of files for keywords
    Scan(Box<CliScanArgs>),

    /// Generate a directory of random text files to scan
    Generate {
        /// Directory to create the files in
        #[arg(short = 'd', long, default_value = "text_files")]
        dir: PathBuf,

        /// Number of files to generate
        #[arg(short = 'n', long = "count", default_value = "100")]
        count: usize,

        /// Number of sentences per file
        #[arg(short = 'l', long, default_value = "1000")]
        lines: usize,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => {
            init_tracing(&args.log_level);

            // Random keywords only make sense when neither the CLI nor a
            // config file supplies any; an empty list here lets the config
            // file's keywords survive the merge below.
            let keywords = if args.keywords.is_empty() && args.config.is_none() {
                let picked = corpus::random_keywords(args.random);
                eprintln!(
                    "{} {}",
                    "No keywords given, scanning for:".cyan(),
                    picked.join(", ")
                );
                picked
            } else {
                args.keywords
            };

            let file_extensions = args.extensions.as_ref().map(|e| {
                e.split(',')
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<_>>()
            });

            let mode = match args.mode.to_lowercase().as_str() {
                "isolated" => ConcurrencyMode::Isolated,
                _ => ConcurrencyMode::SharedMemory,
            };

            let cli_config = ScanConfig {
                keywords,
                root_path: args.dir,
                file_extensions,
                worker_count: args
                    .workers
                    .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_WORKER_COUNT).unwrap()),
                mode,
                log_level: args.log_level.clone(),
            };

            let scan_config = match args.config {
                Some(path) => ScanConfig::load_from(Some(&path))
                    .map_err(|e| ScanError::config_error(e.to_string()))?
                    .merge_with_cli(cli_config),
                None => cli_config,
            };

            if args.clear {
                clear_terminal();
            }

            let spinner = scan_spinner();
            let outcome = scan(&scan_config);
            spinner.finish_and_clear();
            let summary = outcome?;

            if args.format.eq_ignore_ascii_case("json") {
                let rendered =
                    serde_json::to_string_pretty(&summary).map_err(io::Error::from)?;
                println!("{}", rendered);
            } else {
                print_scan_results(&summary, args.stats);
            }
            Ok(())
        }
        Commands::Generate { dir, count, lines } => {
            init_tracing("info");
            corpus::generate(&dir, count, lines)?;
            println!(
                "Generated {} files of {} sentences each in {}",
                count,
                lines,
                dir.display().to_string().blue()
            );
            Ok(())
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn scan_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Scanning...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn clear_terminal() {
    use crossterm::terminal::{Clear, ClearType};

    print!("{}", Clear(ClearType::All));
    print!("\x1B[H");
}

fn print_scan_results(summary: &ScanSummary, stats_only: bool) {
    if !stats_only {
        // Pad cells before coloring; ANSI escapes would throw off the widths
        let width = summary
            .hits
            .iter()
            .map(|entry| entry.keyword.len())
            .max()
            .unwrap_or(0)
            .max("Keyword".len());

        println!();
        println!(
            "{}  {}  {}",
            format!("{:<width$}", "Keyword").bold(),
            format!("{:>5}", "Files").bold(),
            "Examples".bold()
        );

        for entry in &summary.hits {
            let mut examples = entry
                .files
                .iter()
                .take(5)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if entry.files.len() > 5 {
                examples.push_str(", ...");
            }

            println!(
                "{}  {}  {}",
                format!("{:<width$}", entry.keyword).blue(),
                format!("{:>5}", entry.files.len()),
                examples
            );
        }
    }

    if !summary.errors.is_empty() {
        eprintln!();
        eprintln!(
            "{}",
            format!("{} file(s) could not be read:", summary.errors.len()).red()
        );
        for error in &summary.errors {
            eprintln!("  {}", error.to_string().red());
        }
    }

    println!(
        "\nFound {} hits for {} keywords across {} files in {}",
        summary.total_hits(),
        summary.hits.len(),
        summary.files_scanned,
        format_elapsed(summary.elapsed)
    );
}

fn format_elapsed(elapsed: Duration) -> String {
    // format_duration renders every unit down to nanoseconds; cap at millis
    humantime::format_duration(Duration::from_millis(elapsed.as_millis() as u64)).to_string()
}
