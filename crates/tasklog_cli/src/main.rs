//! tasklog CLI - report which files each task touched.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tasklog_core::{split_list, ScanConfig};

mod commands;

#[derive(Parser)]
#[command(name = "tasklog")]
#[command(about = "Report the files touched by tasks across git repositories", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan history and print the artifact report
    Report {
        #[command(flatten)]
        scan: ScanArgs,
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the git commands a report would run
    Query {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

/// Options shared by every command that scans history.
#[derive(Args)]
struct ScanArgs {
    /// TOML file with default settings; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory that relative repository paths are resolved against
    #[arg(short, long)]
    dir: Option<PathBuf>,
    /// Repository paths (comma-separated or repeated)
    #[arg(short, long = "repo")]
    repos: Vec<String>,
    /// Author filter passed to git
    #[arg(short, long)]
    author: Option<String>,
    /// Task identifiers (comma-separated or repeated)
    #[arg(short, long = "task")]
    tasks: Vec<String>,
    /// Scan local branches instead of remote-tracking branches
    #[arg(long)]
    local: bool,
    /// Keep deleted files in the report
    #[arg(long)]
    show_deleted: bool,
    /// Keep renames in the report
    #[arg(long)]
    show_renamed: bool,
    /// Word preceding the task number in commit subjects
    #[arg(long)]
    marker: Option<String>,
    /// Maximum number of concurrent git processes
    #[arg(short, long)]
    jobs: Option<usize>,
}

impl ScanArgs {
    /// Merges flags over the config file (if any).
    fn into_config(self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::load(path)?,
            None => ScanConfig::default(),
        };

        if let Some(dir) = self.dir {
            config.base_dir = Some(dir);
        }
        let repos: Vec<String> = self.repos.iter().flat_map(|r| split_list(r)).collect();
        if !repos.is_empty() {
            config.repositories = repos.into_iter().map(PathBuf::from).collect();
        }
        if let Some(author) = self.author {
            config.author = author;
        }
        let tasks = split_list(&self.tasks.join(","));
        if !tasks.is_empty() {
            config.tasks = tasks;
        }
        config.include_local_branches |= self.local;
        config.include_deleted |= self.show_deleted;
        config.include_renamed |= self.show_renamed;
        if let Some(marker) = self.marker {
            config.task_marker = marker;
        }
        if let Some(jobs) = self.jobs {
            config.max_concurrent_queries = jobs;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { scan, format } => commands::report::run(scan.into_config()?, &format),
        Commands::Query { scan } => commands::query::run(scan.into_config()?),
    }
}
