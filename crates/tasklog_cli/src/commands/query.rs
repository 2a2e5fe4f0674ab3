//! Query command - show the git commands a report would run.

use anyhow::Result;
use console::style;
use tasklog_core::{FsProbe, PathProbe, ScanConfig, Scanner};
use tracing::debug;

use super::print_hint;

/// Print one history query per repository without running anything.
pub fn run(config: ScanConfig) -> Result<()> {
    let scanner = Scanner::new(config);

    let queries = scanner.queries().map_err(|e| {
        print_hint(&e);
        e
    })?;

    let mut missing = 0;
    for query in &queries {
        let marker = if FsProbe.exists(&query.repository.path) {
            style("✓").green()
        } else {
            missing += 1;
            style("×").red()
        };
        println!("{} {}", marker, style(&query.repository.name).bold());
        println!("  {}", query.command_line());
    }

    debug!(repositories = queries.len(), missing, "listed history queries");

    if missing > 0 {
        anyhow::bail!("{} of {} repositories do not exist", missing, queries.len());
    }

    Ok(())
}
