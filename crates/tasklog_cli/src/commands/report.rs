//! Report command - scan history and print the artifact report.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tasklog_core::{ScanConfig, Scanner};
use tracing::info;

use super::print_hint;

/// Run the full pipeline and print the report.
pub fn run(config: ScanConfig, format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        anyhow::bail!("Unsupported format: {}. Use 'text' or 'json'.", format);
    }

    let tasks = config.tasks.join(", ");
    let scanner = Scanner::new(config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Scanning repository history...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = scanner.run();
    pb.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            print_hint(&e);
            let stage = e.stage();
            return Err(e).with_context(|| format!("Report failed during {} stage", stage));
        }
    };

    info!(
        rows = report.rows.len(),
        shared = report.shared_rows().count(),
        format,
        "report ready to print"
    );

    match format {
        "json" => {
            let json = report.to_json().context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
        _ => {
            if report.is_empty() {
                println!(
                    "{} No changes found for tasks {}",
                    style("→").cyan(),
                    style(&tasks).bold()
                );
            } else {
                print!("{}", report.to_text());
            }
        }
    }

    Ok(())
}
