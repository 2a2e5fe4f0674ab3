//! CLI commands.

pub mod query;
pub mod report;

use console::style;
use tasklog_core::TasklogError;

/// Prints the recovery hint for a core error, if there is one.
pub fn print_hint(err: &TasklogError) {
    if let Some(hint) = err.recovery_suggestion() {
        eprintln!("{} {}", style("hint:").yellow().bold(), hint);
    }
}
