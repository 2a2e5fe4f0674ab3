//! History query construction.
//!
//! Builds the `git log` invocation for one repository. Nothing is executed
//! here; identical inputs always produce identical queries.

use crate::types::RepositoryRef;
use std::fmt;
use std::path::Path;

/// A `git log` invocation for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Repository the query runs against.
    pub repository: RepositoryRef,
    /// Program to execute.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl HistoryQuery {
    /// Builds the history query for one repository.
    ///
    /// Requests oldest-first, non-merge commits by `author` whose message
    /// matches any of `tasks` (case-insensitive), with per-file name-status
    /// output and rename detection. `local_branches` selects `--branches`
    /// over `--remotes`.
    pub fn build(
        repository: &RepositoryRef,
        author: &str,
        tasks: &[String],
        local_branches: bool,
    ) -> Self {
        let mut args = vec![
            // Print non-ASCII paths verbatim instead of as octal escapes.
            "-c".to_string(),
            "core.quotePath=false".to_string(),
            "-C".to_string(),
            path_arg(&repository.path),
            "log".to_string(),
            "--reverse".to_string(),
            "--regexp-ignore-case".to_string(),
            "--no-merges".to_string(),
            format!("--author={}", author),
        ];

        if local_branches {
            args.push("--branches".to_string());
        } else {
            args.push("--remotes".to_string());
        }

        args.push("--name-status".to_string());
        args.push("--pretty=format:%s".to_string());
        args.push("-M".to_string());

        // Repeated --grep patterns are OR-ed by git.
        for task in tasks {
            args.push(format!("--grep={}", task));
        }

        Self {
            repository: repository.clone(),
            program: "git".to_string(),
            args,
        }
    }

    /// The full command line, for logs and error messages.
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl fmt::Display for HistoryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
