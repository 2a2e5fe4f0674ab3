//! Error types for tasklog_core operations.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tasklog_core operations.
#[derive(Error, Debug)]
pub enum TasklogError {
    /// A required input is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A configured repository path does not exist.
    #[error("repository not found: {}", .0.display())]
    RepositoryNotFound(PathBuf),

    /// The configuration file could not be read or parsed.
    #[error("config file {}: {}", path.display(), reason)]
    ConfigFile {
        /// Path to the config file
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// The history query failed for a repository.
    #[error("history query failed for {repository}: {command}\n{diagnostic}")]
    QueryFailed {
        /// Repository display name
        repository: String,
        /// The command line that was executed
        command: String,
        /// Diagnostic text (usually stderr)
        diagnostic: String,
    },

    /// The worker pool for history queries could not be started.
    #[error("failed to start query pool: {0}")]
    QueryPool(String),

    /// A commit subject does not carry a task identifier.
    #[error("no task identifier after marker {marker:?} in {repository}: {subject:?}")]
    MissingTaskMarker {
        /// Repository display name
        repository: String,
        /// Marker that was searched for
        marker: String,
        /// The offending subject line
        subject: String,
    },

    /// A file-change line starts with an unsupported change code.
    #[error("unknown change type in {repository}: {line:?}")]
    UnknownChangeType {
        /// Repository display name
        repository: String,
        /// The offending line
        line: String,
    },

    /// A file-change line is missing one of its path fields.
    #[error("missing path in {repository}: {line:?}")]
    MissingPath {
        /// Repository display name
        repository: String,
        /// The offending line
        line: String,
    },

    /// Serialization error while rendering a report.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Input validation, before any subprocess work.
    Configuration,
    /// Running the history query.
    Execution,
    /// Reading the history output.
    Parse,
    /// Rendering the final report.
    Output,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configuration => "configuration",
            Stage::Execution => "execution",
            Stage::Parse => "parse",
            Stage::Output => "output",
        };
        f.write_str(name)
    }
}

impl TasklogError {
    /// Returns the pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Configuration(_) | Self::RepositoryNotFound(_) | Self::ConfigFile { .. } => {
                Stage::Configuration
            }
            Self::QueryFailed { .. } | Self::QueryPool(_) => Stage::Execution,
            Self::MissingTaskMarker { .. }
            | Self::UnknownChangeType { .. }
            | Self::MissingPath { .. } => Stage::Parse,
            Self::Serialization(_) => Stage::Output,
        }
    }

    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::RepositoryNotFound(_) => {
                Some("Check the repository paths, or set --dir to the directory that contains them.")
            }
            Self::QueryFailed { .. } => {
                Some("Run the printed git command by hand to see the full error. 'tasklog query' lists every command.")
            }
            Self::MissingTaskMarker { .. } => {
                Some("Every matched commit subject must name its task, e.g. 'Task 1234: ...'. Use --marker if your team uses another prefix.")
            }
            Self::UnknownChangeType { .. } => {
                Some("Only A, M, D and R changes are supported. Copy detection must stay disabled.")
            }
            _ => None,
        }
    }
}

/// Convenience Result type for tasklog_core operations.
pub type Result<T> = std::result::Result<T, TasklogError>;
