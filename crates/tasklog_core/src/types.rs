//! Core data types for tasklog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of change a commit made to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    /// File was created.
    #[serde(rename = "A")]
    Added,
    /// File contents changed.
    #[serde(rename = "M")]
    Modified,
    /// File was removed.
    #[serde(rename = "D")]
    Deleted,
    /// File was moved to a new path.
    #[serde(rename = "R")]
    Renamed,
}

impl ChangeType {
    /// All change types in report order.
    pub const ALL: [ChangeType; 4] = [
        ChangeType::Added,
        ChangeType::Modified,
        ChangeType::Deleted,
        ChangeType::Renamed,
    ];

    /// One-letter code used by `git log --name-status`.
    pub fn code(self) -> char {
        match self {
            ChangeType::Added => 'A',
            ChangeType::Modified => 'M',
            ChangeType::Deleted => 'D',
            ChangeType::Renamed => 'R',
        }
    }

    /// Parse from the leading letter of a name-status code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(ChangeType::Added),
            'M' => Some(ChangeType::Modified),
            'D' => Some(ChangeType::Deleted),
            'R' => Some(ChangeType::Renamed),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Modified => "modified",
            ChangeType::Deleted => "deleted",
            ChangeType::Renamed => "renamed",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A local repository to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Filesystem path to the repository.
    pub path: PathBuf,
    /// Base directory name, used to namespace artifact paths.
    pub name: String,
}

impl RepositoryRef {
    /// Creates a reference whose name is the last component of `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = repository_name(&path);
        Self { path, name }
    }
}

fn repository_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One parsed file change from one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Repository display name.
    pub repository: String,
    /// Task identifier taken from the commit subject.
    pub task: String,
    /// Kind of change.
    pub change: ChangeType,
    /// Working artifact path (`<repository>/<file>`); rewritten by rename propagation.
    pub path: String,
    /// Path before a rename.
    pub old_path: Option<String>,
    /// Path after a rename.
    pub new_path: Option<String>,
}

impl ChangeRecord {
    /// Creates a non-rename record.
    pub fn new(
        repository: impl Into<String>,
        task: impl Into<String>,
        change: ChangeType,
        path: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            task: task.into(),
            change,
            path: path.into(),
            old_path: None,
            new_path: None,
        }
    }

    /// Creates a rename record. The working path starts at `old_path`.
    pub fn renamed(
        repository: impl Into<String>,
        task: impl Into<String>,
        old_path: impl Into<String>,
        new_path: impl Into<String>,
    ) -> Self {
        let old_path = old_path.into();
        Self {
            repository: repository.into(),
            task: task.into(),
            change: ChangeType::Renamed,
            path: old_path.clone(),
            old_path: Some(old_path),
            new_path: Some(new_path.into()),
        }
    }
}

/// Occurrences of one (task, change type) pair on an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    /// Task identifier.
    pub task: String,
    /// Kind of change.
    pub change: ChangeType,
    /// Number of raw records folded into this entry (always >= 1).
    pub count: u32,
}

/// A file with its per-task change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Current (post-rename) path.
    pub path: String,
    /// Target of the latest rename, if any.
    pub new_path: Option<String>,
    /// Source of the latest rename, if any.
    pub old_path: Option<String>,
    /// Repository display name.
    pub repository: String,
    /// Entries in first-seen order.
    pub entries: Vec<TaskEntry>,
}

impl Artifact {
    /// Returns true if another entry shares `entry_index`'s change type.
    pub fn shares_change_type(&self, entry_index: usize) -> bool {
        let change = self.entries[entry_index].change;
        self.entries
            .iter()
            .enumerate()
            .any(|(i, e)| i != entry_index && e.change == change)
    }
}

/// Summary of one artifact inside an output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    /// Current artifact path.
    pub path: String,
    /// Source of the latest rename, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    /// Target of the latest rename, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_path: Option<String>,
    /// Kind of change.
    pub change: ChangeType,
    /// Total occurrences.
    pub count: u32,
}

/// Which grouping produced an output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowShape {
    /// Several tasks share one change type on a single artifact.
    SharedChangeType,
    /// One task and one change type across many artifacts.
    TaskChangeType,
}

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// Grouping that produced this row.
    pub shape: RowShape,
    /// Task identifiers.
    pub tasks: Vec<String>,
    /// Artifact summaries.
    pub artifacts: Vec<ArtifactSummary>,
}

impl OutputRow {
    /// Number shown in a row header: the task count for single-artifact
    /// rows, otherwise the artifact count.
    pub fn headline_count(&self) -> usize {
        if self.artifacts.len() == 1 {
            self.tasks.len()
        } else {
            self.artifacts.len()
        }
    }
}
