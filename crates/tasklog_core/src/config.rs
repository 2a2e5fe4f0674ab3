//! Scan configuration.

use crate::error::{Result, TasklogError};
use crate::types::RepositoryRef;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one report run needs.
///
/// Built by the caller (CLI flags, a TOML file, or both) and passed
/// explicitly into [`crate::Scanner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory that relative repository paths are resolved against.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// Repositories to scan.
    #[serde(default)]
    pub repositories: Vec<PathBuf>,

    /// Author filter passed to `git log --author`.
    #[serde(default)]
    pub author: String,

    /// Task identifiers to look for in commit messages.
    #[serde(default)]
    pub tasks: Vec<String>,

    /// Scan local branches instead of remote-tracking branches.
    #[serde(default)]
    pub include_local_branches: bool,

    /// Keep deletions in the report.
    #[serde(default)]
    pub include_deleted: bool,

    /// Keep renames in the report.
    #[serde(default)]
    pub include_renamed: bool,

    /// Word that precedes the task number in commit subjects (default: "task").
    #[serde(default = "default_task_marker")]
    pub task_marker: String,

    /// Upper bound on concurrently running history queries (default: 8).
    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,
}

fn default_task_marker() -> String {
    "task".to_string()
}

fn default_max_concurrent_queries() -> usize {
    8
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            repositories: Vec::new(),
            author: String::new(),
            tasks: Vec::new(),
            include_local_branches: false,
            include_deleted: false,
            include_renamed: false,
            task_marker: default_task_marker(),
            max_concurrent_queries: default_max_concurrent_queries(),
        }
    }
}

impl ScanConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| TasklogError::ConfigFile {
            path: path.to_path_buf(),
            reason: format!("failed to read: {}", e),
        })?;
        toml::from_str(&content).map_err(|e| TasklogError::ConfigFile {
            path: path.to_path_buf(),
            reason: format!("failed to parse: {}", e),
        })
    }

    /// Checks that every required field is present.
    ///
    /// Runs before any repository is touched.
    pub fn validate(&self) -> Result<()> {
        if self.repositories.is_empty() {
            return Err(TasklogError::Configuration(
                "at least one repository is required".to_string(),
            ));
        }
        if self.author.trim().is_empty() {
            return Err(TasklogError::Configuration(
                "an author filter is required".to_string(),
            ));
        }
        if self.tasks.is_empty() {
            return Err(TasklogError::Configuration(
                "at least one task identifier is required".to_string(),
            ));
        }
        if self.tasks.iter().any(|t| t.trim().is_empty()) {
            return Err(TasklogError::Configuration(
                "task identifiers must not be empty".to_string(),
            ));
        }
        if self.task_marker.trim().is_empty() {
            return Err(TasklogError::Configuration(
                "the task marker must not be empty".to_string(),
            ));
        }
        if self.max_concurrent_queries == 0 {
            return Err(TasklogError::Configuration(
                "max_concurrent_queries must be at least 1".to_string(),
            ));
        }

        // Artifact paths are namespaced by repository name, so two
        // repositories sharing a directory name would merge their files.
        let refs = self.repository_refs();
        for (i, repo) in refs.iter().enumerate() {
            if let Some(other) = refs[..i].iter().find(|r| r.name == repo.name) {
                return Err(TasklogError::Configuration(format!(
                    "repositories {} and {} share the name {:?}",
                    other.path.display(),
                    repo.path.display(),
                    repo.name
                )));
            }
        }
        Ok(())
    }

    /// Resolves configured repository paths against `base_dir`.
    pub fn repository_refs(&self) -> Vec<RepositoryRef> {
        self.repositories
            .iter()
            .map(|path| match &self.base_dir {
                Some(base) if path.is_relative() => RepositoryRef::new(base.join(path)),
                _ => RepositoryRef::new(path.clone()),
            })
            .collect()
    }
}

/// Splits a comma-separated list, trimming items and dropping blanks and
/// duplicates while keeping first-seen order.
pub fn split_list(value: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}
