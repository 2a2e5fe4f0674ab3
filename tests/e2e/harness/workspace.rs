use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Manages isolated directories that stand in for repositories
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// Create an empty workspace
    pub fn empty() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp directory")?;
        Ok(Self { dir })
    }

    /// Get workspace path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a repository directory and return its path
    pub fn create_repository(&self, name: &str) -> Result<PathBuf> {
        let path = self.repository_path(name);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create repository directory: {}", name))?;
        Ok(path)
    }

    /// Path a repository would live at, whether or not it exists
    pub fn repository_path(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }
}
