//! Running history queries against every repository.
//!
//! Repositories are checked up front; a missing path aborts the run before
//! any process is started. Queries then run concurrently on a bounded rayon
//! pool, and every launched query is allowed to finish before the first
//! failure is reported.

use crate::error::{Result, TasklogError};
use crate::query::HistoryQuery;
use crate::types::RepositoryRef;
use rayon::prelude::*;
use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Executes a history query and returns its standard output.
pub trait HistoryRunner: Send + Sync {
    /// Runs `query`. Failures must carry the command line and diagnostic text.
    fn run(&self, query: &HistoryQuery) -> Result<String>;
}

/// Runs queries with the local `git` binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitRunner;

impl HistoryRunner for GitRunner {
    fn run(&self, query: &HistoryQuery) -> Result<String> {
        let failed = |diagnostic: String| TasklogError::QueryFailed {
            repository: query.repository.name.clone(),
            command: query.command_line(),
            diagnostic,
        };

        let output = Command::new(&query.program)
            .args(&query.args)
            .output()
            .map_err(|e| failed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(stderr.trim().to_string()));
        }

        String::from_utf8(output.stdout).map_err(|e| failed(format!("invalid UTF-8: {}", e)))
    }
}

/// Checks whether a repository path exists.
pub trait PathProbe: Send + Sync {
    /// Returns true if `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

impl<F> PathProbe for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn exists(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Checks paths against the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Raw history text for one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOutput {
    /// Repository the text came from.
    pub repository: RepositoryRef,
    /// Standard output of the query; empty means no matching commits.
    pub stdout: String,
}

/// Runs every query and collects the outputs in query order.
///
/// # Errors
///
/// - `RepositoryNotFound` for the first missing repository, before any
///   process is launched.
/// - The first failing query (in query order) once all queries completed.
pub fn execute_all(
    queries: &[HistoryQuery],
    runner: &dyn HistoryRunner,
    probe: &dyn PathProbe,
    max_concurrent: usize,
) -> Result<Vec<RepositoryOutput>> {
    for query in queries {
        if !probe.exists(&query.repository.path) {
            return Err(TasklogError::RepositoryNotFound(
                query.repository.path.clone(),
            ));
        }
    }

    if queries.is_empty() {
        return Ok(Vec::new());
    }

    let threads = max_concurrent.clamp(1, queries.len());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| TasklogError::QueryPool(e.to_string()))?;

    debug!(queries = queries.len(), threads, "running history queries");

    let results: Vec<Result<String>> = pool.install(|| {
        queries
            .par_iter()
            .map(|query| {
                debug!(repository = %query.repository.name, command = %query, "query started");
                let result = runner.run(query);
                debug!(
                    repository = %query.repository.name,
                    ok = result.is_ok(),
                    "query finished"
                );
                result
            })
            .collect()
    });

    queries
        .iter()
        .zip(results)
        .map(|(query, result)| {
            let stdout = result?;
            if stdout.trim().is_empty() {
                warn!(repository = %query.repository.name, "no matching commits");
            }
            Ok(RepositoryOutput {
                repository: query.repository.clone(),
                stdout,
            })
        })
        .collect()
}
