//! End-to-end report generation.

use crate::aggregate::{aggregate, AggregateOptions};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::executor::{execute_all, FsProbe, GitRunner, HistoryRunner, PathProbe};
use crate::parser::HistoryParser;
use crate::query::HistoryQuery;
use crate::report::{classify, Report};
use crate::resolver::resolve;
use tracing::info;

/// Runs the history pipeline for one configuration.
///
/// Uses the local `git` binary and filesystem by default; tests swap either
/// collaborator with [`Scanner::with_runner`] and [`Scanner::with_probe`].
pub struct Scanner {
    config: ScanConfig,
    runner: Box<dyn HistoryRunner>,
    probe: Box<dyn PathProbe>,
}

impl Scanner {
    /// Creates a scanner backed by `git` and the local filesystem.
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            runner: Box::new(GitRunner),
            probe: Box::new(FsProbe),
        }
    }

    /// Replaces the history runner.
    pub fn with_runner(mut self, runner: impl HistoryRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Replaces the path existence check.
    pub fn with_probe(mut self, probe: impl PathProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Returns the configuration this scanner runs with.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Validates the configuration and builds one query per repository.
    pub fn queries(&self) -> Result<Vec<HistoryQuery>> {
        self.config.validate()?;
        Ok(self
            .config
            .repository_refs()
            .iter()
            .map(|repo| {
                HistoryQuery::build(
                    repo,
                    &self.config.author,
                    &self.config.tasks,
                    self.config.include_local_branches,
                )
            })
            .collect())
    }

    /// Runs every stage and returns the report.
    ///
    /// Any error aborts the run; there is no partial report.
    pub fn run(&self) -> Result<Report> {
        let queries = self.queries()?;
        let parser = HistoryParser::new(&self.config.task_marker)?;

        info!(
            repositories = queries.len(),
            tasks = self.config.tasks.len(),
            "scanning history"
        );

        let outputs = execute_all(
            &queries,
            self.runner.as_ref(),
            self.probe.as_ref(),
            self.config.max_concurrent_queries,
        )?;

        let mut records = Vec::new();
        for output in &outputs {
            records.extend(parser.parse(&output.stdout, &output.repository.name)?);
        }

        resolve(&mut records);

        let artifacts = aggregate(
            &records,
            AggregateOptions {
                include_deleted: self.config.include_deleted,
                include_renamed: self.config.include_renamed,
            },
        );
        let report = classify(&artifacts, &self.config.tasks);

        info!(
            artifacts = artifacts.len(),
            rows = report.rows.len(),
            "report ready"
        );
        Ok(report)
    }
}
