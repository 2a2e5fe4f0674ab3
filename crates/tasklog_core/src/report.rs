//! Classifying aggregated artifacts into report rows.
//!
//! Each (artifact, task, change type) entry lands in exactly one of two
//! shapes, decided by whether another entry on the same artifact has the
//! same change type:
//!
//! - shared: several tasks made the same kind of change to one artifact
//!   (e.g. two tasks both modified `a.html`), one row per artifact and
//!   change type;
//! - per task: the entry's change type is unique on its artifact, grouped by
//!   (task, change type) across artifacts.

use crate::error::{Result, TasklogError};
use crate::types::{Artifact, ArtifactSummary, ChangeType, OutputRow, RowShape, TaskEntry};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::debug;

/// The final report: shared rows first, then per-task rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// All rows in output order.
    pub rows: Vec<OutputRow>,
}

impl Report {
    /// Rows where several tasks share a change type on one artifact.
    pub fn shared_rows(&self) -> impl Iterator<Item = &OutputRow> {
        self.rows
            .iter()
            .filter(|r| r.shape == RowShape::SharedChangeType)
    }

    /// Rows grouping one task's unique changes by change type.
    pub fn task_rows(&self) -> impl Iterator<Item = &OutputRow> {
        self.rows
            .iter()
            .filter(|r| r.shape == RowShape::TaskChangeType)
    }

    /// Returns true if no row was produced.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TasklogError::Serialization(e.to_string()))
    }

    /// Renders the report as plain text, one block per row. The header
    /// carries the row's change and its headline count:
    ///
    /// ```text
    /// Tasks 1001, 1002 [modified, 2]
    /// M	2	foo/src/a.html
    /// ```
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let label = if row.tasks.len() == 1 { "Task" } else { "Tasks" };
            let change = row.artifacts.first().map_or("", |a| a.change.label());
            let _ = writeln!(
                out,
                "{} {} [{}, {}]",
                label,
                row.tasks.join(", "),
                change,
                row.headline_count()
            );
            for artifact in &row.artifacts {
                let _ = writeln!(
                    out,
                    "{}\t{}\t{}",
                    artifact.change,
                    artifact.count,
                    display_path(artifact)
                );
            }
        }
        out
    }
}

fn display_path(artifact: &ArtifactSummary) -> String {
    match (artifact.change, &artifact.old_path, &artifact.new_path) {
        (ChangeType::Renamed, Some(old), Some(new)) => format!("{} -> {}", old, new),
        _ => artifact.path.clone(),
    }
}

/// Splits artifacts into shared rows followed by per-task rows.
///
/// `tasks` fixes the order of the per-task rows.
pub fn classify(artifacts: &[Artifact], tasks: &[String]) -> Report {
    let mut rows = shared_change_rows(artifacts);
    let shared = rows.len();
    rows.extend(task_change_rows(artifacts, tasks));

    debug!(
        shared,
        per_task = rows.len() - shared,
        "classified report rows"
    );
    Report { rows }
}

/// One row per artifact and change type that two or more tasks share.
pub fn shared_change_rows(artifacts: &[Artifact]) -> Vec<OutputRow> {
    let mut rows = Vec::new();

    for artifact in artifacts {
        for change in ChangeType::ALL {
            let sharing: Vec<&TaskEntry> = artifact
                .entries
                .iter()
                .filter(|e| e.change == change)
                .collect();
            if sharing.len() < 2 {
                continue;
            }

            rows.push(OutputRow {
                shape: RowShape::SharedChangeType,
                tasks: sharing.iter().map(|e| e.task.clone()).collect(),
                artifacts: vec![summary(
                    artifact,
                    change,
                    sharing.iter().map(|e| e.count).sum(),
                )],
            });
        }
    }

    rows
}

/// One row per requested task and change type, listing every artifact where
/// that task's entry has no sibling of the same change type.
pub fn task_change_rows(artifacts: &[Artifact], tasks: &[String]) -> Vec<OutputRow> {
    let mut rows = Vec::new();

    for task in tasks {
        for change in ChangeType::ALL {
            let summaries: Vec<ArtifactSummary> = artifacts
                .iter()
                .filter_map(|artifact| {
                    let index = artifact
                        .entries
                        .iter()
                        .position(|e| e.task == *task && e.change == change)?;
                    if artifact.shares_change_type(index) {
                        return None;
                    }
                    Some(summary(artifact, change, artifact.entries[index].count))
                })
                .collect();

            if !summaries.is_empty() {
                rows.push(OutputRow {
                    shape: RowShape::TaskChangeType,
                    tasks: vec![task.clone()],
                    artifacts: summaries,
                });
            }
        }
    }

    rows
}

fn summary(artifact: &Artifact, change: ChangeType, count: u32) -> ArtifactSummary {
    ArtifactSummary {
        path: artifact.path.clone(),
        old_path: artifact.old_path.clone(),
        new_path: artifact.new_path.clone(),
        change,
        count,
    }
}
