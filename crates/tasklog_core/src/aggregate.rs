//! Grouping resolved change records into per-artifact task histories.

use crate::types::{Artifact, ChangeRecord, ChangeType, TaskEntry};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Which change types survive aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateOptions {
    /// Keep Deleted entries.
    pub include_deleted: bool,
    /// Keep Renamed entries.
    pub include_renamed: bool,
}

/// Groups records by (repository, path), filters, and sorts the result.
///
/// Repeated (task, change type) pairs on one artifact increment the entry's
/// count. A rename record overwrites the artifact's old/new path, so the
/// latest rename wins.
pub fn aggregate(records: &[ChangeRecord], options: AggregateOptions) -> Vec<Artifact> {
    let mut artifacts = group(records);

    if !options.include_deleted {
        artifacts = exclude_change(artifacts, ChangeType::Deleted);
    }
    if !options.include_renamed {
        artifacts = exclude_change(artifacts, ChangeType::Renamed);
    }

    artifacts.sort_by(compare_artifacts);

    debug!(
        records = records.len(),
        artifacts = artifacts.len(),
        "aggregated artifacts"
    );
    artifacts
}

/// Builds artifacts in first-seen order.
fn group(records: &[ChangeRecord]) -> Vec<Artifact> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut artifacts: Vec<Artifact> = Vec::new();

    for record in records {
        let key = (record.repository.as_str(), record.path.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            artifacts.push(Artifact {
                path: record.path.clone(),
                new_path: None,
                old_path: None,
                repository: record.repository.clone(),
                entries: Vec::new(),
            });
            artifacts.len() - 1
        });
        let artifact = &mut artifacts[slot];

        if record.change == ChangeType::Renamed {
            artifact.old_path = record.old_path.clone();
            artifact.new_path = record.new_path.clone();
        }

        match artifact
            .entries
            .iter_mut()
            .find(|e| e.task == record.task && e.change == record.change)
        {
            Some(entry) => entry.count += 1,
            None => artifact.entries.push(TaskEntry {
                task: record.task.clone(),
                change: record.change,
                count: 1,
            }),
        }
    }

    artifacts
}

/// Removes every entry of `change`; artifacts left empty are dropped.
pub fn exclude_change(artifacts: Vec<Artifact>, change: ChangeType) -> Vec<Artifact> {
    artifacts
        .into_iter()
        .filter_map(|mut artifact| {
            artifact.entries.retain(|e| e.change != change);
            (!artifact.entries.is_empty()).then_some(artifact)
        })
        .collect()
}

/// Orders by repository, then by path read from its last character backward.
pub fn compare_artifacts(a: &Artifact, b: &Artifact) -> Ordering {
    a.repository
        .cmp(&b.repository)
        .then_with(|| compare_suffix_first(&a.path, &b.path))
}

/// Compares two strings from their last character backward, so paths
/// sharing a tail sort next to each other.
pub fn compare_suffix_first(a: &str, b: &str) -> Ordering {
    a.chars().rev().cmp(b.chars().rev())
}
