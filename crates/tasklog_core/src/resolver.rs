//! Normalizing file identity and lifetime across the full change history.
//!
//! Runs over all repositories' records combined, oldest first. Renames are
//! resolved before deletions so deletion pruning compares final names.

use crate::types::{ChangeRecord, ChangeType};
use std::collections::HashMap;
use tracing::debug;

/// Runs rename propagation, then deletion pruning.
pub fn resolve(records: &mut Vec<ChangeRecord>) {
    propagate_renames(records);
    prune_deletions(records);
}

/// Rewrites every record up to and including a rename of `old -> new` that
/// still uses `old`, so history converges on the most recent name.
///
/// Records after the rename that use the old name belong to a new file
/// created under that name and keep it. Chains of renames collapse to the
/// last name.
pub fn propagate_renames(records: &mut [ChangeRecord]) {
    // Walking backwards, `final_names[p]` is the name a record at `p` ends
    // up with once every later rename has been applied.
    let mut final_names: HashMap<String, String> = HashMap::new();
    let mut rewritten = 0usize;

    for record in records.iter_mut().rev() {
        if record.change == ChangeType::Renamed {
            if let (Some(old), Some(new)) = (&record.old_path, &record.new_path) {
                let target = final_names.get(new).cloned().unwrap_or_else(|| new.clone());
                final_names.insert(old.clone(), target);
            }
        }
        if let Some(target) = final_names.get(&record.path) {
            if *target != record.path {
                record.path = target.clone();
                rewritten += 1;
            }
        }
    }

    debug!(rewritten, "propagated renames");
}

/// Drops every record that precedes the earliest deletion of its path.
///
/// History before a file's first deletion belongs to a closed lifetime.
/// The deletion itself and anything after it, including a re-add under the
/// same path, is kept.
pub fn prune_deletions(records: &mut Vec<ChangeRecord>) {
    let first_deletion: HashMap<String, usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.change == ChangeType::Deleted)
        .fold(HashMap::new(), |mut acc, (index, r)| {
            acc.entry(r.path.clone()).or_insert(index);
            acc
        });

    if first_deletion.is_empty() {
        return;
    }

    let before = records.len();
    let mut index = 0usize;
    records.retain(|record| {
        let keep = first_deletion
            .get(&record.path)
            .map_or(true, |&deleted_at| index >= deleted_at);
        index += 1;
        keep
    });

    debug!(dropped = before - records.len(), "pruned deleted history");
}
