//! Parsing `git log --name-status --pretty=format:%s` output.
//!
//! This is the only place that looks at raw history text. Output is split
//! into blocks separated by blank lines; each block is a commit subject
//! followed by its file-change lines:
//!
//! ```text
//! Task 1001: fix header
//! M	src/a.html
//! R087	src/old.js	src/new.js
//!
//! task 1002 footer
//! A	src/b.html
//! ```
//!
//! Every path is prefixed with the repository name so equal file names from
//! different repositories never collide.

use crate::error::{Result, TasklogError};
use crate::types::{ChangeRecord, ChangeType};
use regex::Regex;
use tracing::debug;

/// Parses history output into change records.
#[derive(Debug, Clone)]
pub struct HistoryParser {
    marker: String,
    task_id: Regex,
}

impl HistoryParser {
    /// Creates a parser that expects `marker` (case-insensitive) followed by
    /// a task number in every commit subject.
    pub fn new(marker: &str) -> Result<Self> {
        let pattern = format!(r"(?i){}.*?(\d+)", regex::escape(marker));
        let task_id = Regex::new(&pattern).map_err(|e| {
            TasklogError::Configuration(format!("invalid task marker {:?}: {}", marker, e))
        })?;
        Ok(Self {
            marker: marker.to_string(),
            task_id,
        })
    }

    /// Parses one repository's output, preserving commit order.
    ///
    /// # Errors
    ///
    /// - `MissingTaskMarker` if a subject has no marker or no digits after it.
    /// - `UnknownChangeType` for change codes other than A, M, D and R.
    /// - `MissingPath` if a change line lacks a path field.
    pub fn parse(&self, output: &str, repository: &str) -> Result<Vec<ChangeRecord>> {
        let mut records = Vec::new();
        let blocks = split_blocks(output);

        let mut commits = 0usize;

        for block in &blocks {
            let Some((subject, changes)) = block.split_first() else {
                continue;
            };
            let mut task = self.task_id(subject, repository)?;
            commits += 1;
            for line in changes {
                // A commit without file changes is not followed by a blank
                // line, so the next subject can land inside this block.
                if self.starts_commit(line) {
                    task = self.task_id(line, repository)?;
                    commits += 1;
                    continue;
                }
                records.push(parse_change_line(line, repository, &task)?);
            }
        }

        debug!(
            repository,
            commits,
            records = records.len(),
            "parsed history"
        );
        Ok(records)
    }

    /// Returns true if `line` is a commit subject rather than a change line.
    ///
    /// Change lines are tab separated and start with a change code; a
    /// subject has neither and carries the marker.
    fn starts_commit(&self, line: &str) -> bool {
        if line.contains('\t') {
            return false;
        }
        let code = line.split_whitespace().next().unwrap_or_default();
        parse_code(code).is_none() && self.task_id.is_match(line)
    }

    /// Extracts the first digit run after the marker.
    pub fn task_id(&self, subject: &str, repository: &str) -> Result<String> {
        self.task_id
            .captures(subject)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| TasklogError::MissingTaskMarker {
                repository: repository.to_string(),
                marker: self.marker.clone(),
                subject: subject.to_string(),
            })
    }
}

/// Groups non-blank lines into blocks separated by one or more blank lines.
fn split_blocks(output: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for line in output.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parses one `<code>\t<path>[\t<path>]` line.
fn parse_change_line(line: &str, repository: &str, task: &str) -> Result<ChangeRecord> {
    let fields: Vec<&str> = if line.contains('\t') {
        line.split('\t').map(str::trim).filter(|f| !f.is_empty()).collect()
    } else {
        line.split_whitespace().collect()
    };

    let unknown = || TasklogError::UnknownChangeType {
        repository: repository.to_string(),
        line: line.to_string(),
    };
    let missing = || TasklogError::MissingPath {
        repository: repository.to_string(),
        line: line.to_string(),
    };

    let code = fields.first().copied().ok_or_else(unknown)?;
    let change = parse_code(code).ok_or_else(unknown)?;
    let namespaced = |path: &str| format!("{}/{}", repository, path);

    match change {
        ChangeType::Renamed => {
            let (old, new) = match (fields.get(1), fields.get(2)) {
                (Some(old), Some(new)) => (old, new),
                _ => return Err(missing()),
            };
            Ok(ChangeRecord::renamed(
                repository,
                task,
                namespaced(*old),
                namespaced(*new),
            ))
        }
        _ => {
            let path = fields.get(1).ok_or_else(missing)?;
            Ok(ChangeRecord::new(repository, task, change, namespaced(*path)))
        }
    }
}

/// `A`, `M` and `D` stand alone; `R` may carry a similarity score.
fn parse_code(code: &str) -> Option<ChangeType> {
    let mut chars = code.chars();
    let change = ChangeType::from_code(chars.next()?)?;
    let rest = chars.as_str();
    match change {
        ChangeType::Renamed if rest.chars().all(|c| c.is_ascii_digit()) => Some(change),
        _ if rest.is_empty() => Some(change),
        _ => None,
    }
}
