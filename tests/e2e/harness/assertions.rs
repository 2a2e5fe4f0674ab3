use anyhow::{bail, ensure, Result};
use tasklog_core::{ChangeType, Report, RowShape, Stage, TasklogError};

/// What a scenario run produced
pub struct Outcome {
    pub result: std::result::Result<Report, TasklogError>,
    pub commands: Vec<String>,
}

impl Outcome {
    fn report(&self) -> Result<&Report> {
        match &self.result {
            Ok(report) => Ok(report),
            Err(e) => bail!("expected a report, run failed: {}", e),
        }
    }
}

/// Declarative assertions on a scan outcome
pub enum Assertion {
    // Report shape
    RowCount(usize),
    EmptyReport,
    SharedRow {
        tasks: Vec<String>,
        path: String,
        change: ChangeType,
        count: u32,
    },
    TaskRow {
        task: String,
        change: ChangeType,
        artifacts: Vec<(String, u32)>,
    },
    RenamedFrom {
        path: String,
        old_path: String,
    },
    PathAbsent(String),
    TextContains(String),

    // Failures
    FailsIn(Stage),
    FailsWith(String),

    // Queries
    QueryCount(usize),
    CommandContains(String),

    // Custom
    Custom(Box<dyn Fn(&Outcome) -> Result<()> + Send + Sync>),
}

impl Assertion {
    /// Check the assertion against an outcome
    pub fn check(&self, outcome: &Outcome) -> Result<()> {
        match self {
            Self::RowCount(n) => {
                let rows = outcome.report()?.rows.len();
                ensure!(rows == *n, "expected {} rows, got {}", n, rows);
            }
            Self::EmptyReport => {
                let report = outcome.report()?;
                ensure!(report.is_empty(), "expected no rows, got {:?}", report.rows);
            }
            Self::SharedRow {
                tasks,
                path,
                change,
                count,
            } => {
                let report = outcome.report()?;
                let found = report.shared_rows().any(|row| {
                    row.tasks == *tasks
                        && row
                            .artifacts
                            .iter()
                            .any(|a| a.path == *path && a.change == *change && a.count == *count)
                });
                ensure!(found, "no shared row matched; rows: {:#?}", report.rows);
            }
            Self::TaskRow {
                task,
                change,
                artifacts,
            } => {
                let report = outcome.report()?;
                let row = report
                    .task_rows()
                    .find(|row| row.tasks == [task.clone()] && row.artifacts[0].change == *change);
                let Some(row) = row else {
                    bail!("no row for task {} {}; rows: {:#?}", task, change, report.rows);
                };
                ensure!(row.shape == RowShape::TaskChangeType);
                let actual: Vec<(String, u32)> = row
                    .artifacts
                    .iter()
                    .map(|a| (a.path.clone(), a.count))
                    .collect();
                ensure!(
                    actual == *artifacts,
                    "task {} {}: expected {:?}, got {:?}",
                    task,
                    change,
                    artifacts,
                    actual
                );
            }
            Self::RenamedFrom { path, old_path } => {
                let report = outcome.report()?;
                let found = report.rows.iter().flat_map(|r| &r.artifacts).any(|a| {
                    a.path == *path
                        && a.change == ChangeType::Renamed
                        && a.old_path.as_deref() == Some(old_path.as_str())
                });
                ensure!(found, "no rename {} -> {}; rows: {:#?}", old_path, path, report.rows);
            }
            Self::PathAbsent(path) => {
                let report = outcome.report()?;
                let present = report
                    .rows
                    .iter()
                    .flat_map(|r| &r.artifacts)
                    .any(|a| a.path == *path);
                ensure!(!present, "{} should not be reported", path);
            }
            Self::TextContains(text) => {
                let rendered = outcome.report()?.to_text();
                ensure!(
                    rendered.contains(text.as_str()),
                    "text output missing {:?}:\n{}",
                    text,
                    rendered
                );
            }
            Self::FailsIn(stage) => match &outcome.result {
                Ok(_) => bail!("expected failure in {} stage, run succeeded", stage),
                Err(e) => ensure!(
                    e.stage() == *stage,
                    "expected {} stage, got {} ({})",
                    stage,
                    e.stage(),
                    e
                ),
            },
            Self::FailsWith(text) => match &outcome.result {
                Ok(_) => bail!("expected failure mentioning {:?}, run succeeded", text),
                Err(e) => ensure!(
                    e.to_string().contains(text.as_str()),
                    "error {:?} does not mention {:?}",
                    e.to_string(),
                    text
                ),
            },
            Self::QueryCount(n) => {
                ensure!(
                    outcome.commands.len() == *n,
                    "expected {} queries, got {:?}",
                    n,
                    outcome.commands
                );
            }
            Self::CommandContains(text) => {
                ensure!(
                    outcome.commands.iter().any(|c| c.contains(text.as_str())),
                    "no command contains {:?}: {:?}",
                    text,
                    outcome.commands
                );
            }
            Self::Custom(check) => check(outcome)?,
        }
        Ok(())
    }
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RowCount(n) => write!(f, "RowCount({})", n),
            Self::EmptyReport => write!(f, "EmptyReport"),
            Self::SharedRow {
                tasks,
                path,
                change,
                count,
            } => write!(
                f,
                "SharedRow {{ tasks: {:?}, path: {:?}, change: {}, count: {} }}",
                tasks, path, change, count
            ),
            Self::TaskRow {
                task,
                change,
                artifacts,
            } => write!(
                f,
                "TaskRow {{ task: {:?}, change: {}, artifacts: {:?} }}",
                task, change, artifacts
            ),
            Self::RenamedFrom { path, old_path } => {
                write!(f, "RenamedFrom {{ path: {:?}, old_path: {:?} }}", path, old_path)
            }
            Self::PathAbsent(p) => write!(f, "PathAbsent({:?})", p),
            Self::TextContains(s) => write!(f, "TextContains({:?})", s),
            Self::FailsIn(stage) => write!(f, "FailsIn({})", stage),
            Self::FailsWith(s) => write!(f, "FailsWith({:?})", s),
            Self::QueryCount(n) => write!(f, "QueryCount({})", n),
            Self::CommandContains(s) => write!(f, "CommandContains({:?})", s),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}
