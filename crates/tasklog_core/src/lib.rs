//! tasklog core library
//!
//! Audits which files a set of work items ("tasks") touched, across several
//! local git repositories:
//! - Builds one `git log` query per repository
//! - Parses commit subjects and name-status lines into change records
//! - Follows renames and drops history closed by a deletion
//! - Groups changes per file and classifies them into report rows
//!
//! # Quick Start
//!
//! ```no_run
//! use tasklog_core::{ScanConfig, Scanner};
//!
//! let config = ScanConfig {
//!     repositories: vec!["/work/foo-api".into(), "/work/foo-web".into()],
//!     author: "jon".to_string(),
//!     tasks: vec!["1189666".to_string(), "1176490".to_string()],
//!     ..Default::default()
//! };
//!
//! let report = Scanner::new(config).run().unwrap();
//! print!("{}", report.to_text());
//! ```
//!
//! # Pipeline
//!
//! Each stage only depends on the previous stage's output, so stages can be
//! driven on their own:
//!
//! ```
//! use tasklog_core::{aggregate, classify, resolve, AggregateOptions, HistoryParser};
//!
//! let history = "Task 1001 header\nM\tsrc/a.html\n\nTask 1002 footer\nM\tsrc/a.html\n";
//! let mut records = HistoryParser::new("task").unwrap().parse(history, "foo").unwrap();
//! resolve(&mut records);
//!
//! let artifacts = aggregate(&records, AggregateOptions::default());
//! let report = classify(&artifacts, &["1001".to_string(), "1002".to_string()]);
//!
//! assert_eq!(report.rows.len(), 1);
//! assert_eq!(report.rows[0].tasks, vec!["1001", "1002"]);
//! assert_eq!(report.rows[0].artifacts[0].count, 2);
//! ```

mod aggregate;
mod config;
mod error;
mod executor;
mod parser;
mod query;
mod report;
mod resolver;
mod scan;
mod types;

pub use aggregate::{aggregate, compare_suffix_first, exclude_change, AggregateOptions};
pub use config::{split_list, ScanConfig};
pub use error::{Result, Stage, TasklogError};
pub use executor::{execute_all, FsProbe, GitRunner, HistoryRunner, PathProbe, RepositoryOutput};
pub use parser::HistoryParser;
pub use query::HistoryQuery;
pub use report::{classify, shared_change_rows, task_change_rows, Report};
pub use resolver::{propagate_renames, prune_deletions, resolve};
pub use scan::Scanner;
pub use types::*;
