//! E2E test harness for tasklog.
//!
//! This module contains test infrastructure with builders and assertions
//! that not every scenario uses.

#![allow(dead_code)]

pub mod assertions;
pub mod runner;
pub mod workspace;

// Re-export commonly used types
pub use assertions::{Assertion, Outcome};
pub use history::{added, deleted, modified, renamed, History};
pub use scenario::Scenario;
