use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tasklog_core::{HistoryQuery, HistoryRunner, Result, TasklogError};

/// What a repository's history query returns
#[derive(Debug, Clone)]
pub enum Scripted {
    Output(String),
    Failure(String),
}

/// Answers history queries from a script instead of running git
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    script: HashMap<String, Scripted>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new(script: HashMap<String, Scripted>) -> Self {
        Self {
            script,
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared log of executed command lines
    pub fn executed(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.executed)
    }
}

impl HistoryRunner for ScriptedRunner {
    fn run(&self, query: &HistoryQuery) -> Result<String> {
        self.executed
            .lock()
            .expect("executed log poisoned")
            .push(query.command_line());

        match self.script.get(&query.repository.name) {
            Some(Scripted::Output(text)) => Ok(text.clone()),
            Some(Scripted::Failure(stderr)) => Err(TasklogError::QueryFailed {
                repository: query.repository.name.clone(),
                command: query.command_line(),
                diagnostic: stderr.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}
