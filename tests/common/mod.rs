#![allow(dead_code)]

use async_trait::async_trait;
use repo_chores::core::{Confirm, GitRunner, PrivilegeCheck, TaskScheduler};
use repo_chores::domain::model::TaskDefinition;
use repo_chores::{ChoreError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Canned answers for one repository.
#[derive(Debug, Clone, Default)]
pub struct FakeRepo {
    pub log: String,
    pub branches: String,
    pub current: String,
    pub fail: Option<String>,
}

/// Git stand-in that records every invocation as `(dir name, args)`.
#[derive(Clone, Default)]
pub struct RecordingGit {
    pub repos: HashMap<String, FakeRepo>,
    pub calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl RecordingGit {
    pub fn with_repo(mut self, name: &str, repo: FakeRepo) -> Self {
        self.repos.insert(name.to_string(), repo);
        self
    }

    pub fn calls_for(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(dir, _)| dir == name)
            .count()
    }
}

#[async_trait]
impl GitRunner for RecordingGit {
    async fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        self.calls
            .lock()
            .unwrap()
            .push((name.clone(), args.iter().map(|a| a.to_string()).collect()));

        let repo = self.repos.get(&name).cloned().unwrap_or_default();
        if let Some(message) = repo.fail {
            return Err(ChoreError::GitCommand {
                command: args.join(" "),
                dir: PathBuf::from(dir),
                message,
            });
        }

        Ok(match args {
            ["log", ..] => repo.log,
            ["branch", "--all"] => repo.branches,
            ["branch", "--show-current"] => repo.current,
            _ => String::new(),
        })
    }
}

/// Scheduler that behaves like the OS one: registering an existing name fails.
#[derive(Clone, Default)]
pub struct InMemoryScheduler {
    pub tasks: Arc<Mutex<HashMap<String, TaskDefinition>>>,
    pub started: Arc<Mutex<Vec<String>>>,
    pub operations: Arc<Mutex<Vec<String>>>,
    pub fail_register: Option<String>,
}

impl InMemoryScheduler {
    pub fn task_count(&self, name: &str) -> usize {
        self.tasks.lock().unwrap().keys().filter(|k| *k == name).count()
    }

    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskScheduler for InMemoryScheduler {
    async fn task_exists(&self, name: &str) -> Result<bool> {
        self.operations.lock().unwrap().push("exists".to_string());
        Ok(self.tasks.lock().unwrap().contains_key(name))
    }

    async fn unregister(&self, name: &str) -> Result<()> {
        self.operations.lock().unwrap().push("unregister".to_string());
        self.tasks.lock().unwrap().remove(name);
        Ok(())
    }

    async fn register(&self, definition: &TaskDefinition) -> Result<()> {
        self.operations.lock().unwrap().push("register".to_string());
        if let Some(message) = &self.fail_register {
            return Err(ChoreError::Scheduler {
                operation: "register".to_string(),
                message: message.clone(),
            });
        }

        let mut tasks = self.tasks.lock().unwrap();
        if tasks.contains_key(&definition.name) {
            return Err(ChoreError::Scheduler {
                operation: "register".to_string(),
                message: format!("Cannot create a file when that file already exists: {}", definition.name),
            });
        }
        tasks.insert(definition.name.clone(), definition.clone());
        Ok(())
    }

    async fn start(&self, name: &str) -> Result<()> {
        self.operations.lock().unwrap().push("start".to_string());
        self.started.lock().unwrap().push(name.to_string());
        Ok(())
    }
}

pub struct FixedPrivilege(pub bool);

#[async_trait]
impl PrivilegeCheck for FixedPrivilege {
    async fn is_elevated(&self) -> Result<bool> {
        Ok(self.0)
    }
}

/// Answers every question the same way and counts how often it was asked.
#[derive(Clone)]
pub struct ScriptedConfirm {
    pub answer: bool,
    pub asked: Arc<Mutex<usize>>,
}

impl ScriptedConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Arc::new(Mutex::new(0)),
        }
    }

    pub fn times_asked(&self) -> usize {
        *self.asked.lock().unwrap()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, _question: &str) -> Result<bool> {
        *self.asked.lock().unwrap() += 1;
        Ok(self.answer)
    }
}

pub fn make_repo(root: &Path, name: &str) -> PathBuf {
    let path = root.join(name);
    std::fs::create_dir_all(path.join(".git")).unwrap();
    path
}

pub fn make_plain_dir(root: &Path, name: &str) -> PathBuf {
    let path = root.join(name);
    std::fs::create_dir_all(&path).unwrap();
    path
}
