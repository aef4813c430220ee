use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subdirectory {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitStamp {
    pub hash: String,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoActivity {
    pub name: String,
    pub path: PathBuf,
    pub recent_commits: Vec<CommitStamp>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub window_hours: u32,
    pub cutoff: DateTime<Utc>,
    pub active: Vec<RepoActivity>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.active.iter().map(|r| r.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BranchStatus {
    Repository {
        branches: Vec<String>,
        current: Option<String>,
    },
    NotARepository,
    Unreadable {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchEntry {
    pub name: String,
    pub status: BranchStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchReport {
    pub root: PathBuf,
    pub entries: Vec<BranchEntry>,
}

impl BranchReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, name: &str) -> Option<&BranchEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// What the scheduled task runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAction {
    pub execute: String,
    pub arguments: String,
    pub working_directory: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTrigger {
    pub daily_at: NaiveTime,
}

/// Power and network preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskSettings {
    pub allow_start_if_on_batteries: bool,
    pub dont_stop_if_going_on_batteries: bool,
    pub start_when_available: bool,
    pub run_only_if_network_available: bool,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            allow_start_if_on_batteries: true,
            dont_stop_if_going_on_batteries: true,
            start_when_available: true,
            run_only_if_network_available: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogonType {
    Interactive,
    S4U,
    ServiceAccount,
}

impl LogonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogonType::Interactive => "Interactive",
            LogonType::S4U => "S4U",
            LogonType::ServiceAccount => "ServiceAccount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunLevel {
    Limited,
    Highest,
}

impl RunLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunLevel::Limited => "Limited",
            RunLevel::Highest => "Highest",
        }
    }
}

/// Identity the task runs as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPrincipal {
    pub user_id: String,
    pub logon_type: LogonType,
    pub run_level: RunLevel,
}

impl TaskPrincipal {
    /// Interactive logon at the highest run level.
    pub fn with_user(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            logon_type: LogonType::Interactive,
            run_level: RunLevel::Highest,
        }
    }

    /// `DOMAIN\user` from the environment; falls back to the bare user name.
    pub fn current_user() -> Option<Self> {
        let user = std::env::var("USERNAME")
            .or_else(|_| std::env::var("USER"))
            .ok()?;
        let user_id = match std::env::var("USERDOMAIN") {
            Ok(domain) if !domain.is_empty() => format!("{}\\{}", domain, user),
            _ => user,
        };
        Some(Self::with_user(&user_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub name: String,
    pub description: String,
    pub action: TaskAction,
    pub trigger: TaskTrigger,
    pub settings: TaskSettings,
    pub principal: TaskPrincipal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegistrationOutcome {
    pub replaced_existing: bool,
    pub started: bool,
}
