pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{PowerShellScheduler, StdinConfirm, SystemGit, SystemPrivilege};
pub use crate::core::{
    branches::BranchLister,
    recent_commits::RecentCommitScanner,
    schedule::{StartPolicy, TaskRegistrar},
};
pub use utils::error::{ChoreError, Result};
