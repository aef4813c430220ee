use crate::domain::model::TaskDefinition;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Runs git inside a working tree and returns its stdout.
#[async_trait]
pub trait GitRunner: Send + Sync {
    async fn run(&self, dir: &Path, args: &[&str]) -> Result<String>;
}

/// The OS task scheduler.
#[async_trait]
pub trait TaskScheduler: Send + Sync {
    async fn task_exists(&self, name: &str) -> Result<bool>;
    async fn unregister(&self, name: &str) -> Result<()>;
    async fn register(&self, definition: &TaskDefinition) -> Result<()>;
    async fn start(&self, name: &str) -> Result<()>;
}

#[async_trait]
pub trait PrivilegeCheck: Send + Sync {
    async fn is_elevated(&self) -> Result<bool>;
}

/// Asks the operator a yes/no question.
pub trait Confirm: Send + Sync {
    fn confirm(&self, question: &str) -> Result<bool>;
}
