pub mod branches;
pub mod recent_commits;
pub mod schedule;

pub use crate::domain::ports::{Confirm, GitRunner, PrivilegeCheck, TaskScheduler};
