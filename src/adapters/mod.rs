// Adapters layer: the real OS collaborators behind the domain ports.

pub mod git;
pub mod privilege;
pub mod prompt;
pub mod scheduler;

pub use git::SystemGit;
pub use privilege::SystemPrivilege;
pub use prompt::StdinConfirm;
pub use scheduler::PowerShellScheduler;
