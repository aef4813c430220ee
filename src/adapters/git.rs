//! `git` invoked through [`tokio::process::Command`].

use crate::domain::ports::GitRunner;
use crate::utils::error::{ChoreError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct SystemGit {
    program: String,
}

impl SystemGit {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        let mut cmd = Command::new(&self.program);
        cmd.arg("-C").arg(dir).args(args);

        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("spawning git {} in {}", command, dir.display());

        let output = cmd.output().await.map_err(|e| ChoreError::GitCommand {
            command: command.clone(),
            dir: dir.to_path_buf(),
            message: format!("failed to spawn {}: {}", self.program, e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChoreError::GitCommand {
                command,
                dir: dir.to_path_buf(),
                message: format!("{} ({})", stderr.trim(), output.status),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_binary_is_a_git_error() {
        let temp_dir = TempDir::new().unwrap();
        let git = SystemGit::with_program("definitely-not-git-binary");

        let err = git.run(temp_dir.path(), &["status"]).await.unwrap_err();
        match err {
            ChoreError::GitCommand { command, .. } => assert_eq!(command, "status"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
