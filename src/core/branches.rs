use crate::core::GitRunner;
use crate::domain::model::{BranchEntry, BranchReport, BranchStatus};
use crate::utils::error::Result;
use crate::utils::fs::{has_git_marker, list_subdirectories};
use std::path::Path;

/// Prints local/remote branches and the checked-out branch for each child repository.
pub struct BranchLister<G: GitRunner> {
    git: G,
}

impl<G: GitRunner> BranchLister<G> {
    pub fn new(git: G) -> Self {
        Self { git }
    }

    pub async fn list(&self, root: &Path) -> Result<BranchReport> {
        let dirs = list_subdirectories(root)?;
        tracing::debug!("Listing branches for {} subdirectories", dirs.len());

        let mut entries = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let status = if has_git_marker(&dir.path) {
                self.read_branches(&dir.path).await.unwrap_or_else(|e| {
                    tracing::warn!("⚠️ Could not read branches of {}: {}", dir.name, e);
                    BranchStatus::Unreadable {
                        reason: e.to_string(),
                    }
                })
            } else {
                BranchStatus::NotARepository
            };
            entries.push(BranchEntry {
                name: dir.name,
                status,
            });
        }

        Ok(BranchReport {
            root: root.to_path_buf(),
            entries,
        })
    }

    async fn read_branches(&self, dir: &Path) -> Result<BranchStatus> {
        let all = self.git.run(dir, &["branch", "--all"]).await?;
        let current = self.git.run(dir, &["branch", "--show-current"]).await?;
        let current = current.trim();

        Ok(BranchStatus::Repository {
            branches: parse_branch_list(&all),
            current: (!current.is_empty()).then(|| current.to_string()),
        })
    }
}

/// Parses `git branch --all` output into plain branch names.
///
/// Drops the `*`/`+` markers, detached-HEAD placeholders and
/// `remotes/<r>/HEAD -> ...` aliases.
pub fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let name = line
                .trim_start_matches(['*', '+'])
                .trim();
            if name.is_empty() || name.starts_with('(') || name.contains(" -> ") {
                return None;
            }
            Some(name.to_string())
        })
        .collect()
}

pub fn render_branch_report(report: &BranchReport) -> String {
    if report.is_empty() {
        return format!("No subdirectories found in {}\n", report.root.display());
    }

    let mut out = String::new();
    for entry in &report.entries {
        match &entry.status {
            BranchStatus::Repository { branches, current } => {
                out.push_str(&format!("Repository: {}\n", entry.name));
                out.push_str("  Branches:\n");
                for branch in branches {
                    out.push_str(&format!("    {}\n", branch));
                }
                out.push_str(&format!(
                    "  Current branch: {}\n",
                    current.as_deref().unwrap_or("(detached HEAD)")
                ));
            }
            BranchStatus::NotARepository => {
                out.push_str(&format!("{}: not a git repository\n", entry.name));
            }
            BranchStatus::Unreadable { reason } => {
                out.push_str(&format!("{}: failed to read branches ({})\n", entry.name, reason));
            }
        }
    }
    out
}
