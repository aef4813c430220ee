use crate::core::GitRunner;
use crate::domain::model::{CommitStamp, RepoActivity, ScanReport};
use crate::utils::error::Result;
use crate::utils::fs::{has_git_marker, list_subdirectories};
use chrono::{DateTime, Duration, Utc};
use std::path::Path;

/// Default recency window in hours.
pub const DEFAULT_WINDOW_HOURS: u32 = 12;

/// Upper bound accepted for the window (one year).
pub const MAX_WINDOW_HOURS: u32 = 24 * 365;

/// Lists the child repositories of a root that have commits inside a recency window.
pub struct RecentCommitScanner<G: GitRunner> {
    git: G,
    window_hours: u32,
}

impl<G: GitRunner> RecentCommitScanner<G> {
    pub fn new(git: G, window_hours: u32) -> Self {
        Self { git, window_hours }
    }

    pub fn window_hours(&self) -> u32 {
        self.window_hours
    }

    pub async fn scan(&self, root: &Path) -> Result<ScanReport> {
        self.scan_at(root, Utc::now()).await
    }

    /// Same as [`scan`](Self::scan) with an explicit "now".
    pub async fn scan_at(&self, root: &Path, now: DateTime<Utc>) -> Result<ScanReport> {
        let cutoff = now - Duration::hours(i64::from(self.window_hours));
        let dirs = list_subdirectories(root)?;
        tracing::debug!(
            "Scanning {} subdirectories of {} (cutoff {})",
            dirs.len(),
            root.display(),
            cutoff
        );

        let mut active = Vec::new();
        for dir in dirs {
            if !has_git_marker(&dir.path) {
                tracing::debug!("Skipping {}: no .git marker", dir.name);
                continue;
            }

            match self.recent_commits(&dir.path, cutoff).await {
                Ok(commits) if !commits.is_empty() => {
                    tracing::debug!("{}: {} recent commit(s)", dir.name, commits.len());
                    active.push(RepoActivity {
                        name: dir.name,
                        path: dir.path,
                        recent_commits: commits,
                    });
                }
                Ok(_) => tracing::debug!("{}: no recent commits", dir.name),
                // git failures only drop this directory from the report
                Err(e) => tracing::debug!("Skipping {}: {}", dir.name, e),
            }
        }

        Ok(ScanReport {
            root: root.to_path_buf(),
            window_hours: self.window_hours,
            cutoff,
            active,
        })
    }

    async fn recent_commits(&self, dir: &Path, cutoff: DateTime<Utc>) -> Result<Vec<CommitStamp>> {
        // exact "@<seconds> <offset>" form
        let since = format!("--since=@{} +0000", cutoff.timestamp());
        let output = self.git.run(dir, &["log", &since, "--format=%H %ct"]).await?;

        // --since is inclusive, the window boundary is not
        Ok(parse_log_stamps(&output)
            .into_iter()
            .filter(|commit| commit.committed_at > cutoff)
            .collect())
    }
}

/// Parses `git log --format='%H %ct'` output, ignoring malformed lines.
pub fn parse_log_stamps(output: &str) -> Vec<CommitStamp> {
    output
        .lines()
        .filter_map(|line| {
            let (hash, stamp) = line.trim().split_once(' ')?;
            let seconds: i64 = stamp.trim().parse().ok()?;
            let committed_at = DateTime::<Utc>::from_timestamp(seconds, 0)?;
            Some(CommitStamp {
                hash: hash.to_string(),
                committed_at,
            })
        })
        .collect()
}

pub fn render_scan_report(report: &ScanReport) -> String {
    if report.is_empty() {
        return format!(
            "No repositories with commits in the past {} hours under {}\n",
            report.window_hours,
            report.root.display()
        );
    }

    let mut out = format!(
        "Repositories with commits in the past {} hours:\n",
        report.window_hours
    );
    for repo in &report.active {
        out.push_str(&format!("  {}\n", repo.name));
    }
    out
}
