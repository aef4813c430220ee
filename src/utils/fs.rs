use crate::domain::model::Subdirectory;
use crate::utils::error::{ChoreError, Result};
use std::fs;
use std::path::Path;

/// Immediate child directories of `root`, sorted by name.
///
/// A missing (or non-directory) root is an error; an empty root is not.
pub fn list_subdirectories(root: &Path) -> Result<Vec<Subdirectory>> {
    if !root.is_dir() {
        return Err(ChoreError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        dirs.push(Subdirectory {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
        });
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(dirs)
}

/// `.git` may be a directory or a gitfile (linked worktrees, submodules).
pub fn has_git_marker(dir: &Path) -> bool {
    let marker = dir.join(".git");
    marker.is_dir() || marker.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_directories_sorted() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("zeta")).unwrap();
        fs::create_dir(temp_dir.path().join("alpha")).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let dirs = list_subdirectories(temp_dir.path()).unwrap();
        let names: Vec<&str> = dirs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");
        assert!(matches!(
            list_subdirectories(&missing),
            Err(ChoreError::RootNotFound { .. })
        ));
    }

    #[test]
    fn test_git_marker_accepts_dir_and_gitfile() {
        let temp_dir = TempDir::new().unwrap();
        let repo = temp_dir.path().join("repo");
        let worktree = temp_dir.path().join("worktree");
        let plain = temp_dir.path().join("plain");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::create_dir(&worktree).unwrap();
        fs::write(worktree.join(".git"), "gitdir: ../repo/.git/worktrees/wt\n").unwrap();
        fs::create_dir(&plain).unwrap();

        assert!(has_git_marker(&repo));
        assert!(has_git_marker(&worktree));
        assert!(!has_git_marker(&plain));
    }
}
