//! Test fixtures and builders

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::git::{add_untracked, commit_file, modify_tracked, setup_git_repo};

/// A directory tree of repositories with automatic cleanup.
pub struct RepoTree {
    temp_dir: TempDir,
}

impl RepoTree {
    pub fn new() -> Result<RepoTree> {
        Ok(RepoTree {
            temp_dir: TempDir::new()?,
        })
    }

    /// The walk root. Canonicalized so assertions survive symlinked
    /// temp directories.
    pub fn root(&self) -> PathBuf {
        self.temp_dir
            .path()
            .canonicalize()
            .unwrap_or_else(|_| self.temp_dir.path().to_path_buf())
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Adds a clean repository with one commit on `main`.
    pub fn add_clean(&self, name: &str) -> Result<PathBuf> {
        let repo = self.temp_dir.path().join(name);
        fs::create_dir_all(&repo)?;
        setup_git_repo(&repo)?;
        commit_file(&repo, "README.md", "# test\n", "initial commit")?;
        Ok(self.path_of(name))
    }

    /// Adds a repository with an uncommitted change to a tracked file.
    pub fn add_modified(&self, name: &str) -> Result<PathBuf> {
        let repo = self.add_clean(name)?;
        modify_tracked(&repo, "README.md")?;
        Ok(repo)
    }

    /// Adds a repository whose only change is an untracked file.
    pub fn add_with_untracked(&self, name: &str) -> Result<PathBuf> {
        let repo = self.add_clean(name)?;
        add_untracked(&repo, "notes.txt")?;
        Ok(repo)
    }

    /// Adds a plain directory without git metadata.
    pub fn add_plain_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.temp_dir.path().join(name);
        fs::create_dir_all(&dir)?;
        Ok(self.path_of(name))
    }

    /// Writes a blacklist/whitelist file into the tree root.
    pub fn write_list(&self, name: &str, patterns: &[&str]) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, patterns.join("\n") + "\n")?;
        Ok(self.path_of(name))
    }
}

/// Changes the working directory for the lifetime of the guard. Combine
/// with `lock_test` so concurrent tests do not interleave.
pub struct DirGuard {
    original: PathBuf,
}

impl DirGuard {
    pub fn enter(path: &Path) -> Result<DirGuard> {
        let original = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(DirGuard { original })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}
