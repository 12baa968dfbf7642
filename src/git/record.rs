//! Repository records produced by the walk

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::status::WorkTreeStatus;

/// How a repository stores its metadata on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepoKind {
    /// A regular repository with a `.git` directory
    Standard,
    /// A submodule or worktree whose `.git` is a file pointing at the real gitdir
    Linked,
}

/// The branch a repository currently has checked out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Branch {
    Named(String),
    /// HEAD points at a commit rather than a branch
    Detached,
    /// The branch could not be determined at all
    Unknown,
}

impl Branch {
    /// Returns the branch name, or `None` for detached and unknown states
    pub fn name(&self) -> Option<&str> {
        match self {
            Branch::Named(name) => Some(name),
            Branch::Detached | Branch::Unknown => None,
        }
    }

    /// Label shown in report lines
    pub fn label(&self) -> &str {
        match self {
            Branch::Named(name) => name,
            Branch::Detached => "detached",
            Branch::Unknown => "unknown",
        }
    }
}

/// A configured remote, in git's listing order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// Everything the walk learned about one repository.
///
/// Records are only built for directories confirmed to contain git metadata
/// and live for the duration of a single run.
#[derive(Clone, Debug)]
pub struct RepoRecord {
    /// Absolute path of the working tree
    pub path: PathBuf,
    pub kind: RepoKind,
    pub branch: Branch,
    pub status: WorkTreeStatus,
    pub remotes: Vec<Remote>,
}

impl RepoRecord {
    /// True when tracked changes or untracked files are present
    pub fn is_dirty(&self) -> bool {
        self.status.is_dirty()
    }

    /// The repository's directory name
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
    }
}

/// Check if a `.git` file (used by submodules and worktrees) contains a
/// gitdir reference. Only reads the first few lines.
fn is_git_file(path: &Path) -> bool {
    match fs::File::open(path) {
        Ok(file) => BufReader::new(file)
            .lines()
            .take(5)
            .filter_map(Result::ok)
            .any(|line| line.trim_start().starts_with("gitdir:")),
        Err(_) => false,
    }
}

/// Probes a directory for repository metadata without invoking git.
///
/// Returns the repository kind when `dir/.git` exists as a directory or as
/// a gitdir file, `None` otherwise.
pub fn repo_kind_at(dir: &Path) -> Option<RepoKind> {
    let marker = dir.join(".git");
    match fs::metadata(&marker) {
        Ok(meta) if meta.is_dir() => Some(RepoKind::Standard),
        Ok(meta) if meta.is_file() && is_git_file(&marker) => Some(RepoKind::Linked),
        _ => None,
    }
}
