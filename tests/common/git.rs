//! Git helpers for integration tests, driving the real binary

use anyhow::{ensure, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Checks whether the git binary is available; tests that need it skip
/// themselves otherwise.
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Runs git in `path` and fails the calling test helper on error exit.
pub fn git(path: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new("git").args(args).current_dir(path).output()?;
    ensure!(
        output.status.success(),
        "git {} failed in {}: {}",
        args.join(" "),
        path.display(),
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(output)
}

/// Initializes a repository with deterministic branch name and test user
/// configuration.
pub fn setup_git_repo(path: &Path) -> Result<()> {
    git(path, &["init", "-q", "-b", "main"])?;
    git(path, &["config", "user.name", "Test User"])?;
    git(path, &["config", "user.email", "test@example.com"])?;
    git(path, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Writes a file and commits it.
pub fn commit_file(repo: &Path, name: &str, content: &str, message: &str) -> Result<()> {
    fs::write(repo.join(name), content)?;
    git(repo, &["add", name])?;
    git(repo, &["commit", "-q", "-m", message])?;
    Ok(())
}

/// Leaves an uncommitted change to an already tracked file.
pub fn modify_tracked(repo: &Path, name: &str) -> Result<()> {
    fs::write(repo.join(name), "modified content\n")?;
    Ok(())
}

/// Drops an untracked file into the working tree.
pub fn add_untracked(repo: &Path, name: &str) -> Result<()> {
    fs::write(repo.join(name), "untracked content\n")?;
    Ok(())
}

/// Detaches HEAD at the current commit.
pub fn detach_head(repo: &Path) -> Result<()> {
    git(repo, &["checkout", "-q", "--detach"])?;
    Ok(())
}

/// Adds a named remote. The URL does not have to be reachable.
pub fn add_git_remote(repo: &Path, name: &str, url: &str) -> Result<()> {
    git(repo, &["remote", "add", name, url])?;
    Ok(())
}

/// Last commit subject of the repository.
pub fn last_commit_subject(repo: &Path) -> Result<String> {
    let output = git(repo, &["log", "-1", "--pretty=%s"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Produces a format-patch file for the head commit of `source`, written
/// into `dest`. Returns the patch path.
pub fn format_head_patch(source: &Path, dest: &Path) -> Result<PathBuf> {
    let dest_arg = dest.display().to_string();
    let output = git(source, &["format-patch", "-1", "HEAD", "-o", &dest_arg])?;
    let printed = String::from_utf8_lossy(&output.stdout);
    let name = printed
        .lines()
        .last()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    ensure!(!name.is_empty(), "format-patch produced no file");
    Ok(PathBuf::from(name))
}
