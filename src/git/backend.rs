//! Git backend abstraction and the CLI implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

use super::record::{repo_kind_at, Branch, Remote, RepoKind, RepoRecord};
use super::status::{parse_porcelain, WorkTreeStatus};

// Timeout for status queries. Commands run on the user's behalf get none.
const QUERY_TIMEOUT_SECS: u64 = 180;

const STATUS_ARGS: &[&str] = &["status", "--porcelain=1", "--untracked-files=normal"];
const BRANCH_ARGS: &[&str] = &["rev-parse", "--abbrev-ref", "HEAD"];
const SYMBOLIC_REF_ARGS: &[&str] = &["symbolic-ref", "--short", "HEAD"];
const REMOTE_ARGS: &[&str] = &["remote", "-v"];

// rev-parse prints this literal on a detached HEAD
const DETACHED_MARKER: &str = "HEAD";

/// The version-control capability the walk depends on.
///
/// Production code talks to the `git` binary through [`GitCli`]; tests can
/// substitute an in-memory implementation so classification and the batch
/// loop run without spawning processes.
#[async_trait]
pub trait GitBackend: Send + Sync {
    /// Checks for repository metadata without invoking git
    async fn is_repository(&self, path: &Path) -> bool;

    /// Parsed working-tree status
    async fn status(&self, path: &Path) -> Result<WorkTreeStatus>;

    /// The currently checked-out branch
    async fn active_branch(&self, path: &Path) -> Branch;

    /// Configured remotes, in git's listing order
    async fn remotes(&self, path: &Path) -> Result<Vec<Remote>>;

    /// Runs a git query in `path` with captured output.
    /// Returns (success, stdout, stderr).
    async fn run_git(&self, path: &Path, args: &[&str]) -> Result<(bool, String, String)>;

    /// Runs an arbitrary command in `path` with inherited stdio and no
    /// timeout, returning its exit code.
    async fn run_command(&self, path: &Path, program: &str, args: &[String]) -> Result<i32>;
}

/// Backend that shells out to the `git` binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct GitCli;

#[async_trait]
impl GitBackend for GitCli {
    async fn is_repository(&self, path: &Path) -> bool {
        repo_kind_at(path).is_some()
    }

    async fn status(&self, path: &Path) -> Result<WorkTreeStatus> {
        let (success, stdout, stderr) = self.run_git(path, STATUS_ARGS).await?;
        if !success {
            anyhow::bail!("git status failed: {}", first_line(&stderr));
        }
        Ok(parse_porcelain(&stdout))
    }

    async fn active_branch(&self, path: &Path) -> Branch {
        match self.run_git(path, BRANCH_ARGS).await {
            Ok((true, name, _)) if name == DETACHED_MARKER => Branch::Detached,
            Ok((true, name, _)) if !name.is_empty() => Branch::Named(name),
            _ => {
                // rev-parse fails on unborn branches; the symref still names them
                match self.run_git(path, SYMBOLIC_REF_ARGS).await {
                    Ok((true, name, _)) if !name.is_empty() => Branch::Named(name),
                    _ => Branch::Unknown,
                }
            }
        }
    }

    async fn remotes(&self, path: &Path) -> Result<Vec<Remote>> {
        let (success, stdout, stderr) = self.run_git(path, REMOTE_ARGS).await?;
        if !success {
            anyhow::bail!("git remote failed: {}", first_line(&stderr));
        }
        Ok(parse_remotes(&stdout))
    }

    async fn run_git(&self, path: &Path, args: &[&str]) -> Result<(bool, String, String)> {
        run_git(path, args).await
    }

    async fn run_command(&self, path: &Path, program: &str, args: &[String]) -> Result<i32> {
        let status = Command::new(program)
            .args(args)
            .current_dir(path)
            .status()
            .await
            .with_context(|| format!("failed to start {program}"))?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Runs a git command in the specified directory with a timeout.
/// Returns (success, stdout, stderr).
pub async fn run_git(path: &Path, args: &[&str]) -> Result<(bool, String, String)> {
    let output = tokio::time::timeout(
        Duration::from_secs(QUERY_TIMEOUT_SECS),
        Command::new("git").args(args).current_dir(path).output(),
    )
    .await
    .with_context(|| format!("git {} timed out in {}", args.join(" "), path.display()))?
    .with_context(|| format!("failed to run git in {}", path.display()))?;

    Ok((
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
    ))
}

/// Builds the full record for a discovered repository.
pub async fn classify(
    backend: &dyn GitBackend,
    path: &Path,
    kind: RepoKind,
) -> Result<RepoRecord> {
    let status = backend.status(path).await?;
    let branch = backend.active_branch(path).await;
    let remotes = backend.remotes(path).await?;
    Ok(RepoRecord {
        path: path.to_path_buf(),
        kind,
        branch,
        status,
        remotes,
    })
}

/// Owned argv for [`GitBackend::run_command`].
pub fn to_string_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("unknown error").trim()
}

/// Splits `git remote -v` output into ordered name/url pairs, keeping one
/// entry per remote.
fn parse_remotes(output: &str) -> Vec<Remote> {
    let mut remotes: Vec<Remote> = Vec::new();
    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let (Some(name), Some(url)) = (fields.next(), fields.next()) else {
            continue;
        };
        if fields.next() == Some("(push)") {
            continue;
        }
        if remotes.iter().any(|r| r.name == name) {
            continue;
        }
        remotes.push(Remote {
            name: name.to_string(),
            url: url.to_string(),
        });
    }
    remotes
}
