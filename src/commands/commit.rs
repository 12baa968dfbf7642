//! Commit-and-push shortcut for the current repository

use anyhow::Result;
use colored::Colorize;
use std::env;
use std::path::Path;

use crate::git::{to_string_args, Branch, GitBackend, GitCli};
use crate::utils::warn;

/// Options for the commit shortcut.
#[derive(Debug, Default)]
pub struct CommitArgs {
    /// Stage untracked files too (`git add -A` instead of `-u`)
    pub all: bool,
    /// Print the git commands without running them
    pub show: bool,
    /// Skip staging and committing, only push
    pub push_only: bool,
    pub message: Option<String>,
}

/// Stages, commits, and pushes the repository in the current directory.
/// Returns the process exit code.
pub async fn handle_commit_command(args: CommitArgs) -> Result<i32> {
    let backend = GitCli;
    let cwd = env::current_dir()?;

    if !backend.is_repository(&cwd).await {
        println!("{}", "This is not a valid git repository.".red());
        return Ok(1);
    }

    let branch = match backend.active_branch(&cwd).await {
        Branch::Named(name) => name,
        other => {
            println!(
                "{}",
                format!("No branch to push ({} HEAD).", other.label()).red()
            );
            return Ok(1);
        }
    };

    if args.push_only {
        let failures = push_to_remotes(&backend, &cwd, &branch, args.show).await?;
        return Ok(exit_code(failures));
    }

    let status = backend.status(&cwd).await?;
    if status.is_clean() {
        println!("{}", "The git repository is clean.".green());
        return Ok(0);
    }

    // Show what is about to be staged, exactly as git reports it
    let _ = backend
        .run_command(
            &cwd,
            "git",
            &to_string_args(&["status", "-s", "--untracked-files=normal"]),
        )
        .await;

    // Without --all, untracked-only repositories have nothing to stage
    let has_work = if args.all {
        status.is_dirty()
    } else {
        status.modified_count() > 0
    };
    if !has_work {
        return Ok(0);
    }

    let mut failures = 0;
    let add_args: &[&str] = if args.all { &["add", "-A"] } else { &["add", "-u"] };
    failures += execute(&backend, &cwd, add_args, args.show).await;

    match &args.message {
        Some(message) => {
            failures +=
                execute(&backend, &cwd, &["commit", "-m", message.as_str()], args.show).await;
        }
        None => {
            // git opens the configured editor
            failures += execute(&backend, &cwd, &["commit"], args.show).await;
        }
    }

    failures += push_to_remotes(&backend, &cwd, &branch, args.show).await?;
    Ok(exit_code(failures))
}

/// Pushes the branch to every configured remote, in listing order.
async fn push_to_remotes(
    backend: &dyn GitBackend,
    cwd: &Path,
    branch: &str,
    show_only: bool,
) -> Result<u32> {
    let mut failures = 0;
    for remote in backend.remotes(cwd).await? {
        failures += execute(
            backend,
            cwd,
            &["push", remote.name.as_str(), branch],
            show_only,
        )
        .await;
    }
    Ok(failures)
}

/// Prints the git command, then runs it with inherited stdio unless
/// `show_only` is set. Returns 1 on failure for exit-code accumulation.
async fn execute(backend: &dyn GitBackend, cwd: &Path, args: &[&str], show_only: bool) -> u32 {
    println!("{}", format!("> git {}", args.join(" ")).green());
    if show_only {
        return 0;
    }
    match backend.run_command(cwd, "git", &to_string_args(args)).await {
        Ok(0) => 0,
        Ok(_) => 1,
        Err(err) => {
            warn(format!("git {} failed: {}", args.join(" "), err));
            1
        }
    }
}

fn exit_code(failures: u32) -> i32 {
    if failures > 0 {
        1
    } else {
        0
    }
}
