//! Pull shortcut for the current repository

use anyhow::Result;
use colored::Colorize;
use std::env;

use crate::git::{to_string_args, Branch, GitBackend, GitCli};

/// Options for the pull shortcut.
#[derive(Debug, Default)]
pub struct PullArgs {
    pub rebase: bool,
}

/// Pulls the active branch from `origin`, or from the first configured
/// remote when there is no `origin`. Returns the process exit code.
pub async fn handle_pull_command(args: PullArgs) -> Result<i32> {
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
                format!("No branch to pull ({} HEAD).", other.label()).red()
            );
            return Ok(1);
        }
    };

    let remotes = backend.remotes(&cwd).await?;
    let Some(remote) = remotes
        .iter()
        .find(|r| r.name == "origin")
        .or_else(|| remotes.first())
    else {
        println!("{}", "The repository has no remotes to pull from.".red());
        return Ok(1);
    };

    let mut pull_args = vec!["pull", remote.name.as_str(), branch.as_str()];
    if args.rebase {
        pull_args.push("--rebase");
    }

    println!("{}", format!("> git {}", pull_args.join(" ")).green());
    let code = backend
        .run_command(&cwd, "git", &to_string_args(&pull_args))
        .await?;
    Ok(code)
}
