//! Apply format-patch files and commit them

use anyhow::Result;
use colored::Colorize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::git::{GitBackend, GitCli};

/// Options for the patch-apply shortcut.
#[derive(Debug, Default)]
pub struct ApplyArgs {
    pub patches: Vec<PathBuf>,
    pub verbose: bool,
}

/// Applies each patch file to the repository in the current directory and
/// commits it under the patch's subject. Stops at the first failure.
/// Returns the process exit code.
pub async fn handle_apply_command(args: ApplyArgs) -> Result<i32> {
    let backend = GitCli;
    let cwd = env::current_dir()?;

    if !backend.is_repository(&cwd).await {
        println!("{}", "This is not a valid git repository.".red());
        return Ok(1);
    }

    for patch in &args.patches {
        if !patch.is_file() {
            println!("{}", format!("Patch file not found: {}", patch.display()).red());
            return Ok(1);
        }
        if args.verbose {
            println!("{}", format!("Processing patch: {}", patch.display()).green());
        }

        let subject = match subject_from_patch(patch) {
            Some(subject) => subject,
            None => {
                let subject = subject_from_filename(patch);
                if args.verbose {
                    println!("{}", format!("Using filename-based subject: {subject}").yellow());
                }
                subject
            }
        };

        let code = git_step(
            &backend,
            &cwd,
            vec!["apply".into(), "-v".into(), patch.display().to_string()],
            &format!("Failed to apply patch: {}", patch.display()),
        )
        .await?;
        if code != 0 {
            return Ok(code);
        }

        let code = git_step(
            &backend,
            &cwd,
            vec!["add".into(), "-u".into()],
            "Failed to stage changes.",
        )
        .await?;
        if code != 0 {
            return Ok(code);
        }

        let code = git_step(
            &backend,
            &cwd,
            vec!["commit".into(), "-m".into(), subject],
            "Failed to create commit.",
        )
        .await?;
        if code != 0 {
            return Ok(code);
        }
    }

    Ok(0)
}

/// Prints the git command, runs it, and prints `failure` in red when the
/// exit code is non-zero.
async fn git_step(
    backend: &dyn GitBackend,
    cwd: &Path,
    args: Vec<String>,
    failure: &str,
) -> Result<i32> {
    println!("{}", format!("> git {}", args.join(" ")).green());
    let code = backend.run_command(cwd, "git", &args).await?;
    if code != 0 {
        println!("{}", failure.red());
    }
    Ok(code)
}

/// Extracts the commit subject from a format-patch `Subject:` header,
/// unfolding indented continuation lines and stripping the `[PATCH n/m]`
/// marker. Returns `None` for missing or RFC 2047-encoded subjects, which
/// then fall back to the filename.
fn subject_from_patch(patch: &Path) -> Option<String> {
    let contents = fs::read_to_string(patch).ok()?;

    let mut parts: Vec<String> = Vec::new();
    let mut in_subject = false;
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("Subject:") {
            in_subject = true;
            parts.push(strip_patch_marker(rest.trim()).to_string());
        } else if in_subject {
            if line.starts_with(' ') || line.starts_with('\t') {
                parts.push(line.trim().to_string());
            } else {
                break;
            }
        }
    }

    let subject = parts.join(" ").trim().to_string();
    if subject.is_empty() || subject.starts_with("=?") {
        return None;
    }
    Some(subject)
}

/// Strips a leading `[PATCH]` or `[PATCH n/m]` marker
fn strip_patch_marker(subject: &str) -> &str {
    let Some(rest) = subject.strip_prefix("[PATCH") else {
        return subject;
    };
    match rest.find(']') {
        Some(pos) => rest[pos + 1..].trim_start(),
        None => subject,
    }
}

/// Derives a subject from the patch filename: `0001-Fix-the-thing.patch`
/// becomes `Fix the thing`.
fn subject_from_filename(patch: &Path) -> String {
    let stem = patch
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("patch");
    let stem = stem
        .split_once('-')
        .filter(|(prefix, _)| !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()))
        .map(|(_, rest)| rest)
        .unwrap_or(stem);
    stem.replace('-', " ")
}
