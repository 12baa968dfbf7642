//! Per-repository actions

use anyhow::Result;
use colored::Colorize;

use crate::git::{GitBackend, RepoRecord};

/// What to run in each matched repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionSpec {
    /// Argv executed directly, without a shell
    Run(Vec<String>),
    /// A command line handed to `sh -c`
    Shell(String),
    /// An interactive shell rooted at the repository
    Bash,
    /// `git gui` rooted at the repository
    Gui,
}

impl ActionSpec {
    /// Parses the `--action` tokens.
    ///
    /// A lone `bash` or `gui` selects the interactive variants and
    /// `run CMD...` executes CMD directly; anything else is treated as a
    /// shell command line.
    pub fn parse(tokens: &[String]) -> Result<ActionSpec> {
        match tokens.first().map(String::as_str) {
            None => anyhow::bail!("empty action"),
            Some("bash") if tokens.len() == 1 => Ok(ActionSpec::Bash),
            Some("gui") if tokens.len() == 1 => Ok(ActionSpec::Gui),
            Some("run") => {
                let argv = tokens[1..].to_vec();
                if argv.is_empty() {
                    anyhow::bail!("'run' needs a command to execute");
                }
                Ok(ActionSpec::Run(argv))
            }
            Some(_) => Ok(ActionSpec::Shell(tokens.join(" "))),
        }
    }

    /// True for the variants that take over the terminal
    pub fn is_interactive(&self) -> bool {
        matches!(self, ActionSpec::Bash | ActionSpec::Gui)
    }
}

/// Outcome of one repository's action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed { exit_code: i32 },
    /// Interactive sessions are not scored
    Interactive,
}

/// Case-insensitive `{placeholder}` substitution.
///
/// Supported tokens: `{ab}` and `{ActiveBranch}` for the branch name,
/// `{RepositoryName}` for the directory name, `{RepositoryPath}` for the
/// absolute path. Unknown tokens pass through verbatim. Branch tokens fail
/// when the repository has no named branch.
pub fn substitute_placeholders(template: &str, record: &RepoRecord) -> Result<String> {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let after = &rest[start..];
        match after.find('}') {
            Some(end) => {
                match replacement(&after[1..end], record)? {
                    Some(value) => result.push_str(&value),
                    None => result.push_str(&after[..=end]),
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(after);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    Ok(result)
}

fn replacement(token: &str, record: &RepoRecord) -> Result<Option<String>> {
    match token.to_ascii_lowercase().as_str() {
        "ab" | "activebranch" => match record.branch.name() {
            Some(name) => Ok(Some(name.to_string())),
            None => anyhow::bail!(
                "cannot substitute {{{token}}}: {} branch in {}",
                record.branch.label(),
                record.path.display()
            ),
        },
        "repositoryname" => Ok(Some(record.name().to_string())),
        "repositorypath" => Ok(Some(record.path.display().to_string())),
        _ => Ok(None),
    }
}

/// Runs the action once in `record.path` with inherited stdio and no
/// timeout. Substitution failures surface as errors before anything runs.
pub async fn run_action(
    backend: &dyn GitBackend,
    spec: &ActionSpec,
    record: &RepoRecord,
) -> Result<ActionOutcome> {
    match spec {
        ActionSpec::Bash => {
            println!();
            println!("{}", "> Note that you are running in a new shell...".yellow());
            println!("{}", "> * Press \"CTRL + D\" to exit the shell!".yellow());
            println!(
                "{}",
                "> * Press \"CTRL + C, CTRL + D\" to abort the walk!".yellow()
            );
            backend.run_command(&record.path, "bash", &[]).await?;
            Ok(ActionOutcome::Interactive)
        }
        ActionSpec::Gui => {
            backend
                .run_command(&record.path, "git", &["gui".to_string()])
                .await?;
            Ok(ActionOutcome::Interactive)
        }
        ActionSpec::Run(argv) => {
            let mut substituted = Vec::with_capacity(argv.len());
            for token in argv {
                substituted.push(substitute_placeholders(token, record)?);
            }
            let Some((program, args)) = substituted.split_first() else {
                anyhow::bail!("empty action command");
            };
            let code = backend.run_command(&record.path, program, args).await?;
            Ok(outcome_for(code))
        }
        ActionSpec::Shell(command) => {
            let command = substitute_placeholders(command, record)?;
            let code = backend
                .run_command(&record.path, "sh", &["-c".to_string(), command])
                .await?;
            Ok(outcome_for(code))
        }
    }
}

fn outcome_for(exit_code: i32) -> ActionOutcome {
    if exit_code == 0 {
        ActionOutcome::Succeeded
    } else {
        ActionOutcome::Failed { exit_code }
    }
}
