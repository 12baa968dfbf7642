//! gitwalk binary entry point

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use gitwalk::commands::{
    handle_apply_command, handle_commit_command, handle_pull_command, handle_walk_command,
    ApplyArgs, CommitArgs, PullArgs, WalkArgs,
};
use gitwalk::core::{ActionSpec, ReportLevel, StatusFilter, WalkMode};

fn build_cli() -> Command {
    Command::new("gitwalk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Walk directory trees for Git repositories, report their state, and run commands across them")
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("directory")
                .short('d')
                .long("directory")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(".")
                .help("Directory to search for repositories"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("Descend beyond the root's immediate children"),
        )
        .arg(
            Arg::new("nested")
                .long("nested")
                .action(ArgAction::SetTrue)
                .help("Keep searching inside discovered repositories"),
        )
        .arg(
            Arg::new("filter")
                .short('f')
                .long("filter")
                .value_name("CONDITION")
                .value_parser(PossibleValuesParser::new(StatusFilter::VALUES.iter().copied()))
                .default_value("modified")
                .help("Keep repositories whose status matches CONDITION"),
        )
        .arg(
            Arg::new("blacklist")
                .short('b')
                .long("blacklist")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("File of path patterns to exclude"),
        )
        .arg(
            Arg::new("whitelist")
                .short('w')
                .long("whitelist")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("File of path patterns to keep, applied after the blacklist"),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Ignore the blacklist, including the automatic gitwalk.blacklist"),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .value_name("LEVEL")
                .value_parser(PossibleValuesParser::new(ReportLevel::VALUES.iter().copied()))
                .default_value("brief")
                .help("How much to print per repository"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Shorthand for --level verbose"),
        )
        .arg(
            Arg::new("action")
                .short('a')
                .long("action")
                .value_name("ACTION")
                .num_args(1..)
                .allow_hyphen_values(true)
                .help(
                    "Command to run in each matched repository; 'run CMD...' skips the shell, \
                     'bash' and 'gui' open interactive sessions",
                ),
        )
        .subcommand(
            Command::new("commit")
                .about("Stage, commit, and push the current repository")
                .arg(
                    Arg::new("all")
                        .short('a')
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .help("Stage untracked files too"),
                )
                .arg(
                    Arg::new("show")
                        .short('s')
                        .long("show")
                        .action(ArgAction::SetTrue)
                        .help("Print the git commands without running them"),
                )
                .arg(
                    Arg::new("push")
                        .short('p')
                        .long("push")
                        .action(ArgAction::SetTrue)
                        .help("Skip committing and only push the active branch"),
                )
                .arg(
                    Arg::new("message")
                        .short('m')
                        .long("message")
                        .value_name("TEXT")
                        .help("Commit message; without it git opens the editor"),
                ),
        )
        .subcommand(
            Command::new("pull")
                .about("Pull the active branch from origin or the first remote")
                .arg(
                    Arg::new("rebase")
                        .short('r')
                        .long("rebase")
                        .action(ArgAction::SetTrue)
                        .help("Pass --rebase to git pull"),
                ),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply format-patch files and commit them")
                .arg(
                    Arg::new("patches")
                        .value_name("PATCH")
                        .num_args(1..)
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .help("Patch files, applied in order"),
                )
                .arg(
                    Arg::new("verbose")
                        .short('v')
                        .long("verbose")
                        .action(ArgAction::SetTrue)
                        .help("Explain how the commit subject was chosen"),
                ),
        )
}

fn walk_args(matches: &ArgMatches) -> Result<WalkArgs> {
    let directory = matches
        .get_one::<PathBuf>("directory")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    let filter = matches
        .get_one::<String>("filter")
        .and_then(|value| StatusFilter::parse(value))
        .unwrap_or_default();

    let level = if matches.get_flag("verbose") {
        ReportLevel::Verbose
    } else {
        matches
            .get_one::<String>("level")
            .and_then(|value| ReportLevel::parse(value))
            .unwrap_or_default()
    };

    let action = matches
        .get_many::<String>("action")
        .map(|tokens| ActionSpec::parse(&tokens.cloned().collect::<Vec<_>>()))
        .transpose()?;

    Ok(WalkArgs {
        directory,
        mode: WalkMode {
            recursive: matches.get_flag("recursive"),
            nested: matches.get_flag("nested"),
        },
        filter,
        blacklist: matches.get_one::<PathBuf>("blacklist").cloned(),
        whitelist: matches.get_one::<PathBuf>("whitelist").cloned(),
        force: matches.get_flag("force"),
        level,
        action,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let exit_code = match matches.subcommand() {
        Some(("commit", sub)) => {
            handle_commit_command(CommitArgs {
                all: sub.get_flag("all"),
                show: sub.get_flag("show"),
                push_only: sub.get_flag("push"),
                message: sub.get_one::<String>("message").cloned(),
            })
            .await?
        }
        Some(("pull", sub)) => {
            handle_pull_command(PullArgs {
                rebase: sub.get_flag("rebase"),
            })
            .await?
        }
        Some(("apply", sub)) => {
            handle_apply_command(ApplyArgs {
                patches: sub
                    .get_many::<PathBuf>("patches")
                    .into_iter()
                    .flatten()
                    .cloned()
                    .collect(),
                verbose: sub.get_flag("verbose"),
            })
            .await?
        }
        _ => handle_walk_command(walk_args(&matches)?).await?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_walk_defaults() {
        let matches = build_cli().get_matches_from(["gitwalk"]);
        let args = walk_args(&matches).unwrap();

        assert_eq!(args.directory, PathBuf::from("."));
        assert!(!args.mode.recursive);
        assert!(!args.mode.nested);
        assert_eq!(args.filter, StatusFilter::Modified);
        assert_eq!(args.level, ReportLevel::Brief);
        assert!(args.action.is_none());
    }

    #[test]
    fn test_action_tokens_become_a_shell_command() {
        let matches =
            build_cli().get_matches_from(["gitwalk", "-a", "git", "pull", "--rebase"]);
        let args = walk_args(&matches).unwrap();

        assert_eq!(
            args.action,
            Some(ActionSpec::Shell("git pull --rebase".to_string()))
        );
    }

    #[test]
    fn test_verbose_flag_overrides_level() {
        let matches = build_cli().get_matches_from(["gitwalk", "-l", "none", "-v"]);
        let args = walk_args(&matches).unwrap();

        assert_eq!(args.level, ReportLevel::Verbose);
    }

    #[test]
    fn test_filter_spellings() {
        let matches = build_cli().get_matches_from(["gitwalk", "-f", "dirty"]);
        let args = walk_args(&matches).unwrap();
        assert_eq!(args.filter, StatusFilter::Modified);

        let matches = build_cli().get_matches_from(["gitwalk", "-f", "all"]);
        let args = walk_args(&matches).unwrap();
        assert_eq!(args.filter, StatusFilter::All);
    }
}
