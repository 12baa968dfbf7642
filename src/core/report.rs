//! Per-repository report rendering

use colored::Colorize;
use std::path::Path;

use crate::git::{to_string_args, GitBackend, RepoRecord};
use crate::utils::warn;

// Status listings delegated to git at the higher report levels
const SHORT_STATUS_ARGS: &[&str] = &[
    "status",
    "-s",
    "--untracked-files=normal",
    "--ignore-submodules=all",
];
const LONG_STATUS_ARGS: &[&str] = &[
    "status",
    "-b",
    "--show-stash",
    "--untracked-files=all",
    "--ignore-submodules=all",
    "--ignored",
];

/// How much to print for each surviving repository.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportLevel {
    /// Path only
    None,
    /// Path, branch, and a one-line change summary
    #[default]
    Brief,
    /// Brief plus a short status listing from git
    Normal,
    /// Brief plus the long status listing, ignored files included
    Verbose,
}

impl ReportLevel {
    /// Accepted command-line spellings
    pub const VALUES: &'static [&'static str] = &["none", "brief", "normal", "verbose"];

    pub fn parse(value: &str) -> Option<ReportLevel> {
        match value {
            "none" => Some(ReportLevel::None),
            "brief" => Some(ReportLevel::Brief),
            "normal" => Some(ReportLevel::Normal),
            "verbose" => Some(ReportLevel::Verbose),
            _ => None,
        }
    }
}

/// Prints the report block for one repository.
///
/// Paths are shown relative to the walk root where possible. At the normal
/// and verbose levels the status listing comes from git itself, printed
/// straight to the terminal.
pub async fn print_record(
    backend: &dyn GitBackend,
    record: &RepoRecord,
    root: &Path,
    level: ReportLevel,
) {
    let display_path = record
        .path
        .strip_prefix(root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(&record.path);

    if level == ReportLevel::None {
        println!("{}", display_path.display());
        return;
    }

    println!(
        "{}  [{}]",
        display_path.display().to_string().green(),
        record.branch.label().cyan()
    );

    match level {
        ReportLevel::None => {}
        ReportLevel::Brief => {
            if record.is_dirty() {
                let summary = format!(
                    "Modified: {}, Untracked: {}",
                    record.status.modified_count(),
                    record.status.untracked_count()
                );
                println!("  {}", summary.red());
            } else {
                println!("  Clean");
            }
        }
        ReportLevel::Normal | ReportLevel::Verbose => {
            let args = if level == ReportLevel::Normal {
                SHORT_STATUS_ARGS
            } else {
                LONG_STATUS_ARGS
            };
            if let Err(err) = backend
                .run_command(&record.path, "git", &to_string_args(args))
                .await
            {
                warn(format!(
                    "git status failed in {}: {}",
                    record.path.display(),
                    err
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!(ReportLevel::parse("none"), Some(ReportLevel::None));
        assert_eq!(ReportLevel::parse("brief"), Some(ReportLevel::Brief));
        assert_eq!(ReportLevel::parse("normal"), Some(ReportLevel::Normal));
        assert_eq!(ReportLevel::parse("verbose"), Some(ReportLevel::Verbose));
        assert_eq!(ReportLevel::parse("loud"), None);
    }

    #[test]
    fn test_default_level_is_brief() {
        assert_eq!(ReportLevel::default(), ReportLevel::Brief);
    }
}
