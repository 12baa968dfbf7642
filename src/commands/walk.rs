//! The default command: walk, report, and act on repositories

use anyhow::Result;
use std::path::PathBuf;
use std::time::Instant;

use crate::core::{
    collect_records, execute_actions, print_record, ActionSpec, ListFilters, ReportLevel,
    StatusFilter, WalkMode, WalkStatistics, NO_REPOS_MESSAGE,
};
use crate::git::GitCli;
use crate::utils::{set_terminal_title, set_terminal_title_and_flush, warn};

/// Everything the walk needs, resolved from the command line.
#[derive(Debug)]
pub struct WalkArgs {
    pub directory: PathBuf,
    pub mode: WalkMode,
    pub filter: StatusFilter,
    pub blacklist: Option<PathBuf>,
    pub whitelist: Option<PathBuf>,
    pub force: bool,
    pub level: ReportLevel,
    pub action: Option<ActionSpec>,
}

/// Handles the walk. Returns the process exit code: zero only when at
/// least one repository matched and every action succeeded.
pub async fn handle_walk_command(args: WalkArgs) -> Result<i32> {
    set_terminal_title("🚀 gitwalk");
    let start_time = Instant::now();
    let backend = GitCli;

    let root = match args.directory.canonicalize() {
        Ok(root) => root,
        Err(err) => {
            warn(format!("cannot read {}: {}", args.directory.display(), err));
            println!("{NO_REPOS_MESSAGE}");
            set_terminal_title_and_flush("✅ gitwalk");
            return Ok(1);
        }
    };

    let lists = ListFilters::resolve(
        &root,
        args.blacklist.as_deref(),
        args.whitelist.as_deref(),
        args.force,
    );

    let mut stats = WalkStatistics::new();
    let records = collect_records(&backend, &root, args.mode, args.filter, &lists, &mut stats).await;

    for record in &records {
        print_record(&backend, record, &root, args.level).await;
    }

    if records.is_empty() {
        println!("{NO_REPOS_MESSAGE}");
    } else if let Some(action) = &args.action {
        execute_actions(&backend, action, &records, &mut stats).await;
    }

    println!();
    println!("{}", stats.summary_line(start_time.elapsed()));

    let detailed = stats.detailed_summary();
    if !detailed.is_empty() {
        println!("\n{}", "━".repeat(70));
        println!("{detailed}");
        println!("{}", "━".repeat(70));
    }

    set_terminal_title_and_flush("✅ gitwalk");

    if records.is_empty() || stats.has_failures() {
        Ok(1)
    } else {
        Ok(0)
    }
}
