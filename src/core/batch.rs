//! The walk pipeline: classify, filter, act

use colored::Colorize;
use std::path::Path;

use crate::core::action::{run_action, ActionOutcome, ActionSpec};
use crate::core::filter::{ListFilters, StatusFilter};
use crate::core::stats::WalkStatistics;
use crate::core::walk::{discover_repos, DiscoveredRepo, WalkMode};
use crate::git::{classify, GitBackend, RepoRecord};
use crate::utils::warn;

/// Classifies discovered repositories and applies the filters, in order.
///
/// List filters run before any git invocation, so excluded repositories
/// cost nothing. The status filter runs on classified records. A repository
/// that cannot be classified is skipped with a warning and counted as
/// ignored; the walk always continues.
pub async fn classify_and_filter(
    backend: &dyn GitBackend,
    discovered: Vec<DiscoveredRepo>,
    filter: StatusFilter,
    lists: &ListFilters,
    stats: &mut WalkStatistics,
) -> Vec<RepoRecord> {
    let mut records = Vec::new();

    for repo in discovered {
        stats.record_discovered();

        if !lists.allows(&repo.path) {
            stats.record_ignored();
            continue;
        }

        match classify(backend, &repo.path, repo.kind).await {
            Ok(record) => {
                if filter.matches(&record) {
                    stats.record_matched();
                    records.push(record);
                } else {
                    stats.record_ignored();
                }
            }
            Err(err) => {
                warn(format!("skipping {}: {}", repo.path.display(), err));
                stats.record_ignored();
            }
        }
    }

    records
}

/// Discovers, classifies and filters repositories under `root`.
pub async fn collect_records(
    backend: &dyn GitBackend,
    root: &Path,
    mode: WalkMode,
    filter: StatusFilter,
    lists: &ListFilters,
    stats: &mut WalkStatistics,
) -> Vec<RepoRecord> {
    let discovered = discover_repos(root, mode);
    classify_and_filter(backend, discovered, filter, lists, stats).await
}

/// Runs the action in each record's repository, one after another.
///
/// A failing action is recorded and the batch moves on to the next
/// repository. Interactive sessions are never scored as failures.
pub async fn execute_actions(
    backend: &dyn GitBackend,
    spec: &ActionSpec,
    records: &[RepoRecord],
    stats: &mut WalkStatistics,
) {
    for record in records {
        println!();
        println!("{}", format!("> {}", record.path.display()).green());

        match run_action(backend, spec, record).await {
            Ok(ActionOutcome::Succeeded) | Ok(ActionOutcome::Interactive) => {}
            Ok(ActionOutcome::Failed { exit_code }) => {
                stats.record_action_failure(
                    record.name(),
                    &record.path,
                    format!("exit code {exit_code}"),
                );
            }
            Err(err) => {
                stats.record_action_failure(record.name(), &record.path, err.to_string());
            }
        }
    }
}
