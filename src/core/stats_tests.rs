//! Tests for walk statistics and summary rendering

use super::stats::{shorten_path, WalkStatistics};
use std::path::Path;
use std::time::Duration;

#[test]
fn test_new_statistics_are_zeroed() {
    let stats = WalkStatistics::new();

    assert_eq!(stats.walked, 0);
    assert_eq!(stats.matched, 0);
    assert_eq!(stats.ignored, 0);
    assert!(!stats.has_failures());
}

#[test]
fn test_counters_accumulate() {
    let mut stats = WalkStatistics::new();
    stats.record_discovered();
    stats.record_discovered();
    stats.record_discovered();
    stats.record_matched();
    stats.record_ignored();
    stats.record_ignored();

    assert_eq!(stats.walked, 3);
    assert_eq!(stats.matched, 1);
    assert_eq!(stats.ignored, 2);
}

#[test]
fn test_summary_line_pluralizes() {
    let mut stats = WalkStatistics::new();
    stats.record_discovered();
    stats.record_matched();

    let line = stats.summary_line(Duration::from_millis(1500));
    assert_eq!(line, "Walked 1 repository in 1.5s • 1 matched • 0 ignored");

    stats.record_discovered();
    let line = stats.summary_line(Duration::from_millis(1500));
    assert!(line.starts_with("Walked 2 repositories"));
}

#[test]
fn test_summary_line_includes_failures_only_when_present() {
    let mut stats = WalkStatistics::new();
    stats.record_discovered();
    assert!(!stats.summary_line(Duration::ZERO).contains("failed"));

    stats.record_action_failure("broken", Path::new("/work/broken"), "exit code 2".to_string());
    let line = stats.summary_line(Duration::ZERO);
    assert!(line.ends_with("• 1 failed"));
}

#[test]
fn test_detailed_summary_empty_without_failures() {
    let stats = WalkStatistics::new();
    assert!(stats.detailed_summary().is_empty());
}

#[test]
fn test_detailed_summary_tree_format() {
    let mut stats = WalkStatistics::new();
    stats.record_action_failure("first", Path::new("/work/first"), "exit code 1".to_string());
    stats.record_action_failure("second", Path::new("/work/second"), "exit code 2".to_string());

    let summary = stats.detailed_summary();
    assert!(summary.starts_with("🔴 FAILED ACTIONS (2)"));
    assert!(summary.contains("├─ first"));
    assert!(summary.contains("└─ second"));
    assert!(summary.contains("# exit code 2"));
}

#[test]
fn test_failed_actions_preserve_order() {
    let mut stats = WalkStatistics::new();
    stats.record_action_failure("a", Path::new("/w/a"), "x".to_string());
    stats.record_action_failure("b", Path::new("/w/b"), "y".to_string());

    let failed = stats.failed_actions();
    assert_eq!(failed[0].name, "a");
    assert_eq!(failed[1].name, "b");
}

#[test]
fn test_shorten_path_keeps_short_paths() {
    assert_eq!(shorten_path("/home/user", 30), "/home/user");
    assert_eq!(shorten_path("repo", 30), "repo");
}

#[test]
fn test_shorten_path_truncates_long_paths() {
    let long = "/home/user/projects/category/deeply/nested/repository";
    assert_eq!(shorten_path(long, 30), ".../nested/repository");
}

#[test]
fn test_shorten_path_with_few_components() {
    // nothing sensible to cut, so the path stays
    let path = "/averyveryverylongsinglecomponent";
    assert_eq!(shorten_path(path, 10), path);
}
