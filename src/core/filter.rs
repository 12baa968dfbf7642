//! Status conditions and blacklist/whitelist path filters

use std::fs;
use std::path::Path;

use glob::Pattern;

use crate::core::config::DEFAULT_BLACKLIST_FILE;
use crate::git::RepoRecord;
use crate::utils::warn;

/// Which repositories survive the status stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    /// Uncommitted tracked changes or untracked files present
    #[default]
    Modified,
    Clean,
    /// Untracked files present
    Untracked,
}

impl StatusFilter {
    /// Accepted command-line spellings
    pub const VALUES: &'static [&'static str] =
        &["all", "clean", "dirty", "modified", "untracked"];

    pub fn parse(value: &str) -> Option<StatusFilter> {
        match value {
            "all" => Some(StatusFilter::All),
            "clean" => Some(StatusFilter::Clean),
            "dirty" | "modified" => Some(StatusFilter::Modified),
            "untracked" => Some(StatusFilter::Untracked),
            _ => None,
        }
    }

    pub fn matches(&self, record: &RepoRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Modified => record.is_dirty(),
            StatusFilter::Clean => !record.is_dirty(),
            StatusFilter::Untracked => record.status.untracked_count() > 0,
        }
    }
}

/// One compiled filter-file line.
#[derive(Debug)]
enum PathPattern {
    Glob(Pattern),
    Substring(String),
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Glob(pattern) => pattern.matches(path),
            PathPattern::Substring(needle) => path.contains(needle.as_str()),
        }
    }
}

/// Patterns loaded from a blacklist or whitelist file.
///
/// One pattern per line; blank lines and `#` comments are ignored. Lines
/// containing glob metacharacters match against the whole absolute path
/// (separators normalized to `/`), plain lines match by substring.
#[derive(Debug, Default)]
pub struct PathFilter {
    patterns: Vec<PathPattern>,
}

impl PathFilter {
    pub fn empty() -> PathFilter {
        PathFilter::default()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Parses filter-file contents. Lines with invalid glob syntax are
    /// dropped with a warning.
    pub fn parse(contents: &str) -> PathFilter {
        let mut patterns = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.contains(['*', '?', '[']) {
                match Pattern::new(line) {
                    Ok(pattern) => patterns.push(PathPattern::Glob(pattern)),
                    Err(err) => warn(format!("ignoring filter pattern {line:?}: {err}")),
                }
            } else {
                patterns.push(PathPattern::Substring(line.to_string()));
            }
        }
        PathFilter { patterns }
    }

    /// Loads a filter file. A missing or unreadable file degrades to an
    /// empty filter with a warning, never an error.
    pub fn load(path: &Path) -> PathFilter {
        match fs::read_to_string(path) {
            Ok(contents) => PathFilter::parse(&contents),
            Err(err) => {
                warn(format!("cannot read filter file {}: {}", path.display(), err));
                PathFilter::empty()
            }
        }
    }

    /// Whether any pattern matches the repository path.
    pub fn matches(&self, path: &Path) -> bool {
        let normalized = path.to_string_lossy().replace('\\', "/");
        self.patterns.iter().any(|pattern| pattern.matches(&normalized))
    }
}

/// The blacklist/whitelist pair applied to repository paths.
///
/// Blacklisted paths are dropped first; when a whitelist is present only
/// paths it matches survive. A whitelist without usable patterns is treated
/// as absent rather than excluding everything.
#[derive(Debug, Default)]
pub struct ListFilters {
    pub blacklist: PathFilter,
    pub whitelist: Option<PathFilter>,
}

impl ListFilters {
    /// Resolves command-line selections into loaded filters.
    ///
    /// Without `--blacklist`, a `gitwalk.blacklist` file next to the walk
    /// root is picked up automatically. `force` drops the blacklist
    /// entirely, including the automatic one.
    pub fn resolve(
        root: &Path,
        blacklist: Option<&Path>,
        whitelist: Option<&Path>,
        force: bool,
    ) -> ListFilters {
        let blacklist = if force {
            PathFilter::empty()
        } else if let Some(path) = blacklist {
            PathFilter::load(path)
        } else {
            let default = root.join(DEFAULT_BLACKLIST_FILE);
            if default.is_file() {
                PathFilter::load(&default)
            } else {
                PathFilter::empty()
            }
        };

        ListFilters {
            blacklist,
            whitelist: whitelist.map(PathFilter::load),
        }
    }

    pub fn allows(&self, path: &Path) -> bool {
        if self.blacklist.matches(path) {
            return false;
        }
        match &self.whitelist {
            Some(list) if !list.is_empty() => list.matches(path),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{Branch, RepoKind, WorkTreeStatus};
    use crate::git::parse_porcelain;
    use std::path::PathBuf;

    fn record_with(status: WorkTreeStatus) -> RepoRecord {
        RepoRecord {
            path: PathBuf::from("/work/example"),
            kind: RepoKind::Standard,
            branch: Branch::Named("main".to_string()),
            status,
            remotes: Vec::new(),
        }
    }

    #[test]
    fn test_status_filter_parsing() {
        assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
        assert_eq!(StatusFilter::parse("clean"), Some(StatusFilter::Clean));
        assert_eq!(StatusFilter::parse("dirty"), Some(StatusFilter::Modified));
        assert_eq!(StatusFilter::parse("modified"), Some(StatusFilter::Modified));
        assert_eq!(
            StatusFilter::parse("untracked"),
            Some(StatusFilter::Untracked)
        );
        assert_eq!(StatusFilter::parse("bogus"), None);
    }

    #[test]
    fn test_status_filter_matrix() {
        let clean = record_with(parse_porcelain(""));
        let modified = record_with(parse_porcelain(" M file.rs\n"));
        let untracked = record_with(parse_porcelain("?? file.rs\n"));

        assert!(StatusFilter::All.matches(&clean));
        assert!(StatusFilter::All.matches(&modified));

        assert!(!StatusFilter::Modified.matches(&clean));
        assert!(StatusFilter::Modified.matches(&modified));
        assert!(StatusFilter::Modified.matches(&untracked));

        assert!(StatusFilter::Clean.matches(&clean));
        assert!(!StatusFilter::Clean.matches(&modified));

        assert!(!StatusFilter::Untracked.matches(&clean));
        assert!(!StatusFilter::Untracked.matches(&modified));
        assert!(StatusFilter::Untracked.matches(&untracked));
    }

    #[test]
    fn test_substring_patterns() {
        let filter = PathFilter::parse("archive\n");
        assert!(filter.matches(Path::new("/home/dev/archive/old-project")));
        assert!(!filter.matches(Path::new("/home/dev/active/project")));
    }

    #[test]
    fn test_glob_patterns_match_whole_path() {
        let filter = PathFilter::parse("*/experiments/*\n");
        assert!(filter.matches(Path::new("/home/dev/experiments/trial")));
        assert!(!filter.matches(Path::new("/home/dev/projects/experiments")));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let filter = PathFilter::parse("# comment\n\n  \narchive\n");
        assert!(filter.matches(Path::new("/x/archive/y")));
        assert!(!filter.is_empty());

        let empty = PathFilter::parse("# nothing here\n\n");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_invalid_glob_is_dropped() {
        let filter = PathFilter::parse("[unclosed\narchive\n");
        // the broken pattern is gone, the good one still applies
        assert!(filter.matches(Path::new("/x/archive/y")));
        assert!(!filter.matches(Path::new("/x/unclosed/y")));
    }

    #[test]
    fn test_backslash_paths_are_normalized() {
        let filter = PathFilter::parse("projects/archive\n");
        assert!(filter.matches(Path::new("C:\\projects\\archive\\repo")));
    }

    #[test]
    fn test_blacklist_runs_before_whitelist() {
        let lists = ListFilters {
            blacklist: PathFilter::parse("secret\n"),
            whitelist: Some(PathFilter::parse("work\n")),
        };

        assert!(lists.allows(Path::new("/home/work/project")));
        // blacklisted even though the whitelist matches
        assert!(!lists.allows(Path::new("/home/work/secret")));
        // not on the whitelist
        assert!(!lists.allows(Path::new("/home/personal/project")));
    }

    #[test]
    fn test_empty_whitelist_is_treated_as_absent() {
        let lists = ListFilters {
            blacklist: PathFilter::empty(),
            whitelist: Some(PathFilter::parse("# only comments\n")),
        };

        assert!(lists.allows(Path::new("/anything/at/all")));
    }

    #[test]
    fn test_missing_filter_file_degrades_to_empty() {
        let filter = PathFilter::load(Path::new("/no/such/file.list"));
        assert!(filter.is_empty());
        assert!(!filter.matches(Path::new("/no/such/file.list")));
    }
}
