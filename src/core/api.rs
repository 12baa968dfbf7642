//! Public API for the core module.
//!
//! External consumers should use these re-exports rather than reaching
//! into the internal module structure.

// Walk pipeline
pub use super::batch::{classify_and_filter, collect_records, execute_actions};
pub use super::walk::{discover_repos, DiscoveredRepo, WalkMode};

// Filters
pub use super::filter::{ListFilters, PathFilter, StatusFilter};

// Actions
pub use super::action::{run_action, substitute_placeholders, ActionOutcome, ActionSpec};

// Reporting
pub use super::report::{print_record, ReportLevel};
pub use super::stats::{shorten_path, FailedAction, WalkStatistics};

// Configuration
pub use super::config::{DEFAULT_BLACKLIST_FILE, NO_REPOS_MESSAGE, SKIP_DIRECTORIES};
