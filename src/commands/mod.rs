//! Command handlers, one per subcommand plus the default walk

pub mod apply;
pub mod commit;
pub mod pull;
pub mod walk;

pub use apply::{handle_apply_command, ApplyArgs};
pub use commit::{handle_commit_command, CommitArgs};
pub use pull::{handle_pull_command, PullArgs};
pub use walk::{handle_walk_command, WalkArgs};
