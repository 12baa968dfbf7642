//! Configuration constants and settings

// Directories to skip during repository search
pub const SKIP_DIRECTORIES: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "build",
    ".next",
    "dist",
    "__pycache__",
    ".venv",
    "venv",
];

// Blacklist file probed next to the walk root when --blacklist is absent
pub const DEFAULT_BLACKLIST_FILE: &str = "gitwalk.blacklist";

// UI Constants
pub const NO_REPOS_MESSAGE: &str = "No git repositories matched.";

// Display formatting constants
pub const PATH_DISPLAY_WIDTH: usize = 30;
pub const NAME_DISPLAY_WIDTH: usize = 20;
