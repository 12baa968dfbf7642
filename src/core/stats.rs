//! Walk statistics and summary rendering

use std::path::Path;
use std::time::Duration;

use crate::core::config::{NAME_DISPLAY_WIDTH, PATH_DISPLAY_WIDTH};

/// One repository whose action failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedAction {
    pub name: String,
    pub path: String,
    pub message: String,
}

/// Outcome counters for one walk, rendered into the closing summary.
#[derive(Clone, Debug, Default)]
pub struct WalkStatistics {
    /// Repositories discovered under the root
    pub walked: u32,
    /// Repositories that survived every filter
    pub matched: u32,
    /// Repositories dropped by a filter or skipped after an error
    pub ignored: u32,
    failed_actions: Vec<FailedAction>,
}

impl WalkStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_discovered(&mut self) {
        self.walked += 1;
    }

    pub fn record_matched(&mut self) {
        self.matched += 1;
    }

    pub fn record_ignored(&mut self) {
        self.ignored += 1;
    }

    pub fn record_action_failure(&mut self, name: &str, path: &Path, message: String) {
        self.failed_actions.push(FailedAction {
            name: name.to_string(),
            path: path.display().to_string(),
            message,
        });
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_actions.is_empty()
    }

    pub fn failed_actions(&self) -> &[FailedAction] {
        &self.failed_actions
    }

    /// One-line closing summary
    pub fn summary_line(&self, elapsed: Duration) -> String {
        let repo_word = if self.walked == 1 {
            "repository"
        } else {
            "repositories"
        };
        let mut line = format!(
            "Walked {} {} in {:.1}s • {} matched • {} ignored",
            self.walked,
            repo_word,
            elapsed.as_secs_f64(),
            self.matched,
            self.ignored
        );
        if !self.failed_actions.is_empty() {
            line.push_str(&format!(" • {} failed", self.failed_actions.len()));
        }
        line
    }

    /// Tree-style list of repositories whose action failed, empty when
    /// everything succeeded.
    pub fn detailed_summary(&self) -> String {
        if self.failed_actions.is_empty() {
            return String::new();
        }

        let mut lines = Vec::new();
        lines.push(format!("🔴 FAILED ACTIONS ({})", self.failed_actions.len()));
        for (i, failed) in self.failed_actions.iter().enumerate() {
            let tree_char = if i == self.failed_actions.len() - 1 {
                "└─"
            } else {
                "├─"
            };
            lines.push(format!(
                "   {} {:name_width$} {:path_width$} # {}",
                tree_char,
                failed.name,
                shorten_path(&failed.path, PATH_DISPLAY_WIDTH),
                failed.message,
                name_width = NAME_DISPLAY_WIDTH,
                path_width = PATH_DISPLAY_WIDTH,
            ));
        }
        lines.join("\n")
    }
}

/// Shortens a long path for display, keeping the last two components.
pub fn shorten_path(path: &str, max_length: usize) -> String {
    if path.len() <= max_length {
        return path.to_string();
    }

    let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
    if components.len() <= 2 {
        return path.to_string();
    }

    format!(
        ".../{}/{}",
        components[components.len() - 2],
        components[components.len() - 1]
    )
}
