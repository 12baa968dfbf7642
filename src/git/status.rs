//! Working-tree status model and porcelain parsing

/// One entry of `git status --porcelain=1` output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEntry {
    /// Staging area status code
    pub index: char,
    /// Working tree status code
    pub work_tree: char,
    /// Path of the entry, relative to the repository root
    pub path: String,
    /// Original path for renames and copies
    pub orig_path: Option<String>,
}

impl StatusEntry {
    /// True for `??` entries
    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.work_tree == '?'
    }

    /// True for `!!` entries, which count as neither modified nor untracked
    pub fn is_ignored(&self) -> bool {
        self.index == '!' && self.work_tree == '!'
    }

    /// True when the entry represents tracked content with uncommitted
    /// changes, either staged or in the working tree.
    pub fn is_modified(&self) -> bool {
        if self.is_ignored() {
            return false;
        }
        (self.index != ' ' && self.index != '?') || matches!(self.work_tree, 'M' | 'D')
    }
}

/// Parsed status of one working tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkTreeStatus {
    pub entries: Vec<StatusEntry>,
}

impl WorkTreeStatus {
    pub fn modified_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_modified()).count()
    }

    pub fn untracked_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_untracked()).count()
    }

    /// Tracked changes or untracked files present
    pub fn is_dirty(&self) -> bool {
        self.entries.iter().any(|e| e.is_modified() || e.is_untracked())
    }

    pub fn is_clean(&self) -> bool {
        !self.is_dirty()
    }
}

/// Strips the quoting git applies to paths with special characters.
/// Escape sequences inside the quotes are kept as-is.
fn unquote(path: &str) -> &str {
    if path.len() >= 2 && path.starts_with('"') && path.ends_with('"') {
        &path[1..path.len() - 1]
    } else {
        path
    }
}

/// Parses `git status --porcelain=1` output.
///
/// Each valid line has the shape `XY PATH` or `XY ORIG -> PATH` for renames.
/// Lines that do not follow the format are skipped; parsing never fails.
pub fn parse_porcelain(output: &str) -> WorkTreeStatus {
    let mut entries = Vec::new();

    for line in output.lines() {
        let mut chars = line.chars();
        let (Some(index), Some(work_tree), Some(' ')) =
            (chars.next(), chars.next(), chars.next())
        else {
            continue;
        };
        if !index.is_ascii() || !work_tree.is_ascii() {
            continue;
        }

        // Both status codes are ASCII, so the path starts at byte 3
        let rest = &line[3..];
        if rest.is_empty() {
            continue;
        }

        let (orig_path, path) = match rest.find(" -> ") {
            Some(pos) => (
                Some(unquote(&rest[..pos]).to_string()),
                unquote(&rest[pos + 4..]).to_string(),
            ),
            None => (None, unquote(rest).to_string()),
        };

        entries.push(StatusEntry {
            index,
            work_tree,
            path,
            orig_path,
        });
    }

    WorkTreeStatus { entries }
}
