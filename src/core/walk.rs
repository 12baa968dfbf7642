//! Sequential repository discovery

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::config::SKIP_DIRECTORIES;
use crate::git::{repo_kind_at, RepoKind};
use crate::utils::warn;

/// Traversal switches for [`discover_repos`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkMode {
    /// Descend beyond the root's immediate children
    pub recursive: bool,
    /// Keep searching inside discovered repositories for nested ones
    pub nested: bool,
}

/// A repository location found by the walk, before classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveredRepo {
    pub path: PathBuf,
    pub kind: RepoKind,
}

/// Walks `root` for directories containing git metadata.
///
/// The traversal is sequential and deterministic: entries are visited in
/// file-name order, symlinks are followed with canonical-path deduplication,
/// and common build or dependency directories are pruned along with hidden
/// ones. A discovered repository is not descended into unless `mode.nested`
/// is set. Without `mode.recursive` only the root and its immediate
/// children are examined.
///
/// Unreadable directories produce a warning and are skipped; discovery
/// itself never fails.
pub fn discover_repos(root: &Path, mode: WalkMode) -> Vec<DiscoveredRepo> {
    let root = match root.canonicalize() {
        Ok(path) => path,
        Err(err) => {
            warn(format!("cannot read {}: {}", root.display(), err));
            return Vec::new();
        }
    };

    let mut found = Vec::new();
    let mut seen = HashSet::new();

    // The root itself counts, and ends the walk unless nested repositories
    // were asked for
    if let Some(kind) = repo_kind_at(&root) {
        seen.insert(root.clone());
        found.push(DiscoveredRepo {
            path: root.clone(),
            kind,
        });
        if !mode.nested {
            return found;
        }
    }

    let max_depth = if mode.recursive { usize::MAX } else { 1 };
    let mut walker = WalkDir::new(&root)
        .follow_links(true)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn(format!("skipping unreadable entry: {err}"));
                continue;
            }
        };

        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_str().unwrap_or("");
        if name.starts_with('.') || SKIP_DIRECTORIES.contains(&name) {
            walker.skip_current_dir();
            continue;
        }

        if let Some(kind) = repo_kind_at(entry.path()) {
            let path = entry
                .path()
                .canonicalize()
                .unwrap_or_else(|_| entry.path().to_path_buf());
            if seen.insert(path.clone()) {
                found.push(DiscoveredRepo { path, kind });
            }
            if !mode.nested {
                walker.skip_current_dir();
            }
        }
    }

    found
}
