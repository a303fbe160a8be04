use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::graph::Dependency;
use super::paths::{clean_path, is_dot_path, is_vendor_dir};
use super::scanner::FileScanner;
use crate::config::AnalysisConfig;

/// Paths already traversed or deliberately skipped. Every path is cleaned
/// before it is compared or stored, and the set only grows.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    paths: HashSet<PathBuf>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `path`; false if it was already present.
    pub fn insert(&mut self, path: &Path) -> bool {
        self.paths.insert(clean_path(path))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(&clean_path(path))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub directories: usize,
    pub files_scanned: usize,
    /// Files skipped by extension or by the test-file rule.
    pub files_skipped: usize,
    /// Recoverable traversal and parse failures.
    pub errors: usize,
}

/// Shared mutable state of one run: the raw dependency list in discovery
/// order and the visited set.
#[derive(Debug, Default)]
pub struct WalkState {
    pub dependencies: Vec<Dependency>,
    pub visited: VisitedSet,
    pub stats: WalkStats,
}

impl WalkState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Recursive traversal that hands every accepted source file to the scanner.
pub struct TreeWalker<'a> {
    config: &'a AnalysisConfig,
    scanner: FileScanner<'a>,
}

impl<'a> TreeWalker<'a> {
    pub fn new(config: &'a AnalysisConfig, scanner: FileScanner<'a>) -> Self {
        Self { config, scanner }
    }

    /// Walks `path` once. Revisiting a path, directly or through another
    /// dependency, is a no-op. Failures below `path` are reported and
    /// counted; they never stop the walk.
    pub fn walk(&mut self, path: &Path, is_root: bool, state: &mut WalkState) {
        let path = clean_path(path);
        if !is_root && is_dot_path(&path) {
            return;
        }

        let include_vendor = self.config.policy.include_vendor;
        if !include_vendor && is_vendor_dir(&path) {
            state.visited.insert(&path);
            return;
        }
        if !state.visited.insert(&path) {
            return;
        }

        debug!(path = %path.display(), root = is_root, "walking");

        let WalkState {
            dependencies,
            visited,
            stats,
        } = state;

        let entries = WalkDir::new(&path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                // The starting path was recorded above.
                if entry.depth() == 0 {
                    return true;
                }
                let entry_path = entry.path();
                if !include_vendor && is_vendor_dir(entry_path) {
                    visited.insert(entry_path);
                    return false;
                }
                visited.insert(entry_path)
            });

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    stats.errors += 1;
                    let failed = err.path().unwrap_or(path.as_path()).display().to_string();
                    warn!(path = %failed, error = %err, "unable to walk");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                stats.directories += 1;
                continue;
            }

            let file = clean_path(entry.path());
            if !self.scanner.accepts(&file) {
                stats.files_skipped += 1;
                continue;
            }

            match self.scanner.scan(&file) {
                Ok(found) => {
                    stats.files_scanned += 1;
                    debug!(path = %file.display(), dependencies = found.len(), "scanned");
                    dependencies.extend(found);
                }
                Err(err) => {
                    stats.errors += 1;
                    warn!(path = %err.path.display(), error = %err.cause, "unable to scan file");
                }
            }
        }
    }
}
