use std::fs;
use std::path::{Path, PathBuf};

use super::paths::{clean_path, has_vendor_segment};
use crate::config::AnalysisConfig;

/// Maps an import specifier onto a package directory under one of the
/// configured roots.
pub struct PathResolver<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Returns the first existing directory for `specifier`, searching the
    /// library root, then the system root and the vendor root when the
    /// policy enables them. `None` means the import is not a tracked
    /// dependency; with vendoring excluded that includes any specifier
    /// reaching into a vendor directory.
    pub fn resolve(&self, specifier: &str) -> Option<PathBuf> {
        // Joined, never substituted: an absolute specifier stays under the root.
        let specifier = specifier.trim_start_matches('/');
        if specifier.is_empty() {
            return None;
        }

        let roots = &self.config.roots;
        let policy = &self.config.policy;
        if !policy.include_vendor && has_vendor_segment(specifier) {
            return None;
        }

        let candidates = [
            Some(&roots.library_root),
            policy.include_system_root.then_some(&roots.system_root),
            policy.include_vendor.then_some(&roots.vendor_root),
        ];

        candidates
            .into_iter()
            .flatten()
            .map(|root| clean_path(&root.join(specifier)))
            .find(|candidate| dir_exists(candidate))
    }
}

fn dir_exists(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}
