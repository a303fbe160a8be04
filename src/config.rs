//! Run configuration: the on-disk roots used to resolve imports and the
//! inclusion toggles. Built once at startup and shared by reference.

use anyhow::{bail, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::core::paths::clean_path;

/// Name of the directory holding vendored packages.
pub const VENDOR_DIR: &str = "vendor";

/// Directories an import specifier is looked up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootConfig {
    /// `$GOPATH/src`
    pub library_root: PathBuf,
    /// `$GOROOT/src`
    pub system_root: PathBuf,
    /// `<working_dir>/vendor`
    pub vendor_root: PathBuf,
    pub working_dir: PathBuf,
}

impl RootConfig {
    pub fn new(library_root: PathBuf, system_root: PathBuf, working_dir: PathBuf) -> Self {
        let working_dir = clean_path(&working_dir);
        Self {
            library_root: clean_path(&library_root),
            system_root: clean_path(&system_root),
            vendor_root: working_dir.join(VENDOR_DIR),
            working_dir,
        }
    }

    /// Builds the roots from GOPATH/GOROOT values. Either being absent or
    /// empty is a setup error.
    pub fn from_go_env(
        gopath: Option<&Path>,
        goroot: Option<&Path>,
        working_dir: PathBuf,
    ) -> Result<Self> {
        let gopath = match gopath.and_then(first_path_entry) {
            Some(path) => path,
            None => bail!("GOPATH not defined"),
        };
        let goroot = match goroot.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => path.to_path_buf(),
            None => bail!("GOROOT not defined"),
        };

        Ok(Self::new(
            absolutize(&gopath.join("src"), &working_dir),
            absolutize(&goroot.join("src"), &working_dir),
            working_dir,
        ))
    }

    pub fn with_vendor_root(mut self, vendor_root: PathBuf) -> Self {
        self.vendor_root = clean_path(&vendor_root);
        self
    }
}

/// Which files and roots take part in the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InclusionPolicy {
    pub include_tests: bool,
    pub include_system_root: bool,
    pub include_vendor: bool,
    /// Keep file-level sources instead of collapsing them to their directory.
    pub file_level: bool,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub roots: RootConfig,
    pub policy: InclusionPolicy,
}

impl AnalysisConfig {
    pub fn new(roots: RootConfig, policy: InclusionPolicy) -> Self {
        Self { roots, policy }
    }

    /// Turns a user supplied root into a clean absolute path.
    pub fn absolute(&self, path: &Path) -> PathBuf {
        absolutize(path, &self.roots.working_dir)
    }
}

fn absolutize(path: &Path, working_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        clean_path(path)
    } else {
        clean_path(&working_dir.join(path))
    }
}

// GOPATH may be a list; only the first entry is searched.
fn first_path_entry(value: &Path) -> Option<PathBuf> {
    env::split_paths(value.as_os_str()).find(|p| !p.as_os_str().is_empty())
}
