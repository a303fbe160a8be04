use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::closure::expand_dependencies;
use super::graph::{Edge, GraphNormalizer};
use super::scanner::FileScanner;
use super::walker::{TreeWalker, WalkState, WalkStats};
use crate::config::AnalysisConfig;
use crate::parsers::cache::ImportCache;
use crate::parsers::ImportExtractor;

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Normalized, deduplicated edges in discovery order.
    pub edges: Vec<Edge>,
    pub stats: WalkStats,
    /// Number of distinct paths traversed or skipped.
    pub visited: usize,
    /// Dependency directories walked beyond the roots.
    pub expanded: usize,
}

/// Absolute forms of the requested roots. Fails when none is given or one
/// does not exist.
pub fn source_roots(config: &AnalysisConfig, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if roots.is_empty() {
        bail!("no source directory given");
    }
    let roots: Vec<PathBuf> = roots.iter().map(|root| config.absolute(root)).collect();
    if let Some(missing) = roots.iter().find(|root| !root.exists()) {
        bail!("source directory `{}' does not exist", missing.display());
    }
    Ok(roots)
}

/// Runs the whole pipeline: roots, transitive closure, normalization.
pub struct CodebaseAnalyzer<'a> {
    config: &'a AnalysisConfig,
    walker: TreeWalker<'a>,
}

impl<'a> CodebaseAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig, extractor: Box<dyn ImportExtractor>) -> Self {
        Self::with_scanner(config, FileScanner::new(config, extractor))
    }

    pub fn with_cache(
        config: &'a AnalysisConfig,
        extractor: Box<dyn ImportExtractor>,
        cache: ImportCache,
    ) -> Self {
        Self::with_scanner(config, FileScanner::new(config, extractor).with_cache(cache))
    }

    fn with_scanner(config: &'a AnalysisConfig, scanner: FileScanner<'a>) -> Self {
        Self {
            config,
            walker: TreeWalker::new(config, scanner),
        }
    }

    /// Fails only when `roots` is empty or a root does not exist; problems
    /// inside the tree are reported and skipped.
    pub fn analyze(&mut self, roots: &[PathBuf]) -> Result<AnalysisReport> {
        let roots = source_roots(self.config, roots)?;
        let mut state = WalkState::new();

        for root in &roots {
            info!(root = %root.display(), "scanning");
            self.walker.walk(root, true, &mut state);
        }

        let expanded = expand_dependencies(&mut self.walker, &mut state);
        info!(
            dependencies = state.dependencies.len(),
            expanded, "dependency closure complete"
        );

        let edges = GraphNormalizer::new(self.config).normalize(&state.dependencies);

        Ok(AnalysisReport {
            edges,
            stats: state.stats,
            visited: state.visited.len(),
            expanded,
        })
    }

    /// Convenience for a single root.
    pub fn analyze_path(&mut self, root: &Path) -> Result<AnalysisReport> {
        self.analyze(&[root.to_path_buf()])
    }
}
