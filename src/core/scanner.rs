use std::path::{Path, PathBuf};
use thiserror::Error;

use super::graph::Dependency;
use super::resolver::PathResolver;
use crate::config::AnalysisConfig;
use crate::parsers::cache::ImportCache;
use crate::parsers::common::read_source;
use crate::parsers::ImportExtractor;

/// A source file that could not be read or parsed. Never fatal to a walk.
#[derive(Debug, Error)]
#[error("failed to parse `{}': {cause}", .path.display())]
pub struct ScanError {
    pub path: PathBuf,
    pub cause: anyhow::Error,
}

/// Turns one source file into raw dependencies on package directories.
pub struct FileScanner<'a> {
    config: &'a AnalysisConfig,
    resolver: PathResolver<'a>,
    extractor: Box<dyn ImportExtractor>,
    cache: Option<ImportCache>,
}

impl<'a> FileScanner<'a> {
    pub fn new(config: &'a AnalysisConfig, extractor: Box<dyn ImportExtractor>) -> Self {
        Self {
            config,
            resolver: PathResolver::new(config),
            extractor,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: ImportCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Whether `path` is a source file the scanner should read: the
    /// extension must belong to the front end, and test files are only
    /// accepted when the policy includes them.
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extractor.extensions().contains(&ext))
            .unwrap_or(false);
        if !has_extension {
            return false;
        }

        match self.extractor.test_suffix() {
            Some(suffix) if !self.config.policy.include_tests => {
                !name.to_ascii_lowercase().ends_with(suffix)
            }
            _ => true,
        }
    }

    /// Emits one dependency per import that resolves to a package directory,
    /// in import order.
    pub fn scan(&mut self, path: &Path) -> Result<Vec<Dependency>, ScanError> {
        let imports = self.imports_of(path).map_err(|cause| ScanError {
            path: path.to_path_buf(),
            cause,
        })?;

        let dependencies = imports
            .iter()
            .filter_map(|raw| self.resolver.resolve(trim_specifier(raw)))
            .map(|dst| Dependency::new(path.to_path_buf(), dst))
            .collect();
        Ok(dependencies)
    }

    fn imports_of(&mut self, path: &Path) -> anyhow::Result<Vec<String>> {
        if let Some(cache) = self.cache.as_mut() {
            match cache.get(path) {
                Ok(Some(imports)) => return Ok(imports),
                Ok(None) => {}
                Err(err) => tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to validate import cache entry"
                ),
            }
        }

        let source = read_source(path)?;
        let imports = self.extractor.extract_imports(&source)?;

        if let Some(cache) = self.cache.as_mut() {
            if let Err(err) = cache.store(path, &imports) {
                tracing::warn!(path = %path.display(), error = %err, "failed to cache imports");
            }
        }
        Ok(imports)
    }
}

/// Strips whitespace and the quote delimiters of a string literal.
fn trim_specifier(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '`')
}
