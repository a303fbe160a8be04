pub mod cache;
pub mod common;
pub mod go;
pub mod go_regex;

use anyhow::Result;
use clap::ValueEnum;

/// A source-language front end that only knows how to list the import
/// declarations of a file. Everything downstream works on the returned
/// specifiers and never sees the syntax tree.
pub trait ImportExtractor {
    /// Raw import specifiers in source order, still carrying their quote
    /// delimiters.
    fn extract_imports(&self, source: &str) -> Result<Vec<String>>;

    fn language_name(&self) -> &str;

    /// Extensions (without the dot) of files this front end reads.
    fn extensions(&self) -> &[&str];

    /// File-name suffix marking test sources, if the language has one.
    fn test_suffix(&self) -> Option<&str> {
        None
    }
}

/// Selectable front ends for Go sources.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum ExtractorKind {
    #[default]
    TreeSitter,
    Regex,
}

pub struct ParserFactory;

impl ParserFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_extractor(&self, kind: ExtractorKind) -> Result<Box<dyn ImportExtractor>> {
        match kind {
            ExtractorKind::TreeSitter => Ok(Box::new(go::GoParser::new()?)),
            ExtractorKind::Regex => Ok(Box::new(go_regex::RegexGoParser::new()?)),
        }
    }
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}
