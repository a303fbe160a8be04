pub mod analyzer;
pub mod closure;
pub mod graph;
pub mod paths;
pub mod resolver;
pub mod scanner;
pub mod walker;

pub use analyzer::{source_roots, AnalysisReport, CodebaseAnalyzer};
pub use closure::expand_dependencies;
pub use graph::{dedup_edges, Dependency, Edge, GraphBuilder, GraphNormalizer, PackageGraph};
pub use resolver::PathResolver;
pub use scanner::{FileScanner, ScanError};
pub use walker::{TreeWalker, VisitedSet, WalkState, WalkStats};
