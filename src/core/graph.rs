use petgraph::{graph::NodeIndex, Directed, Graph};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;

/// A raw dependency found on disk: a source file (or directory) importing a
/// package directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub src: PathBuf,
    pub dst: PathBuf,
}

impl Dependency {
    pub fn new(src: PathBuf, dst: PathBuf) -> Self {
        Self { src, dst }
    }
}

/// A dependency between two logical package names. Equality is exact
/// string-pair equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub src: String,
    pub dst: String,
}

impl Edge {
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }
}

/// Rewrites raw paths into package names and collapses the edge list.
pub struct GraphNormalizer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> GraphNormalizer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Full normalization pass: anchor bare file names at the working
    /// directory, map paths to package names, fold sources to their
    /// directory unless file-level output is requested, and drop duplicates.
    pub fn normalize(&self, dependencies: &[Dependency]) -> Vec<Edge> {
        let file_level = self.config.policy.file_level;

        let edges = dependencies.iter().map(|dep| {
            let src = self.package_name(&self.anchor(&dep.src));
            let src = if file_level { src } else { parent_name(&src) };
            Edge::new(src, self.package_name(&dep.dst))
        });

        dedup_edges(edges)
    }

    /// Logical name of a path: relative to the library or system root when
    /// under one of them, the path itself otherwise.
    pub fn package_name(&self, path: &Path) -> String {
        let roots = &self.config.roots;
        [&roots.library_root, &roots.system_root]
            .into_iter()
            .find_map(|root| path.strip_prefix(root).ok())
            .map(|rest| {
                rest.to_string_lossy()
                    .trim_matches(|c: char| c == '/' || c == '\\')
                    .to_string()
            })
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }

    // A bare file name has no directory; it lives in the working directory.
    fn anchor(&self, path: &Path) -> PathBuf {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => path.to_path_buf(),
            _ if path.has_root() => path.to_path_buf(),
            _ => self.config.roots.working_dir.join(path),
        }
    }
}

/// Directory part of a logical name, `.` when it has none.
fn parent_name(name: &str) -> String {
    match Path::new(name).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        Some(_) => ".".to_string(),
        None => name.to_string(),
    }
}

/// Keeps the first occurrence of every distinct edge, preserving order.
pub fn dedup_edges<I>(edges: I) -> Vec<Edge>
where
    I: IntoIterator<Item = Edge>,
{
    let mut seen = HashSet::new();
    edges
        .into_iter()
        .filter(|edge| seen.insert(edge.clone()))
        .collect()
}

/// Package dependency graph; node weights are package names.
pub type PackageGraph = Graph<String, (), Directed>;

pub struct GraphBuilder {
    graph: PackageGraph,
    node_map: HashMap<String, NodeIndex>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds a graph from an edge list. Nodes are numbered in order of first
    /// reference and edges keep list order.
    pub fn from_edges(edges: &[Edge]) -> PackageGraph {
        let mut builder = Self::new();
        for edge in edges {
            builder.add_edge(edge);
        }
        builder.build()
    }

    pub fn add_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(name) {
            return index;
        }
        let index = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), index);
        index
    }

    pub fn add_edge(&mut self, edge: &Edge) -> petgraph::graph::EdgeIndex {
        let source = self.add_node(&edge.src);
        let target = self.add_node(&edge.dst);
        self.graph.add_edge(source, target, ())
    }

    pub fn get_node_index(&self, name: &str) -> Option<NodeIndex> {
        self.node_map.get(name).copied()
    }

    pub fn build(self) -> PackageGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
