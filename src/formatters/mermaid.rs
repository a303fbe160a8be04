use anyhow::Result;
use petgraph::visit::EdgeRef;
use std::fmt::Write;

use super::GraphFormatter;
use crate::core::PackageGraph;

/// Mermaid flowchart, left to right. Node ids are the CRC-32 of the package
/// name so they stay stable across runs; the name itself is the label.
pub struct MermaidFormatter;

impl MermaidFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl GraphFormatter for MermaidFormatter {
    fn format_graph(&self, graph: &PackageGraph) -> Result<String> {
        let mut output = String::from("graph LR\n");
        for edge in graph.edge_references() {
            let src = &graph[edge.source()];
            let dst = &graph[edge.target()];
            writeln!(
                output,
                "\t{}[{}] --> {}[{}]",
                node_id(src),
                src,
                node_id(dst),
                dst
            )?;
        }
        Ok(output)
    }
}

impl Default for MermaidFormatter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn node_id(name: &str) -> u32 {
    crc32fast::hash(name.as_bytes())
}
