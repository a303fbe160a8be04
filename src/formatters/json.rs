use anyhow::Result;
use petgraph::visit::EdgeRef;
use serde_json::json;

use super::GraphFormatter;
use crate::core::PackageGraph;

/// Compact JSON: package names once in `nodes`, edges as index pairs.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl GraphFormatter for JsonFormatter {
    fn format_graph(&self, graph: &PackageGraph) -> Result<String> {
        let nodes: Vec<&str> = graph
            .node_indices()
            .map(|idx| graph[idx].as_str())
            .collect();
        let edges: Vec<[usize; 2]> = graph
            .edge_references()
            .map(|edge| [edge.source().index(), edge.target().index()])
            .collect();

        let output = json!({
            "meta": {
                "nodes": graph.node_count(),
                "edges": graph.edge_count(),
                "format": "pkgraph"
            },
            "nodes": nodes,
            "edges": edges
        });

        let mut rendered = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        rendered.push('\n');
        Ok(rendered)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
