use anyhow::Result;
use petgraph::visit::EdgeRef;
use std::collections::HashSet;
use std::fmt::Write;

use super::GraphFormatter;
use crate::core::PackageGraph;

/// Graphviz output. Each package that depends on something gets a record
/// node the first time it appears as a source, followed by one statement
/// per edge.
pub struct DotFormatter {
    graph_name: String,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            graph_name: "main".to_string(),
        }
    }

    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }
}

impl GraphFormatter for DotFormatter {
    fn format_graph(&self, graph: &PackageGraph) -> Result<String> {
        let mut output = String::with_capacity(128 + graph.edge_count() * 96);
        writeln!(output, "digraph {}{{", self.graph_name)?;
        output.push_str("\tedge[arrowhead=vee]\n");
        output.push_str("\tgraph [rankdir=LR,compound=true,ranksep=1.0];\n");

        let mut declared = HashSet::new();
        for edge in graph.edge_references() {
            let src = quote(&graph[edge.source()]);
            let dst = quote(&graph[edge.target()]);
            if declared.insert(edge.source()) {
                writeln!(
                    output,
                    "\t{src}[shape=\"record\",label={src},style=\"solid\"]"
                )?;
            }
            writeln!(output, "\t{src} -> {dst}")?;
        }

        output.push_str("}\n");
        Ok(output)
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}
