//! Renderers for the package graph.

pub mod dot;
pub mod json;
pub mod mermaid;

use anyhow::Result;
use clap::ValueEnum;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::PackageGraph;

pub use dot::DotFormatter;
pub use json::JsonFormatter;
pub use mermaid::MermaidFormatter;

pub trait GraphFormatter {
    fn format_graph(&self, graph: &PackageGraph) -> Result<String>;

    fn write_graph(&self, graph: &PackageGraph, out: &mut dyn Write) -> Result<()> {
        out.write_all(self.format_graph(graph)?.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn format_to_file(&self, graph: &PackageGraph, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_graph(graph)?)?;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Graphviz digraph
    #[default]
    #[value(alias = "graph-notation")]
    Dot,
    /// Mermaid flowchart
    #[value(aliases = ["mermaidjs", "flow-notation"])]
    Mermaid,
    /// Node and edge lists as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Dot => "dot",
            OutputFormat::Mermaid => "mermaid",
            OutputFormat::Json => "json",
        }
    }

    pub fn formatter(self) -> Box<dyn GraphFormatter> {
        match self {
            OutputFormat::Dot => Box::new(DotFormatter::new()),
            OutputFormat::Mermaid => Box::new(MermaidFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}
