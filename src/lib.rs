//! # PKGRAPH
//!
//! Go package dependency graphs straight from the source tree.
//!
//! PKGRAPH walks one or more directories, reads the import declarations of
//! every Go file, resolves each import against `$GOPATH/src` (and optionally
//! `$GOROOT/src` and `./vendor`), then follows the resolved packages into
//! their own directories until no new package turns up. The resulting edges
//! are named by import path and rendered for a graph tool.
//!
//! ## Output Formats
//!
//! - **DOT**: Graphviz digraph with record nodes
//! - **Mermaid**: `graph LR` flowchart
//! - **JSON**: node list plus index-pair edges
//!
//! ## Pipeline
//!
//! roots → [`core::TreeWalker`] → [`core::FileScanner`] →
//! [`core::expand_dependencies`] → [`core::GraphNormalizer`] → [`formatters`]

pub mod config;
pub mod core;
pub mod formatters;
pub mod parsers;
