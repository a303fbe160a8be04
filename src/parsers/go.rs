use anyhow::{bail, Result};
use tree_sitter::{Language, Node as TSNode};

use super::common::{extract_text, find_child_by_kind, find_children_by_kind, TreeSitterParser};
use super::ImportExtractor;

/// Go import extraction backed by tree-sitter-go.
///
/// Only the file preamble is inspected: the package clause and the import
/// declarations that follow it. Syntax errors past the imports are ignored,
/// the same way an imports-only parse would.
pub struct GoParser {
    language: Language,
}

impl GoParser {
    pub fn new() -> Result<Self> {
        let language = tree_sitter_go::language();
        // Fail early if the grammar and the runtime disagree on ABI.
        TreeSitterParser::new(language)?;
        Ok(Self { language })
    }

    fn import_specs<'tree>(&self, declaration: &TSNode<'tree>) -> Vec<TSNode<'tree>> {
        if let Some(spec_list) = find_child_by_kind(declaration, "import_spec_list") {
            // Multiple imports in a group
            find_children_by_kind(&spec_list, "import_spec")
        } else {
            find_children_by_kind(declaration, "import_spec")
        }
    }
}

impl ImportExtractor for GoParser {
    fn extract_imports(&self, source: &str) -> Result<Vec<String>> {
        let mut parser = TreeSitterParser::new(self.language)?;
        let tree = parser.parse_source(source)?;
        let root = tree.root_node();
        let bytes = source.as_bytes();

        let mut seen_package = false;
        let mut imports = Vec::new();
        let mut cursor = root.walk();

        // Statement terminators are anonymous tokens between declarations.
        for child in root.named_children(&mut cursor) {
            let line = child.start_position().row + 1;
            match child.kind() {
                "comment" => {}
                "package_clause" if !child.has_error() => seen_package = true,
                "import_declaration" if seen_package => {
                    if child.has_error() {
                        bail!("syntax error in import declaration on line {}", line);
                    }
                    for spec in self.import_specs(&child) {
                        if let Some(path) = spec.child_by_field_name("path") {
                            imports.push(extract_text(&path, bytes).to_string());
                        }
                    }
                }
                _ if !seen_package => bail!("expected 'package' clause on line {}", line),
                "ERROR" => bail!("syntax error on line {}", line),
                // First top-level declaration ends the preamble.
                _ => break,
            }
        }

        if !seen_package {
            bail!("expected 'package' clause");
        }
        Ok(imports)
    }

    fn language_name(&self) -> &str {
        "go"
    }

    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn test_suffix(&self) -> Option<&str> {
        Some("_test.go")
    }
}
