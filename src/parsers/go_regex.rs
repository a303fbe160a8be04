use anyhow::{bail, Result};
use regex::Regex;

use super::ImportExtractor;

/// Line-oriented Go import scanner that needs no grammar.
///
/// Recognises `import "x"`, `import name "x"` and parenthesised groups, and
/// stops at the first top-level `func`, `type`, `var` or `const`.
pub struct RegexGoParser {
    package: Regex,
    single: Regex,
    group_open: Regex,
    spec: Regex,
    declaration: Regex,
}

enum State {
    Preamble,
    Group { opened_on: usize },
}

impl RegexGoParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            package: Regex::new(r"^package\s+\w+")?,
            single: Regex::new(r#"^import\s+(?:[\w.]+\s+)?("[^"]*"|`[^`]*`)"#)?,
            group_open: Regex::new(r"^import\s*\((.*)$")?,
            spec: Regex::new(r#"^(?:[\w.]+\s+)?("[^"]*"|`[^`]*`)\s*(\))?"#)?,
            declaration: Regex::new(r"^(func|type|var|const)\b")?,
        })
    }

    /// Consumes one line inside an import group. Returns true when the line
    /// closes the group.
    fn group_line(&self, line: &str, imports: &mut Vec<String>) -> bool {
        if line.starts_with(')') {
            return true;
        }
        match self.spec.captures(line) {
            Some(caps) => {
                imports.push(caps[1].to_string());
                caps.get(2).is_some()
            }
            None => false,
        }
    }
}

impl ImportExtractor for RegexGoParser {
    fn extract_imports(&self, source: &str) -> Result<Vec<String>> {
        let mut imports = Vec::new();
        let mut seen_package = false;
        let mut in_comment = false;
        let mut state = State::Preamble;

        'lines: for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();

            if in_comment {
                in_comment = !line.contains("*/");
                continue;
            }
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            if line.starts_with("/*") {
                in_comment = !line.contains("*/");
                continue;
            }

            for statement in statements(line) {
                match state {
                    State::Group { .. } => {
                        if self.group_line(statement, &mut imports) {
                            state = State::Preamble;
                        }
                    }
                    State::Preamble if !seen_package => {
                        if !self.package.is_match(statement) {
                            bail!("expected 'package' clause on line {}", index + 1);
                        }
                        seen_package = true;
                    }
                    State::Preamble => {
                        if let Some(caps) = self.group_open.captures(statement) {
                            let rest = caps[1].trim();
                            if rest.is_empty() || !self.group_line(rest, &mut imports) {
                                state = State::Group { opened_on: index + 1 };
                            }
                        } else if let Some(caps) = self.single.captures(statement) {
                            imports.push(caps[1].to_string());
                        } else if self.declaration.is_match(statement) {
                            break 'lines;
                        } else {
                            bail!("unexpected `{}` on line {}", statement, index + 1);
                        }
                    }
                }
            }
        }

        if let State::Group { opened_on } = state {
            bail!("import group opened on line {} is never closed", opened_on);
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

/// Splits a trimmed line on `;` outside string literals and drops a
/// trailing `//` comment. Empty statements are skipped.
fn statements(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match quote {
            Some('"') if c == '\\' => {
                chars.next();
            }
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '`' => quote = Some(c),
                ';' => {
                    parts.push(&line[start..i]);
                    start = i + 1;
                }
                '/' if matches!(chars.peek(), Some((_, '/'))) => {
                    parts.push(&line[start..i]);
                    start = line.len();
                    break;
                }
                _ => {}
            },
        }
    }
    if start < line.len() {
        parts.push(&line[start..]);
    }

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
