//! Visual Basic .NET extraction. No tree-sitter grammar for VB exists in
//! the dependency set, so this is a genuine structural parser over the
//! keyword-delimited block form VB uses instead of braces — it tracks a
//! stack of open blocks the same way the C# walker tracks AST containers,
//! and shares its FQN synthesis.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use revmap_core::{Symbol, SymbolKind, Visibility};

use crate::container::ContainerStack;

static BLOCK_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*((?:public|private|protected|friend|protected friend|mustinherit|notinheritable|partial)\s+)*(namespace|class|interface|module|structure|enum)\s+([A-Za-z_][\w.]*)",
    )
    .unwrap()
});

static MEMBER_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*((?:public|private|protected|friend|protected friend|shared|overridable|overrides|mustoverride|notoverridable|overloads)\s+)*(sub|function|property)\s+([A-Za-z_]\w*)\s*(\(([^)]*)\))?",
    )
    .unwrap()
});

static BLOCK_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*end\s+(namespace|class|interface|module|structure|enum|sub|function|property)").unwrap());

#[derive(Debug, Clone)]
enum Frame {
    Container { keyword: String, depth_pushed: usize },
    Member { keyword: String },
}

pub fn extract(path: &Path, content: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    let mut stack = ContainerStack::new();
    let mut frames: Vec<Frame> = Vec::new();

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx as u32 + 1;
        let line = strip_comment(raw_line);

        if let Some(captures) = BLOCK_END.captures(line) {
            let keyword = captures.get(1).unwrap().as_str().to_ascii_lowercase();
            if let Some(top) = frames.last() {
                let matches = match top {
                    Frame::Container { keyword: k, .. } => *k == keyword,
                    Frame::Member { keyword: k } => *k == keyword,
                };
                if matches {
                    if let Frame::Container { depth_pushed, .. } = frames.pop().unwrap() {
                        stack.pop(depth_pushed);
                    }
                }
            }
            continue;
        }

        if let Some(captures) = BLOCK_OPEN.captures(line) {
            let modifiers = collect_modifiers(&captures, 1);
            let keyword = captures.get(2).unwrap().as_str().to_ascii_lowercase();
            let name = captures.get(3).unwrap().as_str().to_string();
            let namespace = stack.namespace();

            if keyword == "namespace" {
                let depth = name.split('.').filter(|s| !s.is_empty()).count();
                stack.push_namespace(&name);
                frames.push(Frame::Container { keyword, depth_pushed: depth });
                continue;
            }

            let kind = match keyword.as_str() {
                "class" => SymbolKind::Class,
                "interface" => SymbolKind::Interface,
                "module" => SymbolKind::Class,
                "structure" => SymbolKind::Struct,
                "enum" => SymbolKind::Enum,
                _ => SymbolKind::Class,
            };
            let fqn = stack.fqn_for(&name);
            symbols.push(Symbol {
                name: name.clone(),
                fqn,
                kind,
                file_path: path.to_path_buf(),
                line: line_no,
                visibility: visibility_from(&modifiers),
                modifiers: modifiers.clone(),
                attributes: Vec::new(),
                parameters: Vec::new(),
                metadata: base_metadata(&namespace),
            });
            stack.push_type(&name);
            frames.push(Frame::Container { keyword, depth_pushed: 1 });
            continue;
        }

        if let Some(captures) = MEMBER_OPEN.captures(line) {
            let modifiers = collect_modifiers(&captures, 1);
            let keyword = captures.get(2).unwrap().as_str().to_ascii_lowercase();
            let name = captures.get(3).unwrap().as_str().to_string();
            let namespace = stack.namespace();
            let fqn = stack.fqn_for(&name);
            let kind = if keyword == "property" { SymbolKind::Property } else { SymbolKind::Method };
            let parameters = captures
                .get(5)
                .map(|m| parse_params(m.as_str(), &fqn, path))
                .unwrap_or_default();

            symbols.push(Symbol {
                name,
                fqn,
                kind,
                file_path: path.to_path_buf(),
                line: line_no,
                visibility: visibility_from(&modifiers),
                modifiers: modifiers.clone(),
                attributes: Vec::new(),
                parameters,
                metadata: base_metadata(&namespace),
            });
            frames.push(Frame::Member { keyword });
        }
    }

    symbols
}

fn collect_modifiers(captures: &regex::Captures, group: usize) -> Vec<String> {
    captures
        .get(group)
        .map(|m| m.as_str().split_whitespace().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

fn visibility_from(modifiers: &[String]) -> Visibility {
    let has = |m: &str| modifiers.iter().any(|x| x.eq_ignore_ascii_case(m));
    if has("Public") {
        Visibility::Public
    } else if has("Protected") && has("Friend") {
        Visibility::ProtectedInternal
    } else if has("Protected") {
        Visibility::Protected
    } else if has("Friend") {
        Visibility::Internal
    } else if has("Private") {
        Visibility::Private
    } else {
        Visibility::Public
    }
}

fn base_metadata(namespace: &str) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert("Namespace".to_string(), namespace.to_string());
    metadata.insert("Language".to_string(), "VisualBasic".to_string());
    metadata
}

fn parse_params(raw: &str, owner_fqn: &str, _path: &Path) -> Vec<Symbol> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .filter_map(|part| {
            let part = part.trim();
            let name = part.split(|c: char| c.is_whitespace() || c == ':').next()?.trim_start_matches("ByVal ").trim_start_matches("ByRef ");
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let mut metadata = HashMap::new();
            if let Some(as_pos) = part.to_ascii_lowercase().find(" as ") {
                metadata.insert("ParameterType".to_string(), part[as_pos + 4..].trim().to_string());
            }
            Some(Symbol {
                name: name.to_string(),
                fqn: format!("{owner_fqn}.{name}"),
                kind: SymbolKind::Field,
                file_path: std::path::PathBuf::new(),
                line: 0,
                visibility: Visibility::Private,
                modifiers: Vec::new(),
                attributes: Vec::new(),
                parameters: Vec::new(),
                metadata,
            })
        })
        .collect()
}

fn strip_comment(line: &str) -> &str {
    match line.find('\'') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_namespaced_class_and_sub() {
        let src = "Namespace App.Models\n    Public Class Customer\n        Public Sub Save(id As Integer)\n        End Sub\n    End Class\nEnd Namespace\n";
        let symbols = extract(Path::new("Customer.vb"), src);
        let class = symbols.iter().find(|s| s.kind == SymbolKind::Class).unwrap();
        assert_eq!(class.fqn, "App.Models.Customer");
        let method = symbols.iter().find(|s| s.kind == SymbolKind::Method).unwrap();
        assert_eq!(method.fqn, "App.Models.Customer.Save");
        assert_eq!(method.parameters.len(), 1);
        assert_eq!(method.parameters[0].name, "id");
    }

    #[test]
    fn nested_blocks_close_in_order() {
        let src = "Public Module Utils\n    Public Function Double(x As Integer) As Integer\n    End Function\nEnd Module\n";
        let symbols = extract(Path::new("Utils.vb"), src);
        assert_eq!(symbols.len(), 2);
    }
}
