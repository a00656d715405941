//! C# extraction via a full tree-sitter parse, walked with a container
//! stack so every symbol gets a namespace-qualified FQN.

use std::collections::HashMap;
use std::path::Path;

use revmap_core::{Symbol, SymbolKind, Visibility};
use tree_sitter::Node;

use crate::container::ContainerStack;
use crate::parser_pool::{FileType, ParseRequest, ParserPool};

pub fn extract(pool: &ParserPool, path: &Path, content: &str) -> anyhow::Result<Vec<Symbol>> {
    let request = ParseRequest { file_type: FileType::CSharp, content: content.to_string(), path: path.to_path_buf() };
    let parsed = pool.parse_blocking(request)?;
    let mut symbols = Vec::new();
    let mut stack = ContainerStack::new();
    visit(parsed.tree.root_node(), content.as_bytes(), path, &mut stack, &mut symbols);
    Ok(symbols)
}

fn line_of(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn modifiers_of(node: Node, source: &[u8]) -> Vec<String> {
    let mut mods = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "modifier" {
            mods.push(text(child, source).to_string());
        }
    }
    mods
}

/// `default_visibility` is `Internal` for top-level type declarations and
/// `Private` for members, matching C#'s own implicit-visibility rules.
fn visibility_from_modifiers(modifiers: &[String], default_visibility: Visibility) -> Visibility {
    let has = |m: &str| modifiers.iter().any(|x| x.eq_ignore_ascii_case(m));
    if has("public") {
        Visibility::Public
    } else if has("protected") && has("internal") {
        Visibility::ProtectedInternal
    } else if has("protected") {
        Visibility::Protected
    } else if has("internal") {
        Visibility::Internal
    } else if has("private") {
        Visibility::Private
    } else {
        default_visibility
    }
}

fn attributes_of(node: Node, source: &[u8]) -> Vec<String> {
    let mut attrs = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "attribute_list" {
            let mut inner = child.walk();
            for attr in child.children(&mut inner) {
                if attr.kind() == "attribute" {
                    if let Some(name) = attr.child_by_field_name("name") {
                        attrs.push(text(name, source).to_string());
                    }
                }
            }
        }
    }
    attrs
}

fn base_types_of(node: Node, source: &[u8]) -> Vec<String> {
    let mut bases = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "base_list" {
            let mut inner = child.walk();
            for base in child.children(&mut inner) {
                if base.kind().ends_with("_type") || base.kind() == "identifier" || base.kind() == "generic_name" {
                    bases.push(text(base, source).to_string());
                }
            }
        }
    }
    bases
}

fn name_field<'a>(node: Node<'a>, source: &'a [u8]) -> Option<String> {
    node.child_by_field_name("name").map(|n| text(n, source).to_string())
}

fn base_metadata(namespace: &str, modifiers: &[String], attributes: &[String], base_types: &[String]) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert("Namespace".to_string(), namespace.to_string());
    metadata.insert("Language".to_string(), "CSharp".to_string());
    if !base_types.is_empty() {
        metadata.insert("BaseTypes".to_string(), base_types.join(","));
    }
    let _ = (modifiers, attributes);
    metadata
}

fn extract_parameters(node: Node, source: &[u8], fqn: &str) -> Vec<Symbol> {
    let mut params = Vec::new();
    let Some(param_list) = node.child_by_field_name("parameters") else { return params };
    let mut cursor = param_list.walk();
    for child in param_list.children(&mut cursor) {
        if child.kind() != "parameter" {
            continue;
        }
        let Some(name) = name_field(child, source) else { continue };
        let param_type = child.child_by_field_name("type").map(|t| text(t, source).to_string());
        let mut metadata = HashMap::new();
        if let Some(t) = param_type {
            metadata.insert("ParameterType".to_string(), t);
        }
        params.push(Symbol {
            name: name.clone(),
            fqn: format!("{fqn}.{name}"),
            kind: SymbolKind::Field,
            file_path: std::path::PathBuf::new(),
            line: line_of(child),
            visibility: Visibility::Private,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            parameters: Vec::new(),
            metadata,
        });
    }
    params
}

fn visit(node: Node, source: &[u8], path: &Path, stack: &mut ContainerStack, out: &mut Vec<Symbol>) {
    match node.kind() {
        "namespace_declaration" => {
            if let Some(name) = node.child_by_field_name("name") {
                let ns = text(name, source).to_string();
                stack.push_namespace(&ns);
                walk_children(node, source, path, stack, out);
                stack.pop(ns.split('.').filter(|s| !s.is_empty()).count());
                return;
            }
        }
        "class_declaration" | "interface_declaration" | "struct_declaration" | "enum_declaration" => {
            let Some(name) = name_field(node, source) else { return walk_children(node, source, path, stack, out) };
            let kind = match node.kind() {
                "class_declaration" => SymbolKind::Class,
                "interface_declaration" => SymbolKind::Interface,
                "struct_declaration" => SymbolKind::Struct,
                _ => SymbolKind::Enum,
            };
            let modifiers = modifiers_of(node, source);
            let attributes = attributes_of(node, source);
            let base_types = base_types_of(node, source);
            let namespace = stack.namespace();
            let fqn = stack.fqn_for(&name);
            out.push(Symbol {
                name: name.clone(),
                fqn,
                kind,
                file_path: path.to_path_buf(),
                line: line_of(node),
                visibility: visibility_from_modifiers(&modifiers, Visibility::Internal),
                modifiers: modifiers.clone(),
                attributes,
                parameters: Vec::new(),
                metadata: base_metadata(&namespace, &modifiers, &[], &base_types),
            });
            stack.push_type(&name);
            walk_children(node, source, path, stack, out);
            stack.pop(1);
            return;
        }
        "method_declaration" | "constructor_declaration" => {
            let Some(name) = name_field(node, source).or_else(|| {
                stack.enclosing_type().map(|s| s.to_string())
            }) else {
                return walk_children(node, source, path, stack, out);
            };
            let modifiers = modifiers_of(node, source);
            let attributes = attributes_of(node, source);
            let namespace = stack.namespace();
            let fqn = stack.fqn_for(&name);
            let parameters = extract_parameters(node, source, &fqn);
            out.push(Symbol {
                name,
                fqn,
                kind: SymbolKind::Method,
                file_path: path.to_path_buf(),
                line: line_of(node),
                visibility: visibility_from_modifiers(&modifiers, Visibility::Private),
                modifiers: modifiers.clone(),
                attributes,
                parameters,
                metadata: base_metadata(&namespace, &modifiers, &[], &[]),
            });
        }
        "property_declaration" => {
            if let Some(name) = name_field(node, source) {
                let modifiers = modifiers_of(node, source);
                let attributes = attributes_of(node, source);
                let namespace = stack.namespace();
                out.push(Symbol {
                    fqn: stack.fqn_for(&name),
                    name,
                    kind: SymbolKind::Property,
                    file_path: path.to_path_buf(),
                    line: line_of(node),
                    visibility: visibility_from_modifiers(&modifiers, Visibility::Private),
                    modifiers: modifiers.clone(),
                    attributes,
                    parameters: Vec::new(),
                    metadata: base_metadata(&namespace, &modifiers, &[], &[]),
                });
            }
        }
        "field_declaration" => {
            let modifiers = modifiers_of(node, source);
            let attributes = attributes_of(node, source);
            let namespace = stack.namespace();
            if let Some(declaration) = node.child_by_field_name("declaration") {
                let mut cursor = declaration.walk();
                for declarator in declaration.children(&mut cursor) {
                    if declarator.kind() == "variable_declarator" {
                        if let Some(name_node) = declarator.child_by_field_name("name") {
                            let name = text(name_node, source).to_string();
                            out.push(Symbol {
                                fqn: stack.fqn_for(&name),
                                name,
                                kind: SymbolKind::Field,
                                file_path: path.to_path_buf(),
                                line: line_of(declarator),
                                visibility: visibility_from_modifiers(&modifiers, Visibility::Private),
                                modifiers: modifiers.clone(),
                                attributes: attributes.clone(),
                                parameters: Vec::new(),
                                metadata: base_metadata(&namespace, &modifiers, &[], &[]),
                            });
                        }
                    }
                }
            }
        }
        "event_field_declaration" | "event_declaration" => {
            let modifiers = modifiers_of(node, source);
            let namespace = stack.namespace();
            if let Some(name) = name_field(node, source) {
                out.push(Symbol {
                    fqn: stack.fqn_for(&name),
                    name,
                    kind: SymbolKind::Event,
                    file_path: path.to_path_buf(),
                    line: line_of(node),
                    visibility: visibility_from_modifiers(&modifiers, Visibility::Private),
                    modifiers: modifiers.clone(),
                    attributes: Vec::new(),
                    parameters: Vec::new(),
                    metadata: base_metadata(&namespace, &modifiers, &[], &[]),
                });
            }
        }
        "delegate_declaration" => {
            let modifiers = modifiers_of(node, source);
            let namespace = stack.namespace();
            if let Some(name) = name_field(node, source) {
                out.push(Symbol {
                    fqn: stack.fqn_for(&name),
                    name,
                    kind: SymbolKind::Delegate,
                    file_path: path.to_path_buf(),
                    line: line_of(node),
                    visibility: visibility_from_modifiers(&modifiers, Visibility::Private),
                    modifiers: modifiers.clone(),
                    attributes: Vec::new(),
                    parameters: Vec::new(),
                    metadata: base_metadata(&namespace, &modifiers, &[], &[]),
                });
            }
        }
        _ => {}
    }
    walk_children(node, source, path, stack, out);
}

fn walk_children(node: Node, source: &[u8], path: &Path, stack: &mut ContainerStack, out: &mut Vec<Symbol>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(child, source, path, stack, out);
    }
}
