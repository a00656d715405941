//! Inheritance tree: one node per Class/Interface symbol,
//! depth computed recursively with cycle-breaking.

use std::collections::{HashMap, HashSet};

use revmap_core::{Dependency, DependencyKind, InheritanceNode, Symbol, SymbolKind};

fn depth_of(fqn: &str, bases_of: &HashMap<&str, Vec<String>>, visited: &mut HashSet<String>) -> u32 {
    if !visited.insert(fqn.to_string()) {
        return 0;
    }
    match bases_of.get(fqn) {
        Some(bases) if !bases.is_empty() => 1 + bases.iter().map(|b| depth_of(b, bases_of, visited)).max().unwrap_or(0),
        _ => 0,
    }
}

pub fn build(symbols: &[Symbol], static_edges: &[Dependency]) -> Vec<InheritanceNode> {
    let types: Vec<&Symbol> = symbols
        .iter()
        .filter(|s| s.kind == SymbolKind::Class || s.kind == SymbolKind::Interface)
        .collect();

    let mut bases_of: HashMap<&str, Vec<String>> = HashMap::new();
    let mut derived_of: HashMap<&str, Vec<String>> = HashMap::new();
    for edge in static_edges {
        if edge.kind != DependencyKind::Inheritance {
            continue;
        }
        bases_of.entry(edge.origin.as_str()).or_default().push(edge.target.clone());
        derived_of.entry(edge.target.as_str()).or_default().push(edge.origin.clone());
    }

    types
        .iter()
        .map(|sym| {
            let bases = bases_of.get(sym.fqn.as_str()).cloned().unwrap_or_default();
            let derived = derived_of.get(sym.fqn.as_str()).cloned().unwrap_or_default();
            let mut visited = HashSet::new();
            let depth = depth_of(&sym.fqn, &bases_of, &mut visited);
            InheritanceNode {
                class_fqn: sym.fqn.clone(),
                bases,
                derived,
                depth,
                is_abstract: sym.is_abstract(),
                is_interface: sym.kind == SymbolKind::Interface,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::Visibility;
    use std::path::PathBuf;

    fn class(fqn: &str, abstract_: bool) -> Symbol {
        Symbol {
            name: fqn.rsplit('.').next().unwrap().to_string(),
            fqn: fqn.to_string(),
            kind: SymbolKind::Class,
            file_path: PathBuf::from("a.cs"),
            line: 1,
            visibility: Visibility::Public,
            modifiers: if abstract_ { vec!["abstract".to_string()] } else { Vec::new() },
            attributes: Vec::new(),
            parameters: Vec::new(),
            metadata: std::collections::HashMap::new(),
        }
    }

    fn inherit(origin: &str, target: &str) -> Dependency {
        Dependency {
            kind: DependencyKind::Inheritance,
            origin: origin.to_string(),
            target: target.to_string(),
            source_file: PathBuf::from("a.cs"),
            source_line: 1,
            reflective_target: None,
            conditional: false,
        }
    }

    #[test]
    fn computes_chain_depth_and_breaks_cycles() {
        let symbols = vec![class("N.A", false), class("N.B", true), class("N.C", false)];
        let edges = vec![inherit("N.A", "N.B"), inherit("N.B", "N.C"), inherit("N.C", "N.A")];
        let nodes = build(&symbols, &edges);
        let a = nodes.iter().find(|n| n.class_fqn == "N.A").unwrap();
        assert!(a.depth <= 3);
        let b = nodes.iter().find(|n| n.class_fqn == "N.B").unwrap();
        assert!(b.is_abstract);
    }
}
