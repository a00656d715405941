//! Call hierarchy: one node per Method symbol, populated
//! from MethodCall edges.

use std::collections::HashMap;

use revmap_core::{CallHierarchyNode, Dependency, DependencyKind, Symbol, SymbolKind};

pub fn build(symbols: &[Symbol], static_edges: &[Dependency]) -> Vec<CallHierarchyNode> {
    let methods: Vec<&Symbol> = symbols.iter().filter(|s| s.kind == SymbolKind::Method).collect();

    let mut callees: HashMap<&str, Vec<String>> = HashMap::new();
    let mut callers: HashMap<&str, Vec<String>> = HashMap::new();
    for edge in static_edges {
        if edge.kind != DependencyKind::MethodCall {
            continue;
        }
        callees.entry(edge.origin.as_str()).or_default().push(edge.target.clone());
        callers.entry(edge.target.as_str()).or_default().push(edge.origin.clone());
    }

    methods
        .iter()
        .map(|method| {
            let method_callees = callees.get(method.fqn.as_str()).cloned().unwrap_or_default();
            let method_callers = callers.get(method.fqn.as_str()).cloned().unwrap_or_default();
            let owning_class_fqn = method.fqn.rsplit_once('.').map(|(prefix, _)| prefix.to_string()).unwrap_or_default();
            let complexity = (method_callees.len() as f64 + 1.0).log10() * 2.0;
            CallHierarchyNode {
                method_fqn: method.fqn.clone(),
                owning_class_fqn,
                callees: method_callees,
                callers: method_callers,
                complexity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::Visibility;
    use std::path::PathBuf;

    fn method(fqn: &str) -> Symbol {
        Symbol {
            name: fqn.rsplit('.').next().unwrap().to_string(),
            fqn: fqn.to_string(),
            kind: SymbolKind::Method,
            file_path: PathBuf::from("a.cs"),
            line: 1,
            visibility: Visibility::Public,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            parameters: Vec::new(),
            metadata: std::collections::HashMap::new(),
        }
    }

    #[test]
    fn root_and_leaf_nodes_identified_by_empty_callers_or_callees() {
        let symbols = vec![method("N.C.A"), method("N.C.B")];
        let edges = vec![Dependency {
            kind: DependencyKind::MethodCall,
            origin: "N.C.A".to_string(),
            target: "N.C.B".to_string(),
            source_file: PathBuf::from("a.cs"),
            source_line: 1,
            reflective_target: None,
            conditional: false,
        }];
        let nodes = build(&symbols, &edges);
        let root = nodes.iter().find(|n| n.method_fqn == "N.C.A").unwrap();
        assert!(root.callers.is_empty());
        let leaf = nodes.iter().find(|n| n.method_fqn == "N.C.B").unwrap();
        assert!(leaf.callees.is_empty());
    }
}
