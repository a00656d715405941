//! Builds the dependency graph from static and dynamic edges: nodes are
//! every distinct origin/target that appears on an edge, edge kind is
//! inferred from the originating `DependencyKind`.

use std::collections::HashMap;

use revmap_core::{
    DepEdgeKind, DepGraphEdge, DepGraphNode, DepNodeKind, Dependency, DependencyKind, Graph, NodeId,
};

fn infer_node_kind(fqn: &str) -> DepNodeKind {
    if fqn.starts_with("System.") || fqn.starts_with("Microsoft.") {
        return DepNodeKind::Assembly;
    }
    if fqn.contains("()") {
        return DepNodeKind::Method;
    }
    match fqn.rsplit('.').next() {
        Some(last) if last.chars().next().is_some_and(|c| c.is_uppercase()) => DepNodeKind::Class,
        _ => DepNodeKind::Unknown,
    }
}

fn label_for(fqn: &str) -> String {
    fqn.rsplit('.').next().unwrap_or(fqn).to_string()
}

fn edge_kind_for(kind: DependencyKind) -> DepEdgeKind {
    match kind {
        DependencyKind::Inheritance => DepEdgeKind::Inheritance,
        DependencyKind::MethodCall => DepEdgeKind::MethodCall,
        DependencyKind::PropertyAccess => DepEdgeKind::Association,
        DependencyKind::Import => DepEdgeKind::Dependency,
        DependencyKind::Other => DepEdgeKind::Unknown,
    }
}

pub fn build(static_edges: &[Dependency], dynamic_edges: &[Dependency]) -> Graph<DepGraphNode, DepGraphEdge> {
    let mut graph = Graph::new();
    let mut nodes: HashMap<String, NodeId> = HashMap::new();

    let mut node_for = |graph: &mut Graph<DepGraphNode, DepGraphEdge>, nodes: &mut HashMap<String, NodeId>, fqn: &str| -> NodeId {
        if let Some(id) = nodes.get(fqn) {
            return *id;
        }
        let id = graph.add_node(DepGraphNode {
            label: label_for(fqn),
            fqn: fqn.to_string(),
            kind: infer_node_kind(fqn),
        });
        nodes.insert(fqn.to_string(), id);
        id
    };

    for edge in static_edges {
        let source = node_for(&mut graph, &mut nodes, &edge.origin);
        let target = node_for(&mut graph, &mut nodes, &edge.target);
        graph.add_edge(
            source,
            target,
            DepGraphEdge { kind: Some(edge_kind_for(edge.kind)), attributes: HashMap::new() },
        );
    }

    for edge in dynamic_edges {
        let source = node_for(&mut graph, &mut nodes, &edge.origin);
        let target = node_for(&mut graph, &mut nodes, &edge.target);
        let mut attributes = HashMap::new();
        attributes.insert("IsDynamic".to_string(), "true".to_string());
        graph.add_edge(source, target, DepGraphEdge { kind: Some(DepEdgeKind::Dependency), attributes });
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(kind: DependencyKind, origin: &str, target: &str) -> Dependency {
        Dependency {
            kind,
            origin: origin.to_string(),
            target: target.to_string(),
            source_file: std::path::PathBuf::from("a.cs"),
            source_line: 1,
            reflective_target: None,
            conditional: false,
        }
    }

    #[test]
    fn builds_nodes_and_infers_kinds() {
        let static_edges = vec![edge(DependencyKind::Inheritance, "N.Derived", "N.Base")];
        let dynamic_edges = vec![edge(DependencyKind::Other, "N.Factory.Create()", "System.Reflection")];
        let graph = build(&static_edges, &dynamic_edges);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        let assembly_node = graph.nodes().find(|(_, n)| n.fqn == "System.Reflection").unwrap().1;
        assert_eq!(assembly_node.kind, DepNodeKind::Assembly);
    }
}
