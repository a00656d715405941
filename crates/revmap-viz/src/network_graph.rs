//! Network-graph representation: flat node/edge lists, capped at the
//! first 100 relationships.

use serde::Serialize;

use revmap_core::Relationship;

#[derive(Debug, Clone, Serialize)]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct NetworkGraph {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

pub fn build(relationships: &[Relationship]) -> NetworkGraph {
    let capped = &relationships[..relationships.len().min(100)];

    let mut seen = std::collections::HashSet::new();
    let mut nodes = Vec::new();
    for relationship in capped {
        for id in [&relationship.source, &relationship.target] {
            if seen.insert(id.clone()) {
                nodes.push(NetworkNode { id: id.clone(), label: id.clone() });
            }
        }
    }

    let edges = capped
        .iter()
        .enumerate()
        .map(|(i, r)| NetworkEdge {
            id: format!("e{i}"),
            source: r.source.clone(),
            target: r.target.clone(),
            label: format!("{:?}", r.kind),
            weight: r.strength,
        })
        .collect();

    NetworkGraph { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::{Direction, RelationshipKind};
    use std::collections::HashMap;

    #[test]
    fn caps_at_one_hundred_relationships() {
        let relationships: Vec<Relationship> = (0..150)
            .map(|i| Relationship {
                source: format!("S{i}"),
                target: format!("T{i}"),
                kind: RelationshipKind::Using,
                strength: 0.2,
                direction: Direction::Outbound,
                metadata: HashMap::new(),
            })
            .collect();
        let graph = build(&relationships);
        assert_eq!(graph.edges.len(), 100);
    }
}
