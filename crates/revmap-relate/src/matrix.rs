//! RelationshipMatrix construction and component/layer/dependency
//! relationship rollups, grounded on the nearest-visible-
//! ancestor edge-aggregation shape: group raw edges by an endpoint pair,
//! accumulate counts and per-edge kind/strength, emit one rollup per pair.

use std::collections::HashMap;

use revmap_core::{
    Component, Dependency, Direction, Layer, Relationship, RelationshipKind, RelationshipMatrix,
};

use crate::strength::{kind_for, strength_for};

pub fn build_matrix(static_edges: &[Dependency], components: &[Component], layers: &[Layer]) -> RelationshipMatrix {
    let mut relationships = Vec::new();

    for edge in static_edges {
        let kind = kind_for(edge.kind);
        relationships.push(Relationship {
            source: edge.origin.clone(),
            target: edge.target.clone(),
            kind,
            strength: strength_for(kind),
            direction: Direction::Outbound,
            metadata: HashMap::new(),
        });
    }

    for component in components {
        for class in &component.classes {
            relationships.push(Relationship {
                source: class.clone(),
                target: component.name.clone(),
                kind: RelationshipKind::ComponentMembership,
                strength: 1.0,
                direction: Direction::Bidirectional,
                metadata: HashMap::new(),
            });
        }
    }

    for layer in layers {
        for component_name in &layer.components {
            relationships.push(Relationship {
                source: component_name.clone(),
                target: layer.name.clone(),
                kind: RelationshipKind::LayerMembership,
                strength: 1.0,
                direction: Direction::Bidirectional,
                metadata: HashMap::new(),
            });
        }
    }

    let mut sources: Vec<String> = relationships.iter().map(|r| r.source.clone()).collect();
    sources.sort();
    sources.dedup();
    let mut targets: Vec<String> = relationships.iter().map(|r| r.target.clone()).collect();
    targets.sort();
    targets.dedup();
    let mut kinds: Vec<RelationshipKind> = relationships.iter().map(|r| r.kind).collect();
    kinds.sort_by_key(|k| format!("{k:?}"));
    kinds.dedup();

    RelationshipMatrix { relationships, sources, targets, kinds }
}

#[derive(Debug, Clone)]
pub struct ComponentRelationship {
    pub source: String,
    pub target: String,
    pub count: u32,
    pub kinds: Vec<RelationshipKind>,
    pub strength: f64,
}

fn rollup_pairs<'a>(
    static_edges: &'a [Dependency],
    group_of: impl Fn(&str) -> Option<&'a str>,
) -> Vec<(String, String, u32, Vec<RelationshipKind>, f64)> {
    struct Accum {
        count: u32,
        kinds: Vec<RelationshipKind>,
        strength_sum: f64,
    }
    let mut by_pair: HashMap<(String, String), Accum> = HashMap::new();
    for edge in static_edges {
        let Some(source_group) = group_of(&edge.origin) else { continue };
        let Some(target_group) = group_of(&edge.target) else { continue };
        if source_group == target_group {
            continue;
        }
        let kind = kind_for(edge.kind);
        let entry = by_pair.entry((source_group.to_string(), target_group.to_string())).or_insert_with(|| Accum {
            count: 0,
            kinds: Vec::new(),
            strength_sum: 0.0,
        });
        entry.count += 1;
        entry.strength_sum += strength_for(kind);
        if !entry.kinds.contains(&kind) {
            entry.kinds.push(kind);
        }
    }
    by_pair
        .into_iter()
        .map(|((source, target), accum)| {
            let mean_strength = accum.strength_sum / accum.count as f64;
            (source, target, accum.count, accum.kinds, mean_strength)
        })
        .collect()
}

pub fn component_relationships(static_edges: &[Dependency], components: &[Component]) -> Vec<ComponentRelationship> {
    let mut class_to_component: HashMap<&str, &str> = HashMap::new();
    for component in components {
        for class in &component.classes {
            class_to_component.insert(class.as_str(), component.name.as_str());
        }
    }
    let mut results: Vec<ComponentRelationship> = rollup_pairs(static_edges, |fqn| class_to_component.get(fqn).copied())
        .into_iter()
        .map(|(source, target, count, kinds, strength)| ComponentRelationship { source, target, count, kinds, strength })
        .collect();
    results.sort_by(|a, b| b.strength.partial_cmp(&a.strength).unwrap());
    results
}

#[derive(Debug, Clone)]
pub struct LayerRelationship {
    pub source: String,
    pub target: String,
    pub count: u32,
    pub kinds: Vec<RelationshipKind>,
    pub strength: f64,
    pub is_violation: bool,
}

pub fn layer_relationships(static_edges: &[Dependency], layers: &[Layer]) -> Vec<LayerRelationship> {
    let mut class_to_layer: HashMap<&str, &str> = HashMap::new();
    let mut level_for: HashMap<&str, u32> = HashMap::new();
    for layer in layers {
        level_for.insert(layer.name.as_str(), layer.level);
        for component in &layer.components {
            class_to_layer.insert(component.as_str(), layer.name.as_str());
        }
    }
    let mut results: Vec<LayerRelationship> = rollup_pairs(static_edges, |fqn| class_to_layer.get(fqn).copied())
        .into_iter()
        .map(|(source, target, count, kinds, raw_strength)| {
            let source_level = *level_for.get(source.as_str()).unwrap_or(&0);
            let target_level = *level_for.get(target.as_str()).unwrap_or(&0);
            let is_violation = source_level > target_level;
            let strength = if is_violation { raw_strength * 0.5 } else { raw_strength };
            LayerRelationship { source, target, count, kinds, strength, is_violation }
        })
        .collect();
    results.sort_by_key(|r| (*level_for.get(r.source.as_str()).unwrap_or(&0), *level_for.get(r.target.as_str()).unwrap_or(&0)));
    results
}

#[derive(Debug, Clone)]
pub struct DependencyMatrixEntry {
    pub source: String,
    pub target: String,
    pub count: u32,
    pub kinds: Vec<RelationshipKind>,
    pub strength: f64,
    pub max_edge_strength: f64,
    pub avg_edge_strength: f64,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyMatrix {
    pub entries: Vec<DependencyMatrixEntry>,
    pub min_strength: f64,
    pub max_strength: f64,
}

pub fn dependency_strength_matrix(static_edges: &[Dependency]) -> DependencyMatrix {
    struct Accum {
        count: u32,
        kinds: Vec<RelationshipKind>,
        strengths: Vec<f64>,
    }
    let mut by_pair: HashMap<(String, String), Accum> = HashMap::new();
    for edge in static_edges {
        let kind = kind_for(edge.kind);
        let entry = by_pair.entry((edge.origin.clone(), edge.target.clone())).or_insert_with(|| Accum {
            count: 0,
            kinds: Vec::new(),
            strengths: Vec::new(),
        });
        entry.count += 1;
        entry.strengths.push(strength_for(kind));
        if !entry.kinds.contains(&kind) {
            entry.kinds.push(kind);
        }
    }

    let mut entries = Vec::new();
    let mut min_strength = f64::MAX;
    let mut max_strength = f64::MIN;
    for ((source, target), accum) in by_pair {
        let sum: f64 = accum.strengths.iter().sum();
        let strength = sum * (accum.count as f64 + 1.0).log10();
        let max_edge_strength = accum.strengths.iter().cloned().fold(f64::MIN, f64::max);
        let avg_edge_strength = sum / accum.count as f64;
        min_strength = min_strength.min(strength);
        max_strength = max_strength.max(strength);
        entries.push(DependencyMatrixEntry { source, target, count: accum.count, kinds: accum.kinds, strength, max_edge_strength, avg_edge_strength });
    }
    entries.sort_by(|a, b| b.strength.partial_cmp(&a.strength).unwrap());
    if entries.is_empty() {
        min_strength = 0.0;
        max_strength = 0.0;
    }
    DependencyMatrix { entries, min_strength, max_strength }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::{ComponentType, DependencyKind};
    use std::path::PathBuf;

    fn edge(kind: DependencyKind, origin: &str, target: &str) -> Dependency {
        Dependency {
            kind,
            origin: origin.to_string(),
            target: target.to_string(),
            source_file: PathBuf::from("a.cs"),
            source_line: 1,
            reflective_target: None,
            conditional: false,
        }
    }

    #[test]
    fn component_relationships_sorted_by_strength_descending() {
        let components = vec![
            Component { name: "UI".to_string(), component_type: ComponentType::UserInterface, classes: vec!["App.Web.Controller".to_string()], interfaces: vec![] },
            Component { name: "Data".to_string(), component_type: ComponentType::DataAccess, classes: vec!["App.Data.Repo".to_string()], interfaces: vec![] },
        ];
        let edges = vec![edge(DependencyKind::MethodCall, "App.Web.Controller", "App.Data.Repo")];
        let rels = component_relationships(&edges, &components);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].source, "UI");
        assert_eq!(rels[0].target, "Data");
    }

    #[test]
    fn layer_violation_flagged_when_source_deeper_than_target() {
        let layers = vec![
            Layer { name: "Data".to_string(), level: 3, components: vec!["App.Data.Repo".to_string()], outbound_dependencies: vec![] },
            Layer { name: "Presentation".to_string(), level: 1, components: vec!["App.Web.Controller".to_string()], outbound_dependencies: vec![] },
        ];
        let edges = vec![edge(DependencyKind::MethodCall, "App.Data.Repo", "App.Web.Controller")];
        let rels = layer_relationships(&edges, &layers);
        assert_eq!(rels.len(), 1);
        assert!(rels[0].is_violation);
    }
}
