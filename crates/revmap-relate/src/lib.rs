//! revmap-relate — relationship mapping over a codebase's static
//! dependency edges, components, and layers.

pub mod call_hierarchy;
pub mod inheritance;
pub mod matrix;
pub mod options;
pub mod strength;

pub use options::RelationshipOptions;

use std::collections::HashMap;

use revmap_core::{
    CallHierarchyNode, CancellationToken, Component, Dependency, InheritanceNode, Layer, Outcome, PipelineError,
    RelationshipKind, RelationshipMatrix, Symbol,
};

use matrix::{ComponentRelationship, DependencyMatrix, LayerRelationship};

#[derive(Debug, Clone, Default)]
pub struct RelationshipStatistics {
    pub total_relationships: usize,
    pub kind_histogram: HashMap<RelationshipKind, usize>,
    pub mean_strength: f64,
    pub strongest_component_relationship: Option<String>,
    pub layer_relationship_count: usize,
    pub layer_violation_count: usize,
    pub method_count: usize,
    pub class_count: usize,
    pub root_method_count: usize,
    pub leaf_method_count: usize,
    pub max_call_depth: u32,
    pub max_inheritance_depth: u32,
}

#[derive(Debug, Clone, Default)]
pub struct RelationshipMapping {
    pub matrix: RelationshipMatrix,
    pub component_relationships: Vec<ComponentRelationship>,
    pub layer_relationships: Vec<LayerRelationship>,
    pub dependency_matrix: DependencyMatrix,
    pub call_hierarchy: Vec<CallHierarchyNode>,
    pub inheritance_tree: Vec<InheritanceNode>,
    pub statistics: RelationshipStatistics,
}

fn build_statistics(
    matrix: &RelationshipMatrix,
    component_relationships: &[ComponentRelationship],
    layer_relationships: &[LayerRelationship],
    call_hierarchy: &[CallHierarchyNode],
    inheritance_tree: &[InheritanceNode],
    symbols: &[Symbol],
) -> RelationshipStatistics {
    let total_relationships = matrix.relationships.len();
    let mut kind_histogram: HashMap<RelationshipKind, usize> = HashMap::new();
    for relationship in &matrix.relationships {
        *kind_histogram.entry(relationship.kind).or_insert(0) += 1;
    }
    let mean_strength = if total_relationships == 0 {
        0.0
    } else {
        matrix.relationships.iter().map(|r| r.strength).sum::<f64>() / total_relationships as f64
    };
    let strongest_component_relationship = component_relationships
        .first()
        .map(|r| format!("{} -> {} ({:.2})", r.source, r.target, r.strength));

    let layer_violation_count = layer_relationships.iter().filter(|r| r.is_violation).count();

    let method_count = symbols.iter().filter(|s| s.kind == revmap_core::SymbolKind::Method).count();
    let class_count = symbols
        .iter()
        .filter(|s| s.kind == revmap_core::SymbolKind::Class || s.kind == revmap_core::SymbolKind::Struct)
        .count();

    let root_method_count = call_hierarchy.iter().filter(|n| n.callers.is_empty()).count();
    let leaf_method_count = call_hierarchy.iter().filter(|n| n.callees.is_empty()).count();
    let max_call_depth = call_hierarchy.iter().map(|n| n.complexity.ceil() as u32).max().unwrap_or(0);
    let max_inheritance_depth = inheritance_tree.iter().map(|n| n.depth).max().unwrap_or(0);

    RelationshipStatistics {
        total_relationships,
        kind_histogram,
        mean_strength,
        strongest_component_relationship,
        layer_relationship_count: layer_relationships.len(),
        layer_violation_count,
        method_count,
        class_count,
        root_method_count,
        leaf_method_count,
        max_call_depth,
        max_inheritance_depth,
    }
}

pub fn map(
    symbols: &[Symbol],
    static_edges: &[Dependency],
    components: &[Component],
    layers: &[Layer],
    options: &RelationshipOptions,
    cancel: &CancellationToken,
) -> Result<Outcome<RelationshipMapping>, PipelineError> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "relationships" });
    }

    let matrix = if options.build_matrix {
        matrix::build_matrix(static_edges, components, layers)
    } else {
        RelationshipMatrix::default()
    };

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "relationships" });
    }

    let component_relationships =
        if options.map_components { matrix::component_relationships(static_edges, components) } else { Vec::new() };
    let layer_relationships =
        if options.map_layers { matrix::layer_relationships(static_edges, layers) } else { Vec::new() };
    let dependency_matrix = if options.build_dependency_matrix {
        matrix::dependency_strength_matrix(static_edges)
    } else {
        DependencyMatrix::default()
    };
    let call_hierarchy =
        if options.build_call_hierarchy { call_hierarchy::build(symbols, static_edges) } else { Vec::new() };
    let inheritance_tree =
        if options.build_inheritance_tree { inheritance::build(symbols, static_edges) } else { Vec::new() };

    let statistics = build_statistics(
        &matrix,
        &component_relationships,
        &layer_relationships,
        &call_hierarchy,
        &inheritance_tree,
        symbols,
    );

    let mapping = RelationshipMapping {
        matrix,
        component_relationships,
        layer_relationships,
        dependency_matrix,
        call_hierarchy,
        inheritance_tree,
        statistics,
    };
    Ok(Outcome::new(mapping))
}
