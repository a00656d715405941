//! revmap-viz — renders diagrams, interactive graphs, data exports, and a
//! summary report from an architecture and relationship analysis.

pub mod assets;
pub mod diagrams;
pub mod exports;
pub mod force_graph;
pub mod network_graph;
pub mod options;
pub mod package;
pub mod report;
pub mod sanitize;
pub mod treemap;

pub use options::VisualizationOptions;
pub use package::VisualizationPackage;

use chrono::Utc;
use revmap_arch::ArchitectureAnalysis;
use revmap_core::{CancellationToken, Dependency, Outcome, PipelineError, Symbol};
use revmap_relate::RelationshipMapping;

pub fn build(
    symbols: &[Symbol],
    static_edges: &[Dependency],
    architecture: &ArchitectureAnalysis,
    relationships: &RelationshipMapping,
    options: &VisualizationOptions,
    cancel: &CancellationToken,
) -> Result<Outcome<VisualizationPackage>, PipelineError> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "visualization" });
    }

    let mut pkg = VisualizationPackage::default();

    if options.build_diagrams {
        pkg.mermaid_diagrams.push(package::MermaidDiagram {
            title: "Components".to_string(),
            source: diagrams::component_diagram(&architecture.components),
        });
        pkg.mermaid_diagrams.push(package::MermaidDiagram {
            title: "Layers".to_string(),
            source: diagrams::layer_diagram(&architecture.layers),
        });
        pkg.mermaid_diagrams.push(package::MermaidDiagram {
            title: "Dependencies".to_string(),
            source: diagrams::dependency_diagram(static_edges),
        });
        pkg.mermaid_diagrams.push(package::MermaidDiagram {
            title: "CallHierarchy".to_string(),
            source: diagrams::call_hierarchy_diagram(&relationships.call_hierarchy),
        });
        pkg.mermaid_diagrams.push(package::MermaidDiagram {
            title: "Inheritance".to_string(),
            source: diagrams::inheritance_diagram(&relationships.inheritance_tree),
        });
    }

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "visualization" });
    }

    if options.build_force_directed {
        let data = force_graph::build_data(&architecture.components, &relationships.component_relationships);
        let (html, json) = force_graph::build_html("ComponentGraph", &data);
        pkg.d3_force_graph = Some(package::HtmlArtifact { title: "ComponentGraph".to_string(), html, data_json: json });
    }

    if options.build_network_graph {
        let graph = network_graph::build(&relationships.matrix.relationships);
        let json = serde_json::to_string_pretty(&graph).unwrap_or_else(|_| "{}".to_string());
        let html = format!(
            "<!DOCTYPE html><html><head><title>Network</title></head><body><pre>{json}</pre></body></html>\n"
        );
        pkg.cytoscape_network_graph =
            Some(package::HtmlArtifact { title: "Network".to_string(), html, data_json: json });
    }

    if options.build_treemap {
        let tree = treemap::build(&architecture.components);
        pkg.treemap_json = Some(serde_json::to_string_pretty(&tree).unwrap_or_else(|_| "{}".to_string()));
    }

    if options.build_exports {
        pkg.components_csv = Some(exports::components_csv(&architecture.components));
        pkg.dependencies_csv = Some(exports::dependencies_csv(static_edges));
        pkg.relationship_matrix_json = Some(exports::relationship_matrix_json(&relationships.matrix));
        pkg.summary_report_html =
            Some(report::build(symbols.len(), static_edges.len(), &architecture.components, &architecture.layers));
    }

    pkg.metadata = Some(package::PackageMetadata {
        generated_at: Utc::now(),
        total_components: architecture.components.len(),
        total_relationships: relationships.matrix.relationships.len(),
        toolchain: vec!["revmap".to_string()],
    });

    Ok(Outcome::new(pkg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_arch::metrics::CohesionCoupling;
    use revmap_relate::RelationshipStatistics;
    use revmap_core::RelationshipMatrix;

    #[test]
    fn builds_a_package_with_every_family_enabled() {
        let architecture = ArchitectureAnalysis {
            detected_pattern: revmap_core::ArchitecturalPattern::Unknown,
            layers: Vec::new(),
            components: Vec::new(),
            design_patterns: Vec::new(),
            cohesion_coupling: CohesionCoupling::default(),
            violations: Vec::new(),
            modules: Vec::new(),
        };
        let relationships = RelationshipMapping {
            matrix: RelationshipMatrix::default(),
            component_relationships: Vec::new(),
            layer_relationships: Vec::new(),
            dependency_matrix: revmap_relate::matrix::DependencyMatrix::default(),
            call_hierarchy: Vec::new(),
            inheritance_tree: Vec::new(),
            statistics: RelationshipStatistics::default(),
        };
        let options = VisualizationOptions::default();
        let cancel = CancellationToken::new();
        let outcome = build(&[], &[], &architecture, &relationships, &options, &cancel).unwrap();
        assert_eq!(outcome.value.mermaid_diagrams.len(), 5);
        assert!(outcome.value.metadata.is_some());
    }
}
