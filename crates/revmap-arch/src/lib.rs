//! revmap-arch — architectural pattern, layer, component, design-pattern,
//! cohesion/coupling, and violation inference.

pub mod component;
pub mod design_pattern;
pub mod layer;
pub mod metrics;
pub mod module;
pub mod options;
pub mod pattern;
pub mod violation;

pub use options::ArchitectureOptions;

use revmap_core::{
    ArchitecturalPattern, ArchitecturalViolation, CancellationToken, Component, DesignPatternMatch, Layer, Module,
    Outcome, PipelineError, Symbol, SymbolKind,
};

#[derive(Debug, Clone)]
pub struct ArchitectureAnalysis {
    pub detected_pattern: ArchitecturalPattern,
    pub layers: Vec<Layer>,
    pub components: Vec<Component>,
    pub design_patterns: Vec<DesignPatternMatch>,
    pub cohesion_coupling: metrics::CohesionCoupling,
    pub violations: Vec<ArchitecturalViolation>,
    pub modules: Vec<Module>,
}

/// Runs every enabled inference pass over a codebase's symbols and
/// resolved static edges, in dependency order: components feed violation
/// detection, layers feed layer-violation detection.
pub fn analyze(
    symbols: &[Symbol],
    static_edges: &[revmap_core::Dependency],
    options: &ArchitectureOptions,
    cancel: &CancellationToken,
) -> Result<Outcome<ArchitectureAnalysis>, PipelineError> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "architecture" });
    }

    let classes: Vec<&Symbol> =
        symbols.iter().filter(|s| s.kind == SymbolKind::Class || s.kind == SymbolKind::Struct).collect();
    let interfaces: Vec<&Symbol> = symbols.iter().filter(|s| s.kind == SymbolKind::Interface).collect();

    let detected_pattern =
        if options.detect_pattern { pattern::detect(&classes, symbols) } else { ArchitecturalPattern::Unknown };

    let layers =
        if options.infer_layers { layer::infer(&classes, static_edges, &options.custom_layers) } else { Vec::new() };

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "architecture" });
    }

    let components = if options.infer_components { component::infer(&classes, &interfaces) } else { Vec::new() };

    let design_patterns =
        if options.detect_design_patterns { design_pattern::detect(&classes, symbols) } else { Vec::new() };

    let cohesion_coupling = metrics::compute(&classes, symbols, static_edges);

    let violations = if options.detect_violations {
        violation::detect(&layers, &components, static_edges)
    } else {
        Vec::new()
    };

    let modules = module::group(&components, symbols);

    let analysis =
        ArchitectureAnalysis { detected_pattern, layers, components, design_patterns, cohesion_coupling, violations, modules };
    Ok(Outcome::new(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::Visibility;
    use std::path::PathBuf;

    fn class(name: &str, namespace: &str) -> Symbol {
        let mut metadata = std::collections::HashMap::new();
        metadata.insert("Namespace".to_string(), namespace.to_string());
        Symbol {
            name: name.to_string(),
            fqn: format!("{namespace}.{name}"),
            kind: SymbolKind::Class,
            file_path: PathBuf::from("a.cs"),
            line: 1,
            visibility: Visibility::Public,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            parameters: Vec::new(),
            metadata,
        }
    }

    #[test]
    fn analyzes_a_small_mvc_codebase() {
        let symbols = vec![
            class("OrderController", "App.Web"),
            class("OrderView", "App.Web"),
            class("CustomerRepository", "App.Data"),
            class("CustomerEntity", "App.Data"),
        ];
        let options = ArchitectureOptions::default();
        let cancel = CancellationToken::new();
        let outcome = analyze(&symbols, &[], &options, &cancel).unwrap();
        assert!(!outcome.value.components.is_empty());
        assert!(!outcome.value.layers.is_empty());
    }
}
