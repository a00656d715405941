//! Layer inference: built-in four layers plus any
//! caller-supplied custom layers, scored the same way.

use std::collections::HashMap;

use revmap_core::{Dependency, Layer, Symbol};

struct LayerSpec {
    name: &'static str,
    level: u32,
    indicators: &'static [&'static str],
}

const BUILTIN_LAYERS: &[LayerSpec] = &[
    LayerSpec { name: "Presentation", level: 1, indicators: &["Controller", "View", "Page", "Form", "UI"] },
    LayerSpec { name: "Business", level: 2, indicators: &["Service", "Manager", "Logic", "Handler"] },
    LayerSpec { name: "Data", level: 3, indicators: &["Repository", "Dao", "Entity", "Model"] },
    LayerSpec { name: "Infrastructure", level: 4, indicators: &["Config", "Logger", "Cache", "Infrastructure"] },
];

fn score(name: &str, namespace: &str, indicators: &[&str]) -> u32 {
    let name_hits = indicators.iter().filter(|i| name.contains(*i)).count() as u32;
    let namespace_hits = indicators.iter().filter(|i| namespace.contains(*i)).count() as u32;
    name_hits * 2 + namespace_hits
}

/// Layers ordered by level ascending, each carrying the class FQNs that
/// scored positively against it and the distinct outbound static-edge
/// targets whose origin is one of those members.
pub fn infer(classes: &[&Symbol], static_edges: &[Dependency], custom_layers: &HashMap<String, Vec<String>>) -> Vec<Layer> {
    let mut next_custom_level = BUILTIN_LAYERS.len() as u32 + 1;
    let mut specs: Vec<(String, u32, Vec<String>)> = BUILTIN_LAYERS
        .iter()
        .map(|s| (s.name.to_string(), s.level, s.indicators.iter().map(|s| s.to_string()).collect()))
        .collect();
    for (name, indicators) in custom_layers {
        specs.push((name.clone(), next_custom_level, indicators.clone()));
        next_custom_level += 1;
    }

    let mut layers = Vec::new();
    for (name, level, indicators) in &specs {
        let indicator_refs: Vec<&str> = indicators.iter().map(|s| s.as_str()).collect();
        let members: Vec<String> = classes
            .iter()
            .filter(|c| score(&c.name, &c.namespace(), &indicator_refs) > 0)
            .map(|c| c.fqn.clone())
            .collect();
        if members.is_empty() {
            continue;
        }
        let member_set: std::collections::HashSet<&str> = members.iter().map(|s| s.as_str()).collect();
        let mut outbound: Vec<String> = static_edges
            .iter()
            .filter(|e| member_set.contains(e.origin.as_str()) && !member_set.contains(e.target.as_str()))
            .map(|e| e.target.clone())
            .collect();
        outbound.sort();
        outbound.dedup();
        layers.push(Layer { name: name.clone(), level: *level, components: members, outbound_dependencies: outbound });
    }
    layers.sort_by_key(|l| l.level);
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::{DependencyKind, SymbolKind, Visibility};
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
    fn orders_layers_by_level_and_flags_cross_layer_edge() {
        let controller = class("OrderController", "App.Web");
        let repository = class("OrderRepository", "App.Data");
        let classes = vec![&controller, &repository];
        let edges = vec![Dependency {
            kind: DependencyKind::MethodCall,
            origin: controller.fqn.clone(),
            target: repository.fqn.clone(),
            source_file: PathBuf::from("a.cs"),
            source_line: 1,
            reflective_target: None,
            conditional: false,
        }];
        let layers = infer(&classes, &edges, &HashMap::new());
        assert_eq!(layers[0].name, "Presentation");
        assert_eq!(layers[1].name, "Data");
        assert!(layers[0].outbound_dependencies.contains(&repository.fqn));
    }
}
