//! Violation detection: four fixed heuristics over the
//! already-inferred layers and components.

use revmap_core::{ArchitecturalViolation, Component, ComponentType, Dependency, Layer, Severity, ViolationKind};

pub fn detect(layers: &[Layer], components: &[Component], static_edges: &[Dependency]) -> Vec<ArchitecturalViolation> {
    let mut violations = Vec::new();

    if let (Some(presentation), Some(data)) =
        (layers.iter().find(|l| l.name == "Presentation"), layers.iter().find(|l| l.name == "Data"))
    {
        let presentation_members: std::collections::HashSet<&str> =
            presentation.components.iter().map(|s| s.as_str()).collect();
        let data_members: std::collections::HashSet<&str> = data.components.iter().map(|s| s.as_str()).collect();
        for edge in static_edges {
            if presentation_members.contains(edge.origin.as_str()) && data_members.contains(edge.target.as_str()) {
                violations.push(ArchitecturalViolation {
                    kind: ViolationKind::LayerViolation,
                    location: edge.target.clone(),
                    severity: Severity::High,
                    description: format!("{} (Presentation) depends on {} (Data) directly", edge.origin, edge.target),
                });
            }
        }
    }

    for component in components {
        if component.classes.len() > 20 {
            violations.push(ArchitecturalViolation {
                kind: ViolationKind::GodClass,
                location: component.name.clone(),
                severity: Severity::Medium,
                description: format!("component {} has {} classes", component.name, component.classes.len()),
            });
        }
        if component.component_type == ComponentType::BusinessLogic && component.classes.len() < 3 {
            violations.push(ArchitecturalViolation {
                kind: ViolationKind::FeatureEnvy,
                location: component.name.clone(),
                severity: Severity::Low,
                description: format!("business-logic component {} has only {} classes", component.name, component.classes.len()),
            });
        }
        if component.component_type == ComponentType::DataAccess
            && !component.classes.is_empty()
            && component.classes.iter().all(|c| {
                let short = c.rsplit('.').next().unwrap_or(c);
                short.contains("Model") || short.contains("Entity")
            })
        {
            violations.push(ArchitecturalViolation {
                kind: ViolationKind::DataClass,
                location: component.name.clone(),
                severity: Severity::Low,
                description: format!("data-access component {} contains only anemic Model/Entity classes", component.name),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_god_class_component() {
        let classes: Vec<String> = (0..21).map(|i| format!("App.Data.C{i}")).collect();
        let components = vec![Component {
            name: "App.Data".to_string(),
            component_type: ComponentType::DataAccess,
            classes,
            interfaces: Vec::new(),
        }];
        let violations = detect(&[], &components, &[]);
        assert!(violations.iter().any(|v| v.kind == ViolationKind::GodClass));
    }
}
