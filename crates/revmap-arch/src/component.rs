//! Component inference: one component per non-singleton
//! namespace group, plus cross-cutting synthetic components.

use std::collections::HashMap;

use revmap_core::{Component, ComponentType, Symbol, SymbolKind};

fn classify_by_namespace(namespace: &str) -> Option<ComponentType> {
    let lower = namespace.to_lowercase();
    if ["ui", "view", "form"].iter().any(|w| lower.contains(w)) {
        Some(ComponentType::UserInterface)
    } else if ["business", "logic", "service"].iter().any(|w| lower.contains(w)) {
        Some(ComponentType::BusinessLogic)
    } else if ["data", "repository", "entity"].iter().any(|w| lower.contains(w)) {
        Some(ComponentType::DataAccess)
    } else if ["utility", "helper", "common"].iter().any(|w| lower.contains(w)) {
        Some(ComponentType::Utility)
    } else if lower.contains("infrastructure") {
        Some(ComponentType::Infrastructure)
    } else {
        None
    }
}

fn classify_by_member_names(classes: &[&Symbol]) -> ComponentType {
    let service_or_manager = classes.iter().any(|c| c.name.ends_with("Service") || c.name.ends_with("Manager"));
    if service_or_manager {
        return ComponentType::Service;
    }
    let model_or_entity = classes.iter().any(|c| c.name.ends_with("Model") || c.name.ends_with("Entity"));
    if model_or_entity {
        return ComponentType::DataAccess;
    }
    ComponentType::Unknown
}

/// Groups classes/interfaces by namespace; singleton groups are skipped.
/// Also emits "Logging" and "Validation" cross-cutting components when
/// matching class names are present anywhere in the codebase.
pub fn infer(classes: &[&Symbol], interfaces: &[&Symbol]) -> Vec<Component> {
    let mut by_namespace: HashMap<String, Vec<&Symbol>> = HashMap::new();
    for class in classes {
        by_namespace.entry(class.namespace()).or_default().push(class);
    }

    let mut components = Vec::new();
    for (namespace, members) in &by_namespace {
        if members.len() < 2 {
            continue;
        }
        let component_type = classify_by_namespace(namespace).unwrap_or_else(|| classify_by_member_names(members));
        let member_interfaces: Vec<String> =
            interfaces.iter().filter(|i| i.namespace() == *namespace).map(|i| i.fqn.clone()).collect();
        components.push(Component {
            name: namespace.clone(),
            component_type,
            classes: members.iter().map(|c| c.fqn.clone()).collect(),
            interfaces: member_interfaces,
        });
    }

    let logging: Vec<String> =
        classes.iter().filter(|c| c.name.contains("Log") || c.name.contains("Audit")).map(|c| c.fqn.clone()).collect();
    if !logging.is_empty() {
        components.push(Component {
            name: "Logging".to_string(),
            component_type: ComponentType::Infrastructure,
            classes: logging,
            interfaces: Vec::new(),
        });
    }

    let validation: Vec<String> =
        classes.iter().filter(|c| c.name.contains("Valid") || c.name.contains("Rule")).map(|c| c.fqn.clone()).collect();
    if !validation.is_empty() {
        components.push(Component {
            name: "Validation".to_string(),
            component_type: ComponentType::BusinessLogic,
            classes: validation,
            interfaces: Vec::new(),
        });
    }

    components
}

pub fn component_for_fqn<'a>(components: &'a [Component], fqn: &str) -> Option<&'a Component> {
    components.iter().find(|c| c.classes.iter().any(|cls| cls == fqn))
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
    fn groups_by_namespace_and_classifies_data_access() {
        let classes = vec![class("Customer", "App.Data"), class("Order", "App.Data")];
        let refs: Vec<&Symbol> = classes.iter().collect();
        let components = infer(&refs, &[]);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].component_type, ComponentType::DataAccess);
    }

    #[test]
    fn singleton_namespace_is_skipped() {
        let classes = vec![class("Lonely", "App.Orphan")];
        let refs: Vec<&Symbol> = classes.iter().collect();
        assert!(infer(&refs, &[]).is_empty());
    }
}
