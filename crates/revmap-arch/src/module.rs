//! Module grouping: assembly/namespace grouping when the
//! symbol metadata carries one, otherwise a single catch-all "Main".

use std::collections::HashMap;

use revmap_core::{Component, Module, Symbol};

fn assembly_for(component_name: &str, symbols: &[Symbol]) -> Option<String> {
    symbols
        .iter()
        .find(|s| s.namespace() == component_name)
        .and_then(|s| s.metadata.get("Assembly").cloned())
}

pub fn group(components: &[Component], symbols: &[Symbol]) -> Vec<Module> {
    if components.is_empty() {
        return Vec::new();
    }

    let mut by_assembly: HashMap<String, Vec<String>> = HashMap::new();
    let mut any_assembly_found = false;
    for component in components {
        if let Some(assembly) = assembly_for(&component.name, symbols) {
            any_assembly_found = true;
            by_assembly.entry(assembly).or_default().push(component.name.clone());
        }
    }

    if !any_assembly_found {
        return vec![Module {
            name: "Main".to_string(),
            components: components.iter().map(|c| c.name.clone()).collect(),
        }];
    }

    let assigned: std::collections::HashSet<&str> =
        by_assembly.values().flatten().map(|s| s.as_str()).collect();
    let unassigned: Vec<String> =
        components.iter().filter(|c| !assigned.contains(c.name.as_str())).map(|c| c.name.clone()).collect();
    let mut modules: Vec<Module> =
        by_assembly.into_iter().map(|(name, components)| Module { name, components }).collect();
    if !unassigned.is_empty() {
        modules.push(Module { name: "Main".to_string(), components: unassigned });
    }
    modules.sort_by(|a, b| a.name.cmp(&b.name));
    modules
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::ComponentType;

    #[test]
    fn falls_back_to_single_main_module_without_assembly_metadata() {
        let components = vec![Component {
            name: "App.Data".to_string(),
            component_type: ComponentType::DataAccess,
            classes: Vec::new(),
            interfaces: Vec::new(),
        }];
        let modules = group(&components, &[]);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "Main");
    }
}
