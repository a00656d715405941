//! Flowchart-dialect diagram sources.

use std::collections::HashMap;

use revmap_core::{
    CallHierarchyNode, Component, Dependency, InheritanceNode, Layer,
};

use crate::sanitize::sanitize_id;

pub fn component_diagram(components: &[Component]) -> String {
    let mut sorted: Vec<&Component> = components.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut out = String::from("graph TD\n");
    for component in &sorted {
        let id = sanitize_id(&component.name);
        out.push_str(&format!("  {id}[\"{} ({:?})\"]\n", component.name, component.component_type));
    }
    for pair in sorted.windows(2) {
        let a = sanitize_id(&pair[0].name);
        let b = sanitize_id(&pair[1].name);
        out.push_str(&format!("  {a} --> {b}\n"));
    }
    out
}

pub fn layer_diagram(layers: &[Layer]) -> String {
    let mut sorted: Vec<&Layer> = layers.iter().collect();
    sorted.sort_by_key(|l| l.level);

    let mut out = String::from("graph TD\n");
    for layer in &sorted {
        let id = sanitize_id(&layer.name);
        out.push_str(&format!("  {id}[\"{} (L{}, {} members)\"]\n", layer.name, layer.level, layer.components.len()));
    }
    for pair in sorted.windows(2) {
        let a = sanitize_id(&pair[0].name);
        let b = sanitize_id(&pair[1].name);
        out.push_str(&format!("  {a} --> {b}\n"));
    }
    out
}

pub fn dependency_diagram(static_edges: &[Dependency]) -> String {
    let mut counts: HashMap<(String, String), u32> = HashMap::new();
    for edge in static_edges {
        *counts.entry((edge.origin.clone(), edge.target.clone())).or_insert(0) += 1;
    }
    let mut pairs: Vec<((String, String), u32)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs.truncate(20);

    let mut out = String::from("graph LR\n");
    for ((from, to), count) in pairs {
        let a = sanitize_id(&from);
        let b = sanitize_id(&to);
        if count > 1 {
            out.push_str(&format!("  {a} -->|{count}| {b}\n"));
        } else {
            out.push_str(&format!("  {a} --> {b}\n"));
        }
    }
    out
}

pub fn call_hierarchy_diagram(nodes: &[CallHierarchyNode]) -> String {
    let mut sorted: Vec<&CallHierarchyNode> = nodes.iter().collect();
    sorted.sort_by(|a, b| b.callees.len().cmp(&a.callees.len()));
    sorted.truncate(15);

    let mut out = String::from("graph TD\n");
    for node in &sorted {
        let a = sanitize_id(&node.method_fqn);
        for callee in node.callees.iter().take(3) {
            let b = sanitize_id(callee);
            out.push_str(&format!("  {a} --> {b}\n"));
        }
    }
    out
}

pub fn inheritance_diagram(nodes: &[InheritanceNode]) -> String {
    let mut participants: Vec<&InheritanceNode> = nodes.iter().filter(|n| !n.bases.is_empty()).collect();
    participants.truncate(10);

    let mut out = String::from("graph TD\n");
    for node in &participants {
        let a = sanitize_id(&node.class_fqn);
        for base in &node.bases {
            let b = sanitize_id(base);
            out.push_str(&format!("  {b} <|-- {a}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::ComponentType;

    #[test]
    fn component_diagram_declares_each_node() {
        let components = vec![Component {
            name: "App.Web".to_string(),
            component_type: ComponentType::UserInterface,
            classes: vec![],
            interfaces: vec![],
        }];
        let diagram = component_diagram(&components);
        assert!(diagram.starts_with("graph TD"));
        assert!(diagram.contains("App_Web"));
    }
}
