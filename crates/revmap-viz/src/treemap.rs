//! Treemap hierarchy: root -> component -> class-count value.

use serde::Serialize;

use revmap_core::Component;

#[derive(Debug, Clone, Serialize)]
pub struct TreemapNode {
    pub name: String,
    pub value: Option<usize>,
    pub children: Vec<TreemapNode>,
}

pub fn build(components: &[Component]) -> TreemapNode {
    let children = components
        .iter()
        .map(|c| TreemapNode { name: c.name.clone(), value: Some(c.classes.len()), children: Vec::new() })
        .collect();
    TreemapNode { name: "root".to_string(), value: None, children }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::ComponentType;

    #[test]
    fn builds_one_child_per_component() {
        let components = vec![Component {
            name: "App.Data".to_string(),
            component_type: ComponentType::DataAccess,
            classes: vec!["a".to_string(), "b".to_string()],
            interfaces: vec![],
        }];
        let tree = build(&components);
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].value, Some(2));
    }
}
