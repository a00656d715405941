//! Interactive force-directed graph: an HTML page plus its companion JSON
//! data blob.

use serde::Serialize;

use revmap_core::Component;
use revmap_relate::matrix::ComponentRelationship;

use crate::assets::force_graph_script;

#[derive(Debug, Clone, Serialize)]
pub struct ForceGraphNode {
    pub id: String,
    pub label: String,
    pub size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForceGraphLink {
    pub source: String,
    pub target: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForceGraphData {
    pub nodes: Vec<ForceGraphNode>,
    pub links: Vec<ForceGraphLink>,
}

pub fn build_data(components: &[Component], component_relationships: &[ComponentRelationship]) -> ForceGraphData {
    let nodes = components
        .iter()
        .map(|c| ForceGraphNode { id: c.name.clone(), label: c.name.clone(), size: c.classes.len() })
        .collect();

    let mut sorted: Vec<&ComponentRelationship> = component_relationships.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    let links = sorted
        .into_iter()
        .take(50)
        .map(|r| ForceGraphLink { source: r.source.clone(), target: r.target.clone(), value: r.count })
        .collect();

    ForceGraphData { nodes, links }
}

pub fn build_html(title: &str, data: &ForceGraphData) -> (String, String) {
    let json = serde_json::to_string(data).unwrap_or_else(|_| "{}".to_string());
    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <script src="https://d3js.org/d3.v7.min.js"></script>
  <style>svg {{ width: 100%; height: 100vh; }}</style>
</head>
<body>
  <svg id="graph"></svg>
  <script>window.__GRAPH_DATA__ = {json};</script>
  <script>{script}</script>
</body>
</html>
"#,
        title = title,
        json = json,
        script = force_graph_script(),
    );
    (html, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::ComponentType;

    #[test]
    fn builds_data_capped_at_fifty_links() {
        let components = vec![Component { name: "A".to_string(), component_type: ComponentType::Unknown, classes: vec!["a".to_string()], interfaces: vec![] }];
        let relationships: Vec<ComponentRelationship> = (0..60)
            .map(|i| ComponentRelationship { source: "A".to_string(), target: format!("T{i}"), count: i as u32, kinds: vec![], strength: 0.5 })
            .collect();
        let data = build_data(&components, &relationships);
        assert_eq!(data.links.len(), 50);
    }
}
