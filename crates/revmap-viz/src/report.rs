//! HTML summary report.

use revmap_core::{Component, Layer};

pub fn build(
    total_symbols: usize,
    total_dependencies: usize,
    components: &[Component],
    layers: &[Layer],
) -> String {
    let mut component_rows = String::new();
    for component in components {
        component_rows.push_str(&format!(
            "<tr><td>{}</td><td>{:?}</td><td>{}</td></tr>\n",
            component.name,
            component.component_type,
            component.classes.len(),
        ));
    }

    let mut layer_rows = String::new();
    let mut sorted_layers: Vec<&Layer> = layers.iter().collect();
    sorted_layers.sort_by_key(|l| l.level);
    for layer in &sorted_layers {
        layer_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            layer.name,
            layer.level,
            layer.components.len(),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8" /><title>Architecture Summary</title></head>
<body>
  <h1>Architecture Summary</h1>
  <p>Symbols: {total_symbols} &middot; Dependencies: {total_dependencies}</p>
  <h2>Components</h2>
  <table><thead><tr><th>Name</th><th>Type</th><th>ClassCount</th></tr></thead>
  <tbody>
{component_rows}  </tbody></table>
  <h2>Layers</h2>
  <table><thead><tr><th>Name</th><th>Level</th><th>Components</th></tr></thead>
  <tbody>
{layer_rows}  </tbody></table>
</body>
</html>
"#
    )
}
