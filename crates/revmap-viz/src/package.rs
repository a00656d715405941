//! VisualizationPackage assembly and disk layout.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::sanitize::sanitize_title;

#[derive(Debug, Clone)]
pub struct MermaidDiagram {
    pub title: String,
    pub source: String,
}

#[derive(Debug, Clone)]
pub struct HtmlArtifact {
    pub title: String,
    pub html: String,
    pub data_json: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackageMetadata {
    pub generated_at: DateTime<Utc>,
    pub total_components: usize,
    pub total_relationships: usize,
    pub toolchain: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VisualizationPackage {
    pub mermaid_diagrams: Vec<MermaidDiagram>,
    pub d3_force_graph: Option<HtmlArtifact>,
    pub cytoscape_network_graph: Option<HtmlArtifact>,
    pub treemap_json: Option<String>,
    pub components_csv: Option<String>,
    pub dependencies_csv: Option<String>,
    pub relationship_matrix_json: Option<String>,
    pub summary_report_html: Option<String>,
    pub metadata: Option<PackageMetadata>,
}

fn index_page(pkg: &VisualizationPackage) -> String {
    let mut links = String::new();
    for diagram in &pkg.mermaid_diagrams {
        links.push_str(&format!(
            "<li><a href=\"mermaid/{title}.mmd\">{title} (mermaid)</a></li>\n",
            title = sanitize_title(&diagram.title)
        ));
    }
    if let Some(artifact) = &pkg.d3_force_graph {
        links.push_str(&format!(
            "<li><a href=\"d3/{title}.html\">{title} (force-directed)</a></li>\n",
            title = sanitize_title(&artifact.title)
        ));
    }
    if let Some(artifact) = &pkg.cytoscape_network_graph {
        links.push_str(&format!(
            "<li><a href=\"cytoscape/{title}.html\">{title} (network)</a></li>\n",
            title = sanitize_title(&artifact.title)
        ));
    }
    if pkg.summary_report_html.is_some() {
        links.push_str("<li><a href=\"reports/summary.html\">Summary report</a></li>\n");
    }
    if pkg.components_csv.is_some() {
        links.push_str("<li><a href=\"data/components.csv\">components.csv</a></li>\n");
    }
    if pkg.dependencies_csv.is_some() {
        links.push_str("<li><a href=\"data/dependencies.csv\">dependencies.csv</a></li>\n");
    }
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\" /><title>Visualization index</title></head>\n<body>\n<h1>Generated artifacts</h1>\n<ul>\n{links}</ul>\n</body></html>\n"
    )
}

/// Writes the package using its fixed on-disk directory layout. Creates
/// every subdirectory it needs.
pub fn write_package(pkg: &VisualizationPackage, root: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(root)?;

    if !pkg.mermaid_diagrams.is_empty() {
        let dir = root.join("mermaid");
        std::fs::create_dir_all(&dir)?;
        for diagram in &pkg.mermaid_diagrams {
            std::fs::write(dir.join(format!("{}.mmd", sanitize_title(&diagram.title))), &diagram.source)?;
        }
    }

    if let Some(artifact) = &pkg.d3_force_graph {
        let dir = root.join("d3");
        std::fs::create_dir_all(&dir)?;
        let title = sanitize_title(&artifact.title);
        std::fs::write(dir.join(format!("{title}.html")), &artifact.html)?;
        std::fs::write(dir.join(format!("{title}_data.json")), &artifact.data_json)?;
    }

    if let Some(artifact) = &pkg.cytoscape_network_graph {
        let dir = root.join("cytoscape");
        std::fs::create_dir_all(&dir)?;
        let title = sanitize_title(&artifact.title);
        std::fs::write(dir.join(format!("{title}.html")), &artifact.html)?;
        std::fs::write(dir.join(format!("{title}_data.json")), &artifact.data_json)?;
    }

    let has_data = pkg.treemap_json.is_some()
        || pkg.components_csv.is_some()
        || pkg.dependencies_csv.is_some()
        || pkg.relationship_matrix_json.is_some();
    if has_data {
        let dir = root.join("data");
        std::fs::create_dir_all(&dir)?;
        if let Some(json) = &pkg.treemap_json {
            std::fs::write(dir.join("treemap.json"), json)?;
        }
        if let Some(csv) = &pkg.components_csv {
            std::fs::write(dir.join("components.csv"), csv)?;
        }
        if let Some(csv) = &pkg.dependencies_csv {
            std::fs::write(dir.join("dependencies.csv"), csv)?;
        }
        if let Some(json) = &pkg.relationship_matrix_json {
            std::fs::write(dir.join("relationship-matrix.json"), json)?;
        }
    }

    if let Some(html) = &pkg.summary_report_html {
        let dir = root.join("reports");
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("summary.html"), html)?;
    }

    if let Some(metadata) = &pkg.metadata {
        let json = serde_json::to_string_pretty(metadata).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(root.join("visualization-metadata.json"), json)?;
    }

    std::fs::write(root.join("index.html"), index_page(pkg))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_the_documented_directory_layout() {
        let pkg = VisualizationPackage {
            mermaid_diagrams: vec![MermaidDiagram { title: "Components".to_string(), source: "graph TD".to_string() }],
            summary_report_html: Some("<html></html>".to_string()),
            metadata: Some(PackageMetadata {
                generated_at: "2026-01-01T00:00:00Z".parse().unwrap(),
                total_components: 1,
                total_relationships: 1,
                toolchain: vec!["revmap".to_string()],
            }),
            ..Default::default()
        };
        let dir = tempdir().unwrap();
        write_package(&pkg, dir.path()).unwrap();
        assert!(dir.path().join("mermaid/Components.mmd").exists());
        assert!(dir.path().join("reports/summary.html").exists());
        assert!(dir.path().join("visualization-metadata.json").exists());
        assert!(dir.path().join("index.html").exists());
    }
}
