//! Data exports: components/dependencies CSV and a
//! relationship-matrix JSON blob.

use revmap_core::{Component, Dependency, RelationshipMatrix};

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn components_csv(components: &[Component]) -> String {
    let mut out = String::from("Name,Type,ClassCount,Interfaces\n");
    for component in components {
        out.push_str(&format!(
            "{},{:?},{},{}\n",
            csv_escape(&component.name),
            component.component_type,
            component.classes.len(),
            csv_escape(&component.interfaces.join(";")),
        ));
    }
    out
}

/// Capped at 1000 rows.
pub fn dependencies_csv(static_edges: &[Dependency]) -> String {
    let mut out = String::from("From,To,Type,SourceFile\n");
    for edge in static_edges.iter().take(1000) {
        out.push_str(&format!(
            "{},{},{:?},{}\n",
            csv_escape(&edge.origin),
            csv_escape(&edge.target),
            edge.kind,
            csv_escape(&edge.source_file.display().to_string()),
        ));
    }
    out
}

pub fn relationship_matrix_json(matrix: &RelationshipMatrix) -> String {
    #[derive(serde::Serialize)]
    struct MatrixDto<'a> {
        relationships: &'a [revmap_core::Relationship],
        sources: &'a [String],
        targets: &'a [String],
        kinds: Vec<String>,
    }
    let dto = MatrixDto {
        relationships: &matrix.relationships,
        sources: &matrix.sources,
        targets: &matrix.targets,
        kinds: matrix.kinds.iter().map(|k| format!("{k:?}")).collect(),
    };
    serde_json::to_string_pretty(&dto).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::ComponentType;

    #[test]
    fn components_csv_has_header_and_one_row_per_component() {
        let components = vec![Component {
            name: "App.Data".to_string(),
            component_type: ComponentType::DataAccess,
            classes: vec!["a".to_string()],
            interfaces: vec!["IApp".to_string()],
        }];
        let csv = components_csv(&components);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Name,Type,ClassCount,Interfaces"));
    }

    #[test]
    fn dependencies_csv_caps_at_one_thousand_rows() {
        let edges: Vec<Dependency> = (0..1500)
            .map(|i| Dependency {
                kind: revmap_core::DependencyKind::Import,
                origin: format!("o{i}"),
                target: format!("t{i}"),
                source_file: std::path::PathBuf::from("a.cs"),
                source_line: 1,
                reflective_target: None,
                conditional: false,
            })
            .collect();
        let csv = dependencies_csv(&edges);
        assert_eq!(csv.lines().count(), 1001);
    }
}
