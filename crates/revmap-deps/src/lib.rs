//! revmap-deps — static, dynamic, external, and database dependency
//! resolution plus cycle detection.

pub mod database;
pub mod external;
pub mod graph_builder;
pub mod options;
pub mod static_edges;

use revmap_core::{
    CancellationToken, CircularDependency, DatabaseDependency, DepGraphEdge, DepGraphNode, Dependency,
    ExternalDependency, FileRecord, Graph, Outcome, PipelineError, Progress, ProgressReporter, Symbol,
};

pub use options::DependencyOptions;

/// Everything the resolver produces for one codebase pass.
#[derive(Debug, Clone)]
pub struct DependencyAnalysis {
    pub static_edges: Vec<Dependency>,
    pub dynamic_edges: Vec<Dependency>,
    pub external_packages: Vec<ExternalDependency>,
    pub database_refs: Vec<DatabaseDependency>,
    pub graph: Graph<DepGraphNode, DepGraphEdge>,
    pub cycles: Vec<CircularDependency>,
}

fn is_manifest(file: &FileRecord) -> bool {
    matches!(file.extension.as_str(), "csproj" | "config") || file.name.eq_ignore_ascii_case("packages.config")
}

fn is_sql(file: &FileRecord) -> bool {
    file.extension == "sql"
}

fn is_configuration(file: &FileRecord) -> bool {
    matches!(file.classification, revmap_core::FileClassification::Configuration)
}

/// Resolves every dependency kind named here and wires the
/// result into a dependency graph with cycle detection.
pub fn resolve(
    symbols: &[Symbol],
    all_files: &[FileRecord],
    options: &DependencyOptions,
    cancel: &CancellationToken,
    reporter: &ProgressReporter,
) -> Result<Outcome<DependencyAnalysis>, PipelineError> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "dependencies" });
    }

    let mut diagnostics = Vec::new();
    let mut progress = Progress::new("dependencies");

    let static_edges = if options.resolve_static { static_edges::build(symbols) } else { Vec::new() };
    progress.files_seen += 1;
    reporter(&progress);

    let dynamic_edges = if options.resolve_dynamic { static_edges::build_dynamic(symbols) } else { Vec::new() };

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "dependencies" });
    }

    let external_packages = if options.resolve_external {
        let manifest_files: Vec<FileRecord> = all_files.iter().filter(|f| is_manifest(f)).cloned().collect();
        let mut packages = external::from_namespaces(symbols);
        packages.extend(external::from_manifests(&manifest_files, &mut diagnostics));
        packages
    } else {
        Vec::new()
    };

    let database_refs = if options.resolve_database {
        let config_files: Vec<FileRecord> = all_files.iter().filter(|f| is_configuration(f)).cloned().collect();
        let sql_files: Vec<FileRecord> = all_files.iter().filter(|f| is_sql(f)).cloned().collect();
        let mut refs = database::from_connection_strings(&config_files);
        let tables = database::from_sql_files(&sql_files);
        if !tables.is_empty() {
            if let Some(first) = refs.first_mut() {
                first.tables = tables;
            } else {
                refs.push(DatabaseDependency { database_name: "Unknown".to_string(), tables, ..Default::default() });
            }
        }
        refs
    } else {
        Vec::new()
    };

    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled { stage: "dependencies" });
    }

    let graph = graph_builder::build(&static_edges, &dynamic_edges);

    let cycles = if options.detect_cycles {
        revmap_core::find_cycles(&graph, cancel)?
            .into_iter()
            .map(|node_ids| CircularDependency {
                cycle: node_ids.into_iter().filter_map(|id| graph.node(id).map(|n| n.fqn.clone())).collect(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let analysis = DependencyAnalysis { static_edges, dynamic_edges, external_packages, database_refs, graph, cycles };
    Ok(Outcome::with_diagnostics(analysis, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::{silent_reporter, FileClassification, SymbolKind, Visibility};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn symbol(name: &str, fqn: &str, kind: SymbolKind, namespace: &str, base_types: Option<&str>) -> Symbol {
        let mut metadata = HashMap::new();
        metadata.insert("Namespace".to_string(), namespace.to_string());
        if let Some(bt) = base_types {
            metadata.insert("BaseTypes".to_string(), bt.to_string());
        }
        Symbol {
            name: name.to_string(),
            fqn: fqn.to_string(),
            kind,
            file_path: PathBuf::from("a.cs"),
            line: 1,
            visibility: Visibility::Public,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            parameters: Vec::new(),
            metadata,
        }
    }

    fn file_record(name: &str, extension: &str, classification: FileClassification) -> FileRecord {
        FileRecord {
            absolute_path: PathBuf::from(name),
            relative_path: PathBuf::from(name),
            name: name.to_string(),
            extension: extension.to_string(),
            size_bytes: 0,
            created: chrono::Utc::now(),
            modified: chrono::Utc::now(),
            classification,
            encoding: None,
            line_count: None,
            content_hash: None,
        }
    }

    #[test]
    fn resolves_static_and_builds_a_graph_with_no_cycles() {
        let symbols = vec![
            symbol("Derived", "N.Derived", SymbolKind::Class, "N", Some("Base")),
            symbol("Base", "N.Base", SymbolKind::Class, "N", None),
        ];
        let files: Vec<FileRecord> = Vec::new();
        let options = DependencyOptions::default();
        let cancel = CancellationToken::new();
        let reporter = silent_reporter();
        let outcome = resolve(&symbols, &files, &options, &cancel, &reporter).unwrap();
        assert!(outcome.value.static_edges.iter().any(|e| e.target == "Base"));
        assert!(outcome.value.cycles.is_empty());
    }

    #[test]
    fn detects_a_two_class_inheritance_cycle() {
        let symbols = vec![
            symbol("A", "N.A", SymbolKind::Class, "N", Some("N.B")),
            symbol("B", "N.B", SymbolKind::Class, "N", Some("N.A")),
        ];
        let files: Vec<FileRecord> = Vec::new();
        let options = DependencyOptions::default();
        let cancel = CancellationToken::new();
        let reporter = silent_reporter();
        let outcome = resolve(&symbols, &files, &options, &cancel, &reporter).unwrap();
        assert_eq!(outcome.value.cycles.len(), 1);
    }
}
