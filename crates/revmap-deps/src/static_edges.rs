//! Static edges derived purely from containment and declared base types —
//! no call-site parsing.

use std::collections::{HashMap, HashSet};

use revmap_core::{Dependency, DependencyKind, Symbol, SymbolKind};

pub fn build(symbols: &[Symbol]) -> Vec<Dependency> {
    let mut by_file: HashMap<&std::path::Path, Vec<&Symbol>> = HashMap::new();
    for symbol in symbols {
        by_file.entry(symbol.file_path.as_path()).or_default().push(symbol);
    }

    let mut seen: HashSet<(DependencyKind, String, String)> = HashSet::new();
    let mut edges = Vec::new();
    let mut push = |edges: &mut Vec<Dependency>, dep: Dependency| {
        let key = (dep.kind, dep.origin.clone(), dep.target.clone());
        if seen.insert(key) {
            edges.push(dep);
        }
    };

    for (file, file_symbols) in &by_file {
        let namespaces: HashSet<String> =
            file_symbols.iter().map(|s| s.namespace()).filter(|ns| ns != "Default").collect();
        for namespace in namespaces {
            push(
                &mut edges,
                Dependency {
                    kind: DependencyKind::Import,
                    origin: file.display().to_string(),
                    target: namespace,
                    source_file: file.to_path_buf(),
                    source_line: 1,
                    reflective_target: None,
                    conditional: false,
                },
            );
        }

        let classes: Vec<&&Symbol> =
            file_symbols.iter().filter(|s| s.kind == SymbolKind::Class || s.kind == SymbolKind::Struct).collect();

        for class in &classes {
            for base in class.base_types() {
                push(
                    &mut edges,
                    Dependency {
                        kind: DependencyKind::Inheritance,
                        origin: class.fqn.clone(),
                        target: base,
                        source_file: file.to_path_buf(),
                        source_line: class.line,
                        reflective_target: None,
                        conditional: false,
                    },
                );
            }
        }

        for class in &classes {
            let prefix = format!("{}.", class.fqn);
            for member in file_symbols.iter() {
                if !member.fqn.starts_with(&prefix) {
                    continue;
                }
                let kind = match member.kind {
                    SymbolKind::Method => Some(DependencyKind::MethodCall),
                    SymbolKind::Property => Some(DependencyKind::PropertyAccess),
                    _ => None,
                };
                if let Some(kind) = kind {
                    push(
                        &mut edges,
                        Dependency {
                            kind,
                            origin: class.fqn.clone(),
                            target: member.fqn.clone(),
                            source_file: file.to_path_buf(),
                            source_line: member.line,
                            reflective_target: None,
                            conditional: false,
                        },
                    );
                }
            }
        }
    }

    edges
}

pub fn build_dynamic(symbols: &[Symbol]) -> Vec<Dependency> {
    symbols
        .iter()
        .filter_map(|s| {
            let target = s.metadata.get("ReflectionTarget")?;
            Some(Dependency {
                kind: DependencyKind::Other,
                origin: s.fqn.clone(),
                target: target.clone(),
                source_file: s.file_path.clone(),
                source_line: s.line,
                reflective_target: Some(target.clone()),
                conditional: true,
            })
        })
        .collect()
}
