//! Architectural-pattern scoring.

use std::collections::HashSet;

use revmap_core::{ArchitecturalPattern, Symbol, SymbolKind};

struct PatternSpec {
    pattern: ArchitecturalPattern,
    indicators: &'static [&'static str],
}

const CANDIDATES: &[PatternSpec] = &[
    PatternSpec { pattern: ArchitecturalPattern::Mvc, indicators: &["Controller", "View", "Model"] },
    PatternSpec { pattern: ArchitecturalPattern::Mvp, indicators: &["Presenter", "View", "Model"] },
    PatternSpec { pattern: ArchitecturalPattern::MvvM, indicators: &["ViewModel", "View", "Model"] },
    PatternSpec { pattern: ArchitecturalPattern::Layered, indicators: &["Layer", "Service", "Repository", "Controller"] },
    PatternSpec { pattern: ArchitecturalPattern::Repository, indicators: &["Repository", "Dao"] },
    PatternSpec { pattern: ArchitecturalPattern::ServiceOriented, indicators: &["Service", "Client", "Proxy"] },
];

fn count_hits(haystack: &str, indicators: &[&str]) -> usize {
    indicators.iter().filter(|ind| haystack.contains(*ind)).count()
}

/// Highest-scoring architectural pattern, `Unknown` if the best score is
/// `<= 10`.
pub fn detect(classes: &[&Symbol], all_symbols: &[Symbol]) -> ArchitecturalPattern {
    if classes.is_empty() {
        return ArchitecturalPattern::Unknown;
    }
    let namespaces: HashSet<String> = classes.iter().map(|c| c.namespace()).collect();
    let class_count = classes.len() as f64;

    let mut best = (ArchitecturalPattern::Unknown, 0.0_f64);
    for spec in CANDIDATES {
        let name_hits: usize = classes.iter().map(|c| count_hits(&c.name, spec.indicators)).sum();
        let namespace_hits: usize = namespaces.iter().map(|ns| count_hits(ns, spec.indicators)).sum();
        let mut score = (name_hits as f64 * 2.0 + namespace_hits as f64) / class_count * 100.0;

        if matches!(spec.pattern, ArchitecturalPattern::Mvc) {
            let has_controller_with_public_method = classes.iter().any(|c| {
                c.name.contains("Controller")
                    && all_symbols.iter().any(|m| {
                        m.kind == SymbolKind::Method
                            && m.fqn.starts_with(&format!("{}.", c.fqn))
                            && m.visibility == revmap_core::Visibility::Public
                    })
            });
            if has_controller_with_public_method {
                score += 20.0;
            }
        }

        if matches!(spec.pattern, ArchitecturalPattern::Repository) {
            const CRUD_WORDS: &[&str] = &["create", "read", "update", "delete", "get", "add", "remove"];
            let has_crud_repository = classes.iter().any(|c| {
                c.name.contains("Repository")
                    && all_symbols.iter().any(|m| {
                        m.kind == SymbolKind::Method
                            && m.fqn.starts_with(&format!("{}.", c.fqn))
                            && CRUD_WORDS.iter().any(|w| m.name.to_lowercase().contains(w))
                    })
            });
            if has_crud_repository {
                score += 25.0;
            }
        }

        if score > best.1 {
            best = (spec.pattern, score);
        }
    }

    if best.1 <= 10.0 {
        ArchitecturalPattern::Unknown
    } else {
        best.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn class(name: &str, namespace: &str) -> Symbol {
        let mut metadata = HashMap::new();
        metadata.insert("Namespace".to_string(), namespace.to_string());
        Symbol {
            name: name.to_string(),
            fqn: format!("{namespace}.{name}"),
            kind: SymbolKind::Class,
            file_path: PathBuf::from("a.cs"),
            line: 1,
            visibility: revmap_core::Visibility::Public,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            parameters: Vec::new(),
            metadata,
        }
    }

    #[test]
    fn detects_mvc_when_controller_view_model_present() {
        let classes = vec![
            class("OrderController", "App.Web"),
            class("OrderView", "App.Web"),
            class("OrderModel", "App.Web"),
        ];
        let refs: Vec<&Symbol> = classes.iter().collect();
        let detected = detect(&refs, &classes);
        assert_eq!(detected, ArchitecturalPattern::Mvc);
    }

    #[test]
    fn unknown_when_no_indicators_match() {
        let classes = vec![class("Helper", "App.Util")];
        let refs: Vec<&Symbol> = classes.iter().collect();
        assert_eq!(detect(&refs, &classes), ArchitecturalPattern::Unknown);
    }
}
