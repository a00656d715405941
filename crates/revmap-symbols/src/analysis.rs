//! Aggregated extraction output: the flat symbol list plus per-language
//! sub-results, counts, a namespace index, and the optional heuristic
//! quality scalars.

use std::collections::HashMap;

use revmap_core::{Symbol, SymbolKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageResult {
    pub language: String,
    pub file_count: u64,
    pub symbols: Vec<Symbol>,
    pub total_lines: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AggregateCounts {
    pub classes: u64,
    pub methods: u64,
    pub properties: u64,
    pub interfaces: u64,
    pub lines_of_code: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QualityMetrics {
    pub cyclomatic_complexity: f64,
    pub maintainability: f64,
    pub readability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CodeAnalysis {
    pub symbols: Vec<Symbol>,
    pub languages: Vec<LanguageResult>,
    pub counts: AggregateCounts,
    /// Maps a namespace to every symbol FQN declared directly in it.
    pub namespace_index: HashMap<String, Vec<String>>,
    pub metrics: Option<QualityMetrics>,
}

impl CodeAnalysis {
    pub fn build(languages: Vec<LanguageResult>, compute_metrics: bool) -> Self {
        let mut symbols = Vec::new();
        let mut counts = AggregateCounts::default();
        for language in &languages {
            counts.lines_of_code += language.total_lines;
            for symbol in &language.symbols {
                match symbol.kind {
                    SymbolKind::Class => counts.classes += 1,
                    SymbolKind::Method => counts.methods += 1,
                    SymbolKind::Property => counts.properties += 1,
                    SymbolKind::Interface => counts.interfaces += 1,
                    _ => {}
                }
            }
            symbols.extend(language.symbols.iter().cloned());
        }

        let namespace_index = build_namespace_index(&symbols);
        let metrics = compute_metrics.then(|| compute_quality_metrics(&symbols, counts.methods));

        CodeAnalysis { symbols, languages, counts, namespace_index, metrics }
    }
}

fn build_namespace_index(symbols: &[Symbol]) -> HashMap<String, Vec<String>> {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    for symbol in symbols {
        let namespace = symbol.namespace();
        if namespace.is_empty() || namespace == "Default" {
            continue;
        }
        index.entry(namespace).or_default().push(symbol.fqn.clone());
    }
    index
}

/// The three heuristic scalars from the extraction contract. Design-level
/// heuristics, not true metrics — callers should treat them as monotone
/// signals, not absolute measurements.
fn compute_quality_metrics(symbols: &[Symbol], method_count: u64) -> QualityMetrics {
    let cyclomatic_complexity = (1.0 + 0.1 * method_count as f64).min(10.0);
    let maintainability = (100.0 - 2.0 * cyclomatic_complexity).max(0.0);
    let total_symbols = symbols.len().max(1);
    let long_named = symbols.iter().filter(|s| s.name.len() > 3).count();
    let readability = 100.0 * long_named as f64 / total_symbols as f64;

    QualityMetrics { cyclomatic_complexity, maintainability, readability }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::Visibility;
    use std::path::PathBuf;

    fn symbol(name: &str, kind: SymbolKind, namespace: &str) -> Symbol {
        let mut metadata = HashMap::new();
        metadata.insert("Namespace".to_string(), namespace.to_string());
        Symbol {
            name: name.to_string(),
            fqn: format!("{namespace}.{name}"),
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

    #[test]
    fn aggregate_counts_tally_by_kind() {
        let language = LanguageResult {
            language: "csharp".to_string(),
            file_count: 1,
            symbols: vec![
                symbol("Customer", SymbolKind::Class, "App"),
                symbol("Save", SymbolKind::Method, "App"),
                symbol("Name", SymbolKind::Property, "App"),
            ],
            total_lines: 42,
        };
        let analysis = CodeAnalysis::build(vec![language], false);
        assert_eq!(analysis.counts.classes, 1);
        assert_eq!(analysis.counts.methods, 1);
        assert_eq!(analysis.counts.properties, 1);
        assert_eq!(analysis.counts.lines_of_code, 42);
        assert!(analysis.metrics.is_none());
    }

    #[test]
    fn complexity_is_capped_at_ten() {
        let many_methods: Vec<Symbol> =
            (0..200).map(|i| symbol(&format!("M{i}"), SymbolKind::Method, "App")).collect();
        let language =
            LanguageResult { language: "csharp".to_string(), file_count: 1, symbols: many_methods, total_lines: 1 };
        let analysis = CodeAnalysis::build(vec![language], true);
        let metrics = analysis.metrics.unwrap();
        assert_eq!(metrics.cyclomatic_complexity, 10.0);
        assert_eq!(metrics.maintainability, 80.0);
    }

    #[test]
    fn namespace_index_groups_by_namespace() {
        let language = LanguageResult {
            language: "csharp".to_string(),
            file_count: 1,
            symbols: vec![symbol("Customer", SymbolKind::Class, "App.Models")],
            total_lines: 1,
        };
        let analysis = CodeAnalysis::build(vec![language], false);
        assert_eq!(analysis.namespace_index.get("App.Models").unwrap(), &vec!["App.Models.Customer".to_string()]);
    }
}
