//! Cohesion and coupling scalars. Intentionally simplified
//! proxies, not textbook LCOM/TCC/instability — they exist to flag
//! relative outliers, not to report calibrated absolute values.

use std::collections::HashMap;

use revmap_core::{Dependency, Symbol, SymbolKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct CohesionCoupling {
    pub mean_lcom: f64,
    pub mean_tcc: f64,
    pub mean_afferent: f64,
    pub mean_efferent: f64,
    pub instability: f64,
}

pub fn compute(classes: &[&Symbol], all_symbols: &[Symbol], static_edges: &[Dependency]) -> CohesionCoupling {
    let mut lcom_values = Vec::new();
    let mut tcc_values = Vec::new();

    for class in classes {
        let prefix = format!("{}.", class.fqn);
        let methods = all_symbols.iter().filter(|m| m.kind == SymbolKind::Method && m.fqn.starts_with(&prefix)).count();
        let properties =
            all_symbols.iter().filter(|m| m.kind == SymbolKind::Property && m.fqn.starts_with(&prefix)).count();
        let fields = all_symbols.iter().filter(|m| m.kind == SymbolKind::Field && m.fqn.starts_with(&prefix)).count();
        let member_count = methods + properties + fields;

        if methods > 1 {
            lcom_values.push(methods as f64 / (methods + properties) as f64);
        }
        if member_count > 0 {
            tcc_values.push(1.0 / member_count as f64);
        }
    }

    let mean = |values: &[f64]| if values.is_empty() { 0.0 } else { values.iter().sum::<f64>() / values.len() as f64 };

    let mut in_degree: HashMap<&str, u32> = HashMap::new();
    let mut out_degree: HashMap<&str, u32> = HashMap::new();
    for edge in static_edges {
        *out_degree.entry(edge.origin.as_str()).or_insert(0) += 1;
        *in_degree.entry(edge.target.as_str()).or_insert(0) += 1;
    }
    let mut nodes: std::collections::HashSet<&str> = std::collections::HashSet::new();
    nodes.extend(in_degree.keys());
    nodes.extend(out_degree.keys());

    let mean_afferent = if nodes.is_empty() {
        0.0
    } else {
        nodes.iter().map(|n| *in_degree.get(n).unwrap_or(&0) as f64).sum::<f64>() / nodes.len() as f64
    };
    let mean_efferent = if nodes.is_empty() {
        0.0
    } else {
        nodes.iter().map(|n| *out_degree.get(n).unwrap_or(&0) as f64).sum::<f64>() / nodes.len() as f64
    };
    let denominator = mean_afferent + mean_efferent;
    let instability = if denominator > 0.0 { mean_efferent / denominator } else { 0.0 };

    CohesionCoupling {
        mean_lcom: mean(&lcom_values),
        mean_tcc: mean(&tcc_values),
        mean_afferent,
        mean_efferent,
        instability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::{DependencyKind, Visibility};
    use std::path::PathBuf;

    fn symbol(name: &str, fqn: &str, kind: SymbolKind) -> Symbol {
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
            metadata: std::collections::HashMap::new(),
        }
    }

    #[test]
    fn lcom_and_instability_stay_within_expected_bounds() {
        let class = symbol("C", "N.C", SymbolKind::Class);
        let method_a = symbol("A", "N.C.A", SymbolKind::Method);
        let method_b = symbol("B", "N.C.B", SymbolKind::Method);
        let symbols = vec![class.clone(), method_a, method_b];
        let classes = vec![&class];
        let edges = vec![Dependency {
            kind: DependencyKind::MethodCall,
            origin: "N.C".to_string(),
            target: "N.C.A".to_string(),
            source_file: PathBuf::from("a.cs"),
            source_line: 1,
            reflective_target: None,
            conditional: false,
        }];
        let metrics = compute(&classes, &symbols, &edges);
        assert!(metrics.instability >= 0.0 && metrics.instability <= 1.0);
        assert!(metrics.mean_lcom > 0.0);
    }
}
