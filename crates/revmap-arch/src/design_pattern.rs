//! Design-pattern detection: per-class indicator scoring,
//! one match per pattern kind when any class participates.

use revmap_core::{DesignPatternKind, DesignPatternMatch, Symbol};

struct PatternSpec {
    kind: DesignPatternKind,
    indicators: &'static [&'static str],
}

const PATTERNS: &[PatternSpec] = &[
    PatternSpec { kind: DesignPatternKind::Singleton, indicators: &["Singleton", "Instance"] },
    PatternSpec { kind: DesignPatternKind::Factory, indicators: &["Factory", "Builder", "Create"] },
    PatternSpec { kind: DesignPatternKind::Observer, indicators: &["Observer", "Listener", "Event", "Notify"] },
    PatternSpec { kind: DesignPatternKind::Strategy, indicators: &["Strategy", "Algorithm"] },
    PatternSpec { kind: DesignPatternKind::Decorator, indicators: &["Decorator", "Wrapper"] },
    PatternSpec { kind: DesignPatternKind::Adapter, indicators: &["Adapter", "Adaptor"] },
];

fn hits(haystack: &str, indicators: &[&str]) -> usize {
    indicators.iter().filter(|i| haystack.contains(*i)).count()
}

pub fn detect(classes: &[&Symbol], all_symbols: &[Symbol]) -> Vec<DesignPatternMatch> {
    let mut matches = Vec::new();
    for spec in PATTERNS {
        let mut participants = Vec::new();
        let mut total_sum = 0usize;
        for class in classes {
            let name_score = hits(&class.name, spec.indicators) * 2;
            let method_score: usize = all_symbols
                .iter()
                .filter(|m| m.fqn.starts_with(&format!("{}.", class.fqn)))
                .map(|m| hits(&m.name, spec.indicators))
                .sum();
            let sum = name_score + method_score;
            if sum > 2 {
                participants.push(class.fqn.clone());
                total_sum += sum;
            }
        }
        if !participants.is_empty() {
            let confidence = (total_sum as f64 / (participants.len() as f64 * 3.0)).min(1.0);
            matches.push(DesignPatternMatch { pattern: spec.kind, confidence, participants });
        }
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use revmap_core::{SymbolKind, Visibility};
    use std::path::PathBuf;

    fn class(name: &str) -> Symbol {
        Symbol {
            name: name.to_string(),
            fqn: format!("App.{name}"),
            kind: SymbolKind::Class,
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
    fn detects_factory_from_name_and_method_indicators() {
        let factory = class("WidgetFactory");
        let method = Symbol {
            name: "CreateWidget".to_string(),
            fqn: format!("{}.CreateWidget", factory.fqn),
            kind: SymbolKind::Method,
            ..class("CreateWidget")
        };
        let classes = vec![&factory];
        let symbols = vec![method];
        let matches = detect(&classes, &symbols);
        assert!(matches.iter().any(|m| m.pattern == DesignPatternKind::Factory));
    }
}
