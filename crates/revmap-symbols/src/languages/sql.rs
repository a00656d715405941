//! SQL extraction: a single case-insensitive pattern per statement kind,
//! scanned line by line rather than fully parsed (SQL dialects vary too
//! much across this corpus to justify a grammar).

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use revmap_core::{Symbol, SymbolKind, Visibility};

static CREATE_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*create\s+(?:or\s+replace\s+)?(table|view|procedure|function)\s+(?:if\s+not\s+exists\s+)?\[?([\w.]+)\]?")
        .unwrap()
});

pub fn extract(path: &Path, content: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let Some(captures) = CREATE_OBJECT.captures(line) else { continue };
        let object_kind = captures.get(1).unwrap().as_str().to_ascii_lowercase();
        let name = captures.get(2).unwrap().as_str().trim_matches('"').to_string();
        let kind = match object_kind.as_str() {
            "table" | "view" => SymbolKind::Class,
            _ => SymbolKind::Method,
        };
        let mut metadata = HashMap::new();
        metadata.insert("Language".to_string(), "Sql".to_string());
        metadata.insert("SqlObjectType".to_string(), object_kind);
        symbols.push(Symbol {
            fqn: name.clone(),
            name,
            kind,
            file_path: path.to_path_buf(),
            line: idx as u32 + 1,
            visibility: Visibility::Public,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            parameters: Vec::new(),
            metadata,
        });
    }
    symbols
}
