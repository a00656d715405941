//! JSON configuration extraction: walks the parsed value tree, emitting
//! one `Property` symbol per object key or array element, FQN-qualified
//! by `.` for object keys and `[i]` for array indices.

use std::collections::HashMap;
use std::path::Path;

use revmap_core::{Symbol, SymbolKind, Visibility};
use serde_json::Value;

pub fn extract(path: &Path, content: &str) -> anyhow::Result<Vec<Symbol>> {
    let value: Value = serde_json::from_str(content)?;
    let mut symbols = Vec::new();
    let root_name = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_else(|| "root".to_string());

    symbols.push(Symbol {
        name: root_name.clone(),
        fqn: root_name.clone(),
        kind: SymbolKind::Class,
        file_path: path.to_path_buf(),
        line: 1,
        visibility: Visibility::Public,
        modifiers: Vec::new(),
        attributes: Vec::new(),
        parameters: Vec::new(),
        metadata: base_metadata(),
    });

    walk(&value, &root_name, path, &mut symbols);
    Ok(symbols)
}

fn walk(value: &Value, fqn_prefix: &str, path: &Path, out: &mut Vec<Symbol>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let fqn = format!("{fqn_prefix}.{key}");
                out.push(property(key, &fqn, path));
                walk(child, &fqn, path, out);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                let fqn = format!("{fqn_prefix}[{idx}]");
                walk(child, &fqn, path, out);
            }
        }
        _ => {}
    }
}

fn property(name: &str, fqn: &str, path: &Path) -> Symbol {
    Symbol {
        name: name.to_string(),
        fqn: fqn.to_string(),
        kind: SymbolKind::Property,
        file_path: path.to_path_buf(),
        line: 0,
        visibility: Visibility::Public,
        modifiers: Vec::new(),
        attributes: Vec::new(),
        parameters: Vec::new(),
        metadata: base_metadata(),
    }
}

fn base_metadata() -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert("Language".to_string(), "Json".to_string());
    metadata
}
