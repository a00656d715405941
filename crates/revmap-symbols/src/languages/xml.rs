//! XML and XML-flavored configuration files: the root element becomes a
//! `Class` symbol, every descendant element becomes a `Property` symbol
//! whose FQN encodes its path from the root (repeated siblings get an
//! `[i]` index so the FQN stays unique).

use std::collections::HashMap;
use std::path::Path;

use revmap_core::{Symbol, SymbolKind, Visibility};

use crate::xmlutil::{self, XmlElement};

pub fn extract(path: &Path, content: &str) -> anyhow::Result<Vec<Symbol>> {
    let document = xmlutil::parse(content)?;
    let Some(root) = document.children.first() else { return Ok(Vec::new()) };

    let mut symbols = Vec::new();
    symbols.push(Symbol {
        name: root.name.clone(),
        fqn: root.name.clone(),
        kind: SymbolKind::Class,
        file_path: path.to_path_buf(),
        line: 1,
        visibility: Visibility::Public,
        modifiers: Vec::new(),
        attributes: root.attributes.keys().cloned().collect(),
        parameters: Vec::new(),
        metadata: base_metadata(),
    });

    walk(root, &root.name, path, &mut symbols);
    Ok(symbols)
}

fn walk(element: &XmlElement, fqn_prefix: &str, path: &Path, out: &mut Vec<Symbol>) {
    let mut seen_counts: HashMap<String, usize> = HashMap::new();
    for child in &element.children {
        let count = seen_counts.entry(child.name.clone()).or_insert(0);
        let fqn = if *count == 0 {
            format!("{fqn_prefix}.{}", child.name)
        } else {
            format!("{fqn_prefix}.{}[{}]", child.name, count)
        };
        *count += 1;

        out.push(Symbol {
            name: child.name.clone(),
            fqn: fqn.clone(),
            kind: SymbolKind::Property,
            file_path: path.to_path_buf(),
            line: 0,
            visibility: Visibility::Public,
            modifiers: Vec::new(),
            attributes: child.attributes.keys().cloned().collect(),
            parameters: Vec::new(),
            metadata: base_metadata(),
        });

        walk(child, &fqn, path, out);
    }
}

fn base_metadata() -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert("Language".to_string(), "Xml".to_string());
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_becomes_class_children_become_properties() {
        let doc = "<configuration><appSettings><add key=\"A\" value=\"1\" /><add key=\"B\" value=\"2\" /></appSettings></configuration>";
        let symbols = extract(Path::new("web.config"), doc).unwrap();
        let root = symbols.iter().find(|s| s.kind == SymbolKind::Class).unwrap();
        assert_eq!(root.name, "configuration");
        let adds: Vec<_> = symbols.iter().filter(|s| s.name == "add").collect();
        assert_eq!(adds.len(), 2);
        assert!(adds.iter().any(|s| s.fqn.ends_with("add[1]")));
    }
}
