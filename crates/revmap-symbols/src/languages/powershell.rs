//! PowerShell extraction: a line scan for `function <name>` declarations
//! and `$<name>` variable references. Variable matches are capped at five
//! per line so a dense one-liner doesn't flood the symbol table.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use revmap_core::{Symbol, SymbolKind, Visibility};

static FUNCTION_DECL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bfunction\s+([\w-]+)").unwrap());
static VARIABLE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([A-Za-z_][\w]*)").unwrap());

const MAX_VARIABLES_PER_LINE: usize = 5;

pub fn extract(path: &Path, content: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    let mut seen_variables = HashSet::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx as u32 + 1;

        if let Some(captures) = FUNCTION_DECL.captures(line) {
            let name = captures.get(1).unwrap().as_str().to_string();
            symbols.push(Symbol {
                fqn: name.clone(),
                name,
                kind: SymbolKind::Method,
                file_path: path.to_path_buf(),
                line: line_no,
                visibility: Visibility::Public,
                modifiers: Vec::new(),
                attributes: Vec::new(),
                parameters: Vec::new(),
                metadata: base_metadata(),
            });
        }

        for (count, captures) in VARIABLE_REF.captures_iter(line).enumerate() {
            if count >= MAX_VARIABLES_PER_LINE {
                break;
            }
            let name = captures.get(1).unwrap().as_str().to_string();
            if !seen_variables.insert(name.clone()) {
                continue;
            }
            symbols.push(Symbol {
                fqn: name.clone(),
                name,
                kind: SymbolKind::Field,
                file_path: path.to_path_buf(),
                line: line_no,
                visibility: Visibility::Public,
                modifiers: Vec::new(),
                attributes: Vec::new(),
                parameters: Vec::new(),
                metadata: base_metadata(),
            });
        }
    }

    symbols
}

fn base_metadata() -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert("Language".to_string(), "PowerShell".to_string());
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_functions_and_deduplicated_variables() {
        let src = "function Deploy-App {\n    $name = \"x\"\n    Write-Host $name\n}\n";
        let symbols = extract(Path::new("deploy.ps1"), src);
        assert!(symbols.iter().any(|s| s.kind == SymbolKind::Method && s.name == "Deploy-App"));
        let vars: Vec<_> = symbols.iter().filter(|s| s.name == "name").collect();
        assert_eq!(vars.len(), 1);
    }
}
