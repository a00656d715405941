//! AutoLISP/DCL extraction: a line scan for `defun`, `setq`, `command`
//! invocations, and `*global*`-style globals. Deduplicated per
//! `(name, kind)` pair within a file so a repeatedly-`setq`'d variable
//! doesn't produce a symbol per assignment.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use revmap_core::{Symbol, SymbolKind, Visibility};

static DEFUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(defun\s+([A-Za-z_][\w:\-]*)").unwrap());
static SETQ: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(setq\s+([A-Za-z_][\w:\-]*)").unwrap());
static COMMAND: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\(command\s+"([^"]+)""#).unwrap());
static GLOBAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([A-Za-z_][\w\-]*)\*").unwrap());

const MAX_MATCHES_PER_LINE: usize = 5;

pub fn extract(path: &Path, content: &str) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    let mut seen: HashSet<(String, SymbolKind)> = HashSet::new();

    let mut push = |name: String, kind: SymbolKind, line: u32, metadata: HashMap<String, String>, out: &mut Vec<Symbol>| {
        if !seen.insert((name.clone(), kind)) {
            return;
        }
        out.push(Symbol {
            fqn: name.clone(),
            name,
            kind,
            file_path: path.to_path_buf(),
            line,
            visibility: Visibility::Public,
            modifiers: Vec::new(),
            attributes: Vec::new(),
            parameters: Vec::new(),
            metadata,
        });
    };

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx as u32 + 1;
        if line.trim_start().starts_with(';') {
            continue;
        }

        if let Some(captures) = DEFUN.captures(line) {
            let name = captures.get(1).unwrap().as_str().to_string();
            push(name, SymbolKind::Method, line_no, lang_metadata("Function"), &mut symbols);
        }

        for captures in SETQ.captures_iter(line).take(MAX_MATCHES_PER_LINE) {
            let name = captures.get(1).unwrap().as_str().to_string();
            push(name, SymbolKind::Field, line_no, lang_metadata("Variable"), &mut symbols);
        }

        for captures in COMMAND.captures_iter(line).take(MAX_MATCHES_PER_LINE) {
            let name = captures.get(1).unwrap().as_str().to_string();
            push(name, SymbolKind::Method, line_no, lang_metadata("CommandInvocation"), &mut symbols);
        }

        for captures in GLOBAL.captures_iter(line).take(MAX_MATCHES_PER_LINE) {
            let name = format!("*{}*", captures.get(1).unwrap().as_str());
            let mut metadata = lang_metadata("Global");
            metadata.insert("Scope".to_string(), "Global".to_string());
            push(name, SymbolKind::Field, line_no, metadata, &mut symbols);
        }
    }

    symbols
}

fn lang_metadata(autolisp_kind: &str) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert("Language".to_string(), "AutoLisp".to_string());
    metadata.insert("AutoLispKind".to_string(), autolisp_kind.to_string());
    metadata
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_defun_setq_command_and_globals() {
        let src = "(defun c:MAKE-WALL ()\n  (setq *wall-height* 10)\n  (command \"LINE\" pt1 pt2)\n)\n";
        let symbols = extract(Path::new("walls.lsp"), src);
        assert!(symbols.iter().any(|s| s.kind == SymbolKind::Method && s.name == "c:MAKE-WALL"));
        assert!(symbols.iter().any(|s| s.name == "*wall-height*"));
        assert!(symbols.iter().any(|s| s.name == "LINE"));
    }

    #[test]
    fn repeated_setq_deduplicates() {
        let src = "(setq x 1)\n(setq x 2)\n";
        let symbols = extract(Path::new("a.lsp"), src);
        assert_eq!(symbols.len(), 1);
    }
}
