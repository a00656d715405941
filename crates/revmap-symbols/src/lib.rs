//! revmap-symbols — multi-language symbol extraction.

pub mod analysis;
pub mod container;
pub mod languages;
pub mod options;
pub mod parser_pool;
pub mod xmlutil;

use std::collections::HashMap;
use std::fs;

use revmap_core::{CancellationToken, Diagnostic, FileRecord, Outcome, PipelineError, Progress, ProgressReporter};

pub use analysis::{AggregateCounts, CodeAnalysis, LanguageResult, QualityMetrics};
pub use options::SymbolOptions;

use languages::{autolisp, csharp, json, powershell, sql, vb, xml};
use parser_pool::{create_parser_pool, ParserPool};

fn language_tag(extension: &str) -> Option<&'static str> {
    match extension {
        "cs" => Some("csharp"),
        "vb" => Some("vb"),
        "sql" => Some("sql"),
        "xml" | "config" | "resx" | "settings" => Some("xml"),
        "json" => Some("json"),
        "ps1" | "psm1" => Some("powershell"),
        "lsp" | "dcl" => Some("autolisp"),
        _ => None,
    }
}

fn extract_one(
    pool: &ParserPool,
    extension: &str,
    path: &std::path::Path,
    content: &str,
) -> anyhow::Result<Vec<revmap_core::Symbol>> {
    match extension {
        "cs" => csharp::extract(pool, path, content),
        "vb" => Ok(vb::extract(path, content)),
        "sql" => Ok(sql::extract(path, content)),
        "xml" | "config" | "resx" | "settings" => xml::extract(path, content),
        "json" => json::extract(path, content),
        "ps1" | "psm1" => Ok(powershell::extract(path, content)),
        "lsp" | "dcl" => Ok(autolisp::extract(path, content)),
        _ => Ok(Vec::new()),
    }
}

/// Lines immediately preceding a declaration that start with a doc-comment
/// marker for the owning language. Only applied when `extract_doc` is set.
fn attach_doc_comments(symbols: &mut [revmap_core::Symbol], content: &str, language: &str) {
    let marker = match language {
        "csharp" => "///",
        "vb" => "'''",
        _ => return,
    };
    let lines: Vec<&str> = content.lines().collect();
    for symbol in symbols.iter_mut() {
        if symbol.line == 0 || symbol.line as usize > lines.len() + 1 {
            continue;
        }
        let mut doc_lines = Vec::new();
        let mut cursor = symbol.line as usize - 1;
        while cursor > 0 {
            let candidate = lines[cursor - 1].trim();
            if let Some(stripped) = candidate.strip_prefix(marker) {
                doc_lines.push(stripped.trim().to_string());
                cursor -= 1;
            } else {
                break;
            }
        }
        if !doc_lines.is_empty() {
            doc_lines.reverse();
            symbol.metadata.insert("Doc".to_string(), doc_lines.join(" "));
        }
    }
}

/// Extracts symbols from every file the crawler classified as source or
/// configuration and whose extension is in the supported roster.
pub fn extract(
    files: &[FileRecord],
    options: &SymbolOptions,
    cancel: &CancellationToken,
    reporter: &ProgressReporter,
) -> Result<Outcome<CodeAnalysis>, PipelineError> {
    let pool = create_parser_pool();
    let mut diagnostics = Vec::new();
    let mut by_language: HashMap<&'static str, LanguageResult> = HashMap::new();
    let mut progress = Progress::new("symbols");

    for file in files {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled { stage: "symbols" });
        }
        let Some(tag) = language_tag(&file.extension) else { continue };
        if !options.accepts(&file.extension) {
            continue;
        }
        if file.size_bytes > options.max_file_bytes {
            diagnostics.push(Diagnostic::new(&file.absolute_path, "file exceeds max_file_bytes, skipped"));
            continue;
        }

        let content = match fs::read_to_string(&file.absolute_path) {
            Ok(c) => c,
            Err(e) => {
                diagnostics.push(Diagnostic::new(&file.absolute_path, format!("cannot read file: {e}")));
                continue;
            }
        };

        let mut symbols = match extract_one(&pool, &file.extension, &file.absolute_path, &content) {
            Ok(symbols) => symbols,
            Err(e) => {
                diagnostics.push(Diagnostic::new(&file.absolute_path, format!("extraction failed: {e}")));
                continue;
            }
        };

        if options.extract_doc {
            attach_doc_comments(&mut symbols, &content, tag);
        }
        if !options.include_private {
            symbols.retain(|s| s.visibility != revmap_core::Visibility::Private);
        }

        let line_count = content.lines().count() as u64;
        let entry = by_language.entry(tag).or_insert_with(|| LanguageResult {
            language: tag.to_string(),
            file_count: 0,
            symbols: Vec::new(),
            total_lines: 0,
        });
        entry.file_count += 1;
        entry.total_lines += line_count;
        entry.symbols.extend(symbols);

        progress.files_seen += 1;
        progress.current_path = Some(file.absolute_path.to_string_lossy().to_string());
        reporter(&progress);
    }

    let languages: Vec<LanguageResult> = by_language.into_values().collect();
    let analysis = CodeAnalysis::build(languages, options.compute_metrics);
    Ok(Outcome::with_diagnostics(analysis, diagnostics))
}
