//! Thread-safe pool of tree-sitter parsers.
//!
//! `tree_sitter::Parser` is not `Send`/`Sync`, so parsing happens on a
//! small fixed set of dedicated worker threads and callers talk to the
//! pool over a channel instead of touching a parser directly.

use std::path::PathBuf;

use anyhow::Result;
use tree_sitter::{Language, Parser};

/// Languages parsed with a real grammar rather than a line/pattern scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    CSharp,
}

impl FileType {
    pub fn from_path(path: &PathBuf) -> Option<Self> {
        match path.extension()?.to_str()? {
            "cs" => Some(FileType::CSharp),
            _ => None,
        }
    }

    pub fn get_language(&self) -> Language {
        match self {
            FileType::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileType::CSharp => "csharp",
        }
    }
}

#[derive(Debug)]
pub struct ParseRequest {
    pub file_type: FileType,
    pub content: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct ParseResult {
    pub tree: tree_sitter::Tree,
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug)]
struct WorkerRequest {
    request: ParseRequest,
    response_sender: std::sync::mpsc::Sender<Result<ParseResult>>,
}

pub struct ParserPool {
    sender: std::sync::mpsc::Sender<WorkerRequest>,
}

impl ParserPool {
    pub fn new(num_workers: usize) -> Self {
        let (sender, receiver) = std::sync::mpsc::channel::<WorkerRequest>();
        let receiver = std::sync::Arc::new(std::sync::Mutex::new(receiver));

        for i in 0..num_workers {
            let receiver = receiver.clone();
            std::thread::spawn(move || {
                Self::worker_thread(i, receiver);
            });
        }

        Self { sender }
    }

    fn worker_thread(
        worker_id: usize,
        receiver: std::sync::Arc<std::sync::Mutex<std::sync::mpsc::Receiver<WorkerRequest>>>,
    ) {
        tracing::debug!("parser worker {} started", worker_id);
        let mut parser = Parser::new();

        loop {
            let request = match receiver.lock().unwrap().recv() {
                Ok(req) => req,
                Err(_) => {
                    tracing::debug!("parser worker {} shutting down", worker_id);
                    break;
                }
            };

            let WorkerRequest { request, response_sender } = request;
            let language = request.file_type.get_language();
            if let Err(e) = parser.set_language(&language) {
                let _ = response_sender.send(Err(anyhow::anyhow!("failed to set language: {e}")));
                continue;
            }

            let result = match parser.parse(&request.content, None) {
                Some(tree) => Ok(ParseResult { tree, path: request.path, content: request.content }),
                None => Err(anyhow::anyhow!("failed to parse content")),
            };

            if response_sender.send(result).is_err() {
                tracing::warn!("failed to send parse result back to caller");
            }
        }
    }

    /// Parse on the pool, blocking the calling thread for the round trip.
    pub fn parse_blocking(&self, request: ParseRequest) -> Result<ParseResult> {
        let (response_sender, response_receiver) = std::sync::mpsc::channel();
        let worker_request = WorkerRequest { request, response_sender };
        self.sender.send(worker_request).map_err(|_| anyhow::anyhow!("parser pool is shut down"))?;
        response_receiver.recv().map_err(|_| anyhow::anyhow!("parser worker died"))?
    }
}

impl Clone for ParserPool {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

/// Serializes a parsed tree to a compact JSON string, used by the
/// diagnostic AST dump rather than by symbol extraction itself.
pub fn tree_to_json(node: &tree_sitter::Node, source: &str) -> String {
    use std::fmt::Write;

    fn write_node<W: Write>(writer: &mut W, node: tree_sitter::Node, source: &str, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = writer.write_str(&indent);
        let _ = write!(writer, "{{\"type\":\"{}\",", node.kind());

        if node.child_count() == 0 {
            if let Ok(text) = node.utf8_text(source.as_bytes()) {
                let escaped = text.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n");
                let _ = write!(writer, "\"text\":\"{escaped}\",");
            }
        }

        let _ = write!(writer, "\"start\":{},\"end\":{},", node.start_byte(), node.end_byte());

        if node.child_count() > 0 {
            let _ = write!(writer, "\"children\":[");
            let mut cursor = node.walk();
            let mut first = true;
            for child in node.children(&mut cursor) {
                if !first {
                    let _ = write!(writer, ",");
                }
                first = false;
                let _ = writeln!(writer);
                write_node(writer, child, source, depth + 1);
            }
            let _ = write!(writer, "\n{indent}]");
        }

        let _ = writer.write_str("}");
    }

    let mut result = String::new();
    write_node(&mut result, *node, source, 0);
    result
}

/// Creates a pool sized to the available cores, with a floor of two
/// workers so small machines still get concurrency between the crawl
/// and extraction stages.
pub fn create_parser_pool() -> ParserPool {
    let num_workers = std::thread::available_parallelism().map(|n| n.get().max(2)).unwrap_or(2);
    ParserPool::new(num_workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_minimal_class() {
        let pool = create_parser_pool();
        let request = ParseRequest {
            file_type: FileType::CSharp,
            content: "namespace N { public class C {} }".to_string(),
            path: PathBuf::from("C.cs"),
        };
        let result = pool.parse_blocking(request).unwrap();
        assert_eq!(result.tree.root_node().kind(), "compilation_unit");
    }
}
